use super::idm::idm_acceleration;
use super::neighbor::{follower, leader};
use super::vehicle::Vehicle;

pub const THRESHOLD: f32 = 0.1;
pub const BIAS: f32 = 0.2;
pub const SAFE_DECEL_FLOOR: f32 = -3.0;
pub const LANE_CHANGE_COOLDOWN: f32 = 3.0;

#[derive(Debug, Clone, Copy)]
pub struct MobilParams {
    pub a_max: f32,
    pub safe_time_gap: f32,
    pub politeness: f32,
}

// Candidates tried in fixed order [lane-1, lane+1]; first one clearing the
// safety floor and exceeding the incentive threshold wins.
pub fn evaluate_lane_change(
    vehicles: &[Vehicle],
    subject: &Vehicle,
    a_c: f32,
    lane_count: u8,
    params: MobilParams,
) -> Option<u8> {
    if subject.crashed || subject.lane_change_timer > 0.0 {
        return None;
    }

    let old_follower = follower(vehicles, subject, subject.lane);
    let old_leader = leader(vehicles, subject, subject.lane);

    for candidate in lane_candidates(subject.lane, lane_count) {
        let new_leader = leader(vehicles, subject, candidate);
        let new_follower = follower(vehicles, subject, candidate);

        if let Some(nf) = new_follower {
            let gap = subject.x - nf.x - subject.length;
            let a_nf = idm_acceleration(
                nf.v,
                Some(subject.v),
                Some(gap),
                nf.target_speed,
                params.a_max,
                params.safe_time_gap,
            );
            if a_nf < SAFE_DECEL_FLOOR {
                continue;
            }
        }

        let gap_new = new_leader.map(|nl| nl.x - subject.x - nl.length);
        let a_c_new = idm_acceleration(
            subject.v,
            new_leader.map(|nl| nl.v),
            gap_new,
            subject.target_speed,
            params.a_max,
            params.safe_time_gap,
        );

        let delta_o = match old_follower {
            Some(of) => {
                let gap_cur = subject.x - of.x - subject.length;
                let a_o_cur = idm_acceleration(
                    of.v,
                    Some(subject.v),
                    Some(gap_cur),
                    of.target_speed,
                    params.a_max,
                    params.safe_time_gap,
                );

                let (prospective_leader_v, prospective_gap) = match old_leader {
                    Some(ol) => (Some(ol.v), Some(ol.x - of.x - ol.length)),
                    None => (None, None),
                };
                let a_o_new = idm_acceleration(
                    of.v,
                    prospective_leader_v,
                    prospective_gap,
                    of.target_speed,
                    params.a_max,
                    params.safe_time_gap,
                );
                a_o_new - a_o_cur
            }
            None => 0.0,
        };

        let bias = if candidate > subject.lane { BIAS } else { -BIAS };
        let incentive = (a_c_new - a_c) + params.politeness * delta_o + bias;

        if incentive > THRESHOLD {
            return Some(candidate);
        }
    }

    None
}

fn lane_candidates(lane: u8, lane_count: u8) -> Vec<u8> {
    let mut candidates = Vec::with_capacity(2);
    if lane > 0 {
        candidates.push(lane - 1);
    }
    if lane + 1 < lane_count {
        candidates.push(lane + 1);
    }
    candidates
}
