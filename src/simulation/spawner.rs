use super::vehicle::{Vehicle, VehicleId, VehicleType};
use crate::config::SimulationConfig;
use crate::rng::RandomSource;

pub const SPAWN_CLEARANCE: f32 = 40.0;

const TRUCK_DESIRED_KMH: (f32, f32) = (80.0, 90.0);
const CAR_DESIRED_KMH: (f32, f32) = (100.0, 120.0);

// time_since_last_spawn must already include this step's dt. One uniform(0.8, 1.2)
// draw is consumed per call, before the clearance check, regardless of outcome.
pub fn attempt_spawn(
    vehicles: &[Vehicle],
    lane_count: u8,
    config: &SimulationConfig,
    rng: &mut dyn RandomSource,
    time_since_last_spawn: &mut f32,
    next_id: &mut u64,
) -> Option<Vehicle> {
    let tau = 3600.0 / config.inflow_rate;
    let u = rng.uniform(0.8, 1.2);
    let threshold = u * tau;

    if *time_since_last_spawn <= threshold {
        return None;
    }

    let target_lane = emptiest_lane(vehicles, lane_count)?;
    let clearance = lane_min_x(vehicles, target_lane).unwrap_or(f32::INFINITY);
    if clearance <= SPAWN_CLEARANCE {
        // Not reset, so the next tick retries immediately.
        return None;
    }

    let vehicle_type = if rng.bernoulli(config.truck_ratio) {
        VehicleType::Truck
    } else {
        VehicleType::Car
    };
    let (lo_kmh, hi_kmh) = match vehicle_type {
        VehicleType::Truck => TRUCK_DESIRED_KMH,
        VehicleType::Car => CAR_DESIRED_KMH,
    };
    let desired_kmh = rng.uniform(lo_kmh, hi_kmh);
    let desired_ms = desired_kmh / 3.6;

    let id = VehicleId(*next_id);
    *next_id += 1;
    let vehicle = Vehicle::new(id, vehicle_type, target_lane, desired_ms);

    *time_since_last_spawn = 0.0;
    Some(vehicle)
}

fn lane_min_x(vehicles: &[Vehicle], lane: u8) -> Option<f32> {
    vehicles
        .iter()
        .filter(|v| v.lane == lane)
        .map(|v| v.x)
        .fold(None, |acc, x| Some(acc.map_or(x, |m: f32| m.min(x))))
}

// Largest minimum-x wins; ties resolved toward the lowest lane index.
fn emptiest_lane(vehicles: &[Vehicle], lane_count: u8) -> Option<u8> {
    (0..lane_count)
        .map(|lane| (lane, lane_min_x(vehicles, lane).unwrap_or(f32::INFINITY)))
        .fold(None, |best: Option<(u8, f32)>, (lane, min_x)| match best {
            Some((_, best_min_x)) if best_min_x >= min_x => best,
            _ => Some((lane, min_x)),
        })
        .map(|(lane, _)| lane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::StdRandomSource;

    fn config() -> SimulationConfig {
        SimulationConfig {
            inflow_rate: 1000.0,
            truck_ratio: 0.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn spawns_on_empty_road_eventually() {
        let mut rng = StdRandomSource::from_seed(1);
        let mut time_since_last_spawn = 0.0f32;
        let mut next_id = 1u64;
        let cfg = config();
        let mut spawned = false;
        for _ in 0..10_000 {
            time_since_last_spawn += 1.0 / 60.0;
            if attempt_spawn(&[], 3, &cfg, &mut rng, &mut time_since_last_spawn, &mut next_id)
                .is_some()
            {
                spawned = true;
                break;
            }
        }
        assert!(spawned);
    }

    #[test]
    fn refuses_spawn_without_clearance_but_keeps_timer_growing() {
        let mut rng = StdRandomSource::from_seed(1);
        let cfg = config();
        let mut next_id = 1u64;
        let blockers: Vec<Vehicle> = (0..3)
            .map(|lane| {
                let mut v = Vehicle::new(VehicleId(100 + lane as u64), VehicleType::Car, lane, 30.0);
                v.x = 1.0;
                v
            })
            .collect();

        let mut time_since_last_spawn = 100.0f32;
        let before = time_since_last_spawn;
        let result =
            attempt_spawn(&blockers, 3, &cfg, &mut rng, &mut time_since_last_spawn, &mut next_id);
        assert!(result.is_none());
        assert_eq!(time_since_last_spawn, before);
    }

    #[test]
    fn picks_emptiest_lane() {
        let mut rng = StdRandomSource::from_seed(1);
        let cfg = config();
        let mut next_id = 1u64;
        let mut time_since_last_spawn = 1000.0f32;

        let mut vehicles = Vec::new();
        let mut near = Vehicle::new(VehicleId(1), VehicleType::Car, 0, 30.0);
        near.x = 45.0;
        vehicles.push(near);
        let mut far = Vehicle::new(VehicleId(2), VehicleType::Car, 1, 30.0);
        far.x = 500.0;
        vehicles.push(far);
        // lane 2 is empty -> emptiest

        let spawned =
            attempt_spawn(&vehicles, 3, &cfg, &mut rng, &mut time_since_last_spawn, &mut next_id)
                .expect("should spawn");
        assert_eq!(spawned.lane, 2);
    }

    #[test]
    fn truck_ratio_one_always_spawns_trucks() {
        let mut rng = StdRandomSource::from_seed(42);
        let cfg = SimulationConfig {
            truck_ratio: 0.4,
            ..config()
        };
        let mut next_id = 1u64;
        let mut saw_truck = false;
        for _ in 0..200 {
            let mut time_since_last_spawn = 1000.0f32;
            if let Some(v) =
                attempt_spawn(&[], 3, &cfg, &mut rng, &mut time_since_last_spawn, &mut next_id)
            {
                if v.vehicle_type == VehicleType::Truck {
                    saw_truck = true;
                    break;
                }
            }
        }
        assert!(saw_truck);
    }
}
