use std::collections::VecDeque;

use super::vehicle::Vehicle;

pub const FD_RING_CAPACITY: usize = 200;
pub const SAMPLING_INTERVAL: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FdPoint {
    pub k: f32,
    pub q: f32,
}

// Oldest evicted on overflow.
#[derive(Debug, Clone, Default)]
pub struct FdRing {
    points: VecDeque<FdPoint>,
}

impl FdRing {
    pub fn push(&mut self, point: FdPoint) {
        if self.points.len() >= FD_RING_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_vec(&self) -> Vec<FdPoint> {
        self.points.iter().copied().collect()
    }

    pub fn max_flow(&self) -> f32 {
        self.points.iter().map(|p| p.q).fold(0.0, f32::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub count: usize,
    pub avg_speed_kmh: f32,
    pub density_veh_km: f32,
    pub flow_veh_h: f32,
}

pub fn snapshot(vehicles: &[Vehicle], road_length: f32) -> StatsSnapshot {
    let count = vehicles.len();
    if count == 0 {
        return StatsSnapshot {
            count: 0,
            avg_speed_kmh: 0.0,
            density_veh_km: 0.0,
            flow_veh_h: 0.0,
        };
    }

    let avg_speed_ms = vehicles.iter().map(|v| v.v).sum::<f32>() / count as f32;
    let avg_speed_kmh = avg_speed_ms * 3.6;
    let density_veh_km = count as f32 / (road_length / 1000.0);
    let flow_veh_h = density_veh_km * avg_speed_kmh;

    StatsSnapshot {
        count,
        avg_speed_kmh,
        density_veh_km,
        flow_veh_h,
    }
}
