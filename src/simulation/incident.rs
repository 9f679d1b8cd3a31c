use std::time::{Duration, Instant};

use super::vehicle::{Vehicle, VehicleId};
use crate::clock::Clock;

pub const INCIDENT_DURATION: Duration = Duration::from_secs(8);
pub const INCIDENT_LANE: u8 = 1;
pub const INCIDENT_X_RANGE: (f32, f32) = (1000.0, 4000.0);

#[derive(Debug, Clone, Copy)]
pub struct Incident {
    pub vehicle_id: VehicleId,
    pub lane: u8,
    pub location: f32,
    pub expires_at: Instant,
}

// No-op if current is already Some or no eligible vehicle exists.
pub fn trigger(
    vehicles: &mut [Vehicle],
    current: &Option<Incident>,
    clock: &dyn Clock,
) -> Option<Incident> {
    if current.is_some() {
        return None;
    }

    let target = vehicles.iter_mut().find(|v| {
        v.lane == INCIDENT_LANE && v.x > INCIDENT_X_RANGE.0 && v.x < INCIDENT_X_RANGE.1
    })?;

    target.crashed = true;
    target.v = 0.0;
    target.a = 0.0;

    Some(Incident {
        vehicle_id: target.id,
        lane: target.lane,
        location: target.x,
        expires_at: clock.now() + INCIDENT_DURATION,
    })
}

// No-ops if the vehicle was already despawned.
pub fn release_if_expired(
    vehicles: &mut [Vehicle],
    current: Option<Incident>,
    clock: &dyn Clock,
) -> Option<Incident> {
    let incident = current?;
    if clock.now() < incident.expires_at {
        return Some(incident);
    }

    if let Some(v) = vehicles.iter_mut().find(|v| v.id == incident.vehicle_id) {
        v.crashed = false;
    }

    None
}
