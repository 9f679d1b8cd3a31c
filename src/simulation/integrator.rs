use super::vehicle::Vehicle;

// Effective dt passed in is DT * config.time_scale.
pub const DT: f32 = 1.0 / 60.0;
pub const LATERAL_SPEED: f32 = 2.5;
const SNAP_EPSILON: f32 = 0.05;

// Crashed vehicles skip the velocity/position update but still run their
// cooldown and lateral lerp (harmless, since y already equals lane once stopped).
pub fn integrate_vehicle(v: &mut Vehicle, dt: f32) {
    v.lane_change_timer = (v.lane_change_timer - dt).max(0.0);

    if !v.crashed {
        v.v = (v.v + v.a * dt).max(0.0);
        v.x += v.v * dt;
    }

    let target = v.lane as f32;
    if (v.y - target).abs() > SNAP_EPSILON {
        let step = LATERAL_SPEED * dt;
        if v.y < target {
            v.y = (v.y + step).min(target);
        } else {
            v.y = (v.y - step).max(target);
        }
    } else {
        v.y = target;
        v.lane_change_direction = 0;
    }
}

pub fn despawn(vehicles: &mut Vec<Vehicle>, road_length: f32) {
    vehicles.retain(|v| v.x <= road_length);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::vehicle::{VehicleId, VehicleType};

    #[test]
    fn speed_never_goes_negative() {
        let mut v = Vehicle::new(VehicleId(1), VehicleType::Car, 0, 30.0);
        v.v = 0.5;
        v.a = -10.0;
        integrate_vehicle(&mut v, 1.0);
        assert_eq!(v.v, 0.0);
    }

    #[test]
    fn position_advances_by_speed_times_dt() {
        let mut v = Vehicle::new(VehicleId(1), VehicleType::Car, 0, 30.0);
        v.x = 0.0;
        v.v = 10.0;
        v.a = 0.0;
        integrate_vehicle(&mut v, DT);
        assert!((v.x - 10.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn crashed_vehicle_stays_put() {
        let mut v = Vehicle::new(VehicleId(1), VehicleType::Car, 0, 30.0);
        v.crashed = true;
        v.v = 0.0;
        v.a = 0.0;
        v.x = 42.0;
        integrate_vehicle(&mut v, DT);
        assert_eq!(v.x, 42.0);
        assert_eq!(v.v, 0.0);
    }

    #[test]
    fn lateral_position_converges_and_snaps() {
        let mut v = Vehicle::new(VehicleId(1), VehicleType::Car, 1, 30.0);
        v.y = 0.0;
        v.lane_change_direction = 1;
        for _ in 0..200 {
            integrate_vehicle(&mut v, DT);
        }
        assert_eq!(v.y, 1.0);
        assert_eq!(v.lane_change_direction, 0);
    }

    #[test]
    fn despawn_removes_vehicles_past_road_length() {
        let mut vehicles = vec![
            Vehicle::new(VehicleId(1), VehicleType::Car, 0, 30.0),
            Vehicle::new(VehicleId(2), VehicleType::Car, 0, 30.0),
        ];
        vehicles[0].x = 10.0;
        vehicles[1].x = 5001.0;
        despawn(&mut vehicles, 5000.0);
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].id, VehicleId(1));
    }

    #[test]
    fn lane_change_timer_decrements_and_floors_at_zero() {
        let mut v = Vehicle::new(VehicleId(1), VehicleType::Car, 0, 30.0);
        v.lane_change_timer = 0.02;
        integrate_vehicle(&mut v, DT);
        assert!(v.lane_change_timer >= 0.0);
        integrate_vehicle(&mut v, 10.0);
        assert_eq!(v.lane_change_timer, 0.0);
    }
}
