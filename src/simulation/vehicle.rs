#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Car,
    Truck,
}

impl VehicleType {
    pub fn geometry(self) -> (f32, f32) {
        match self {
            VehicleType::Car => (4.5, 2.0),
            VehicleType::Truck => (14.0, 2.6),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub x: f32,
    pub y: f32, // visual only, physics uses lane
    pub lane: u8,
    pub v: f32,
    pub a: f32,
    pub length: f32,
    pub width: f32,
    pub vehicle_type: VehicleType,
    pub target_speed: f32,
    pub lane_change_timer: f32,
    pub lane_change_direction: i8, // -1, 0, +1, indicator state, visual only
    pub crashed: bool,
}

impl Vehicle {
    pub fn new(id: VehicleId, vehicle_type: VehicleType, lane: u8, target_speed: f32) -> Self {
        let (length, width) = vehicle_type.geometry();
        Self {
            id,
            x: 0.0,
            y: lane as f32,
            lane,
            v: target_speed * 0.9,
            a: 0.0,
            length,
            width,
            vehicle_type,
            target_speed,
            lane_change_timer: 0.0,
            lane_change_direction: 0,
            crashed: false,
        }
    }
}
