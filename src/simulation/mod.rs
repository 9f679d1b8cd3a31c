pub mod idm;
pub mod incident;
pub mod integrator;
pub mod mobil;
pub mod model;
pub mod neighbor;
pub mod spawner;
pub mod stats;
pub mod vehicle;

pub use incident::Incident;
pub use model::{Model, Stats};
pub use vehicle::{Vehicle, VehicleId, VehicleType};
