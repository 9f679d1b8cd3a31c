use std::cmp::Ordering;
use std::collections::HashMap;

use super::idm::idm_acceleration;
use super::incident::{self, Incident};
use super::integrator::{despawn, integrate_vehicle, DT};
use super::mobil::{evaluate_lane_change, MobilParams, LANE_CHANGE_COOLDOWN};
use super::neighbor::leader;
use super::spawner::attempt_spawn;
use super::stats::{self, FdPoint, FdRing};
use super::vehicle::{Vehicle, VehicleType};
use crate::clock::{Clock, SystemClock};
use crate::config::SimulationConfig;
use crate::rng::{RandomSource, StdRandomSource};

#[derive(Debug, Clone)]
pub struct Stats {
    pub count: usize,
    pub avg_speed_kmh: f32,
    pub density_veh_km: f32,
    pub flow_veh_h: f32,
    pub points: Vec<FdPoint>,
}

pub struct Model {
    vehicles: Vec<Vehicle>,
    road_length: f32,
    lane_count: u8,
    next_id: u64,
    time_since_last_spawn: f32,
    stats_timer: f32,
    fd_ring: FdRing,
    incident: Option<Incident>,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl Model {
    pub fn new(road_length: f32) -> Self {
        Self::with_dependencies(
            road_length,
            Box::new(StdRandomSource::from_entropy()),
            Box::new(SystemClock),
        )
    }

    // Uses the real wall clock, so incident timing isn't reproducible across
    // processes, only the IDM/MOBIL/spawner trajectory is.
    pub fn new_seeded(road_length: f32, seed: u64) -> Self {
        Self::with_dependencies(
            road_length,
            Box::new(StdRandomSource::from_seed(seed)),
            Box::new(SystemClock),
        )
    }

    pub fn with_dependencies(
        road_length: f32,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        debug_assert!(road_length > 0.0, "road_length must be positive");
        Self {
            vehicles: Vec::new(),
            road_length,
            lane_count: 3,
            next_id: 1,
            time_since_last_spawn: 0.0,
            stats_timer: 0.0,
            fd_ring: FdRing::default(),
            incident: None,
            rng,
            clock,
        }
    }

    pub fn reset(&mut self) {
        self.vehicles.clear();
        self.fd_ring = FdRing::default();
        self.incident = None;
        self.next_id = 1;
        self.time_since_last_spawn = 0.0;
        self.stats_timer = 0.0;
    }

    pub fn step(&mut self, config: &SimulationConfig) {
        if config.is_paused {
            return;
        }
        let dt = DT * config.time_scale;

        self.sort_by_position_descending();
        self.decide(config);
        self.integrate(dt);
        self.handle_boundary(config, dt);
        self.aggregate(dt);
    }

    fn sort_by_position_descending(&mut self) {
        self.vehicles
            .sort_by(|a, b| b.x.partial_cmp(&a.x).unwrap_or(Ordering::Equal));
    }

    // Lane-change commits are staged and applied in a second pass below, so a
    // vehicle's mid-loop lane mutation can't perturb a later vehicle's neighbor query.
    fn decide(&mut self, config: &SimulationConfig) {
        let params = MobilParams {
            a_max: config.max_accel,
            safe_time_gap: config.safe_time_gap,
            politeness: config.politeness,
        };

        let mut staged_lane_changes = Vec::new();

        for i in 0..self.vehicles.len() {
            let subject = self.vehicles[i];
            if subject.crashed {
                self.vehicles[i].a = 0.0;
                continue;
            }

            let lead = leader(&self.vehicles, &subject, subject.lane);
            let gap = lead.map(|l| l.x - subject.x - l.length);
            let a_pure = idm_acceleration(
                subject.v,
                lead.map(|l| l.v),
                gap,
                subject.target_speed,
                config.max_accel,
                config.safe_time_gap,
            );

            if let Some(target_lane) =
                evaluate_lane_change(&self.vehicles, &subject, a_pure, self.lane_count, params)
            {
                staged_lane_changes.push((i, target_lane));
            }

            let mut a_final = a_pure;
            if subject.v > 1.0 && config.acceleration_noise > 0.0 {
                let eta = config.acceleration_noise;
                a_final += self.rng.uniform(-eta / 2.0, eta / 2.0);
            }
            self.vehicles[i].a = a_final;
        }

        for (index, target_lane) in staged_lane_changes {
            let vehicle = &mut self.vehicles[index];
            let direction = sign(target_lane as f32 - vehicle.y);
            log::debug!(
                "vehicle {:?} committing lane change {} -> {}",
                vehicle.id,
                vehicle.lane,
                target_lane
            );
            vehicle.lane = target_lane;
            vehicle.lane_change_timer = LANE_CHANGE_COOLDOWN;
            vehicle.lane_change_direction = direction;
        }
    }

    fn integrate(&mut self, dt: f32) {
        for vehicle in &mut self.vehicles {
            integrate_vehicle(vehicle, dt);
        }
    }

    fn handle_boundary(&mut self, config: &SimulationConfig, dt: f32) {
        let released = self.incident.is_some();
        self.incident =
            incident::release_if_expired(&mut self.vehicles, self.incident, self.clock.as_ref());
        if released && self.incident.is_none() {
            log::warn!("incident cleared");
        }

        despawn(&mut self.vehicles, self.road_length);

        self.time_since_last_spawn += dt;
        if let Some(new_vehicle) = attempt_spawn(
            &self.vehicles,
            self.lane_count,
            config,
            self.rng.as_mut(),
            &mut self.time_since_last_spawn,
            &mut self.next_id,
        ) {
            log::trace!(
                "spawned {:?} ({:?}) in lane {}",
                new_vehicle.id,
                new_vehicle.vehicle_type,
                new_vehicle.lane
            );
            self.vehicles.push(new_vehicle);
        }
    }

    fn aggregate(&mut self, dt: f32) {
        self.stats_timer += dt;
        if self.stats_timer < 1.0 {
            return;
        }
        if !self.vehicles.is_empty() {
            let snapshot = stats::snapshot(&self.vehicles, self.road_length);
            self.fd_ring.push(FdPoint {
                k: snapshot.density_veh_km,
                q: snapshot.flow_veh_h,
            });
        }
        self.stats_timer = 0.0;
    }

    pub fn trigger_accident(&mut self) {
        if let Some(incident) =
            incident::trigger(&mut self.vehicles, &self.incident, self.clock.as_ref())
        {
            log::warn!(
                "incident triggered: vehicle {:?} lane {} at x={:.1}",
                incident.vehicle_id,
                incident.lane,
                incident.location
            );
            self.incident = Some(incident);
        }
    }

    // points is a copy, never the internal ring.
    pub fn get_stats(&self) -> Stats {
        let snapshot = stats::snapshot(&self.vehicles, self.road_length);
        Stats {
            count: snapshot.count,
            avg_speed_kmh: snapshot.avg_speed_kmh,
            density_veh_km: snapshot.density_veh_km,
            flow_veh_h: snapshot.flow_veh_h,
            points: self.fd_ring.to_vec(),
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn road_length(&self) -> f32 {
        self.road_length
    }

    pub fn lane_count(&self) -> u8 {
        self.lane_count
    }

    pub fn incident(&self) -> Option<Incident> {
        self.incident
    }

    pub fn vehicle_count_by_type(&self) -> HashMap<VehicleType, usize> {
        let mut counts = HashMap::new();
        for vehicle in &self.vehicles {
            *counts.entry(vehicle.vehicle_type).or_insert(0) += 1;
        }
        counts
    }

    pub fn velocity_distribution(&self, buckets: usize) -> Vec<usize> {
        let buckets = buckets.max(1);
        let mut histogram = vec![0usize; buckets];
        if self.vehicles.is_empty() {
            return histogram;
        }

        let max_v = self
            .vehicles
            .iter()
            .map(|v| v.v)
            .fold(0.0f32, f32::max)
            .max(1.0);
        let bucket_width = max_v / buckets as f32;
        for vehicle in &self.vehicles {
            let index = ((vehicle.v / bucket_width) as usize).min(buckets - 1);
            histogram[index] += 1;
        }
        histogram
    }
}

fn sign(delta: f32) -> i8 {
    if delta > 0.0 {
        1
    } else if delta < 0.0 {
        -1
    } else {
        0
    }
}
