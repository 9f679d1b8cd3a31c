use anyhow::Result;
use log::info;
use std::time::{Duration, Instant};

use micro_traffic_core::{Model, SimulationConfig};

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting traffic core (console mode)");

    let config = match SimulationConfig::load_from_file("simulation.toml") {
        Ok(config) => config,
        Err(err) => {
            info!("no simulation.toml found ({err}), using defaults");
            SimulationConfig::default()
        }
    };
    info!(
        "inflow {} veh/h, truck ratio {:.2}, road length {} m",
        config.inflow_rate, config.truck_ratio, config.road_length
    );

    let mut model = Model::new(config.road_length);

    let simulation_duration = Duration::from_secs(60);
    let start_time = Instant::now();
    let mut last_report = Instant::now();
    let mut step_count: u64 = 0;

    info!(
        "running simulation for {}s...",
        simulation_duration.as_secs()
    );

    while start_time.elapsed() < simulation_duration {
        model.step(&config);
        step_count += 1;

        if last_report.elapsed() >= Duration::from_secs(1) {
            let stats = model.get_stats();
            info!(
                "step {}: {} vehicles, {:.1} km/h avg, {:.1} veh/km, {:.0} veh/h",
                step_count, stats.count, stats.avg_speed_kmh, stats.density_veh_km, stats.flow_veh_h
            );
            last_report = Instant::now();
        }

        std::thread::sleep(Duration::from_secs_f32(1.0 / 60.0));
    }

    let stats = model.get_stats();
    info!("simulation completed after {} steps", step_count);
    info!(
        "final: {} vehicles, {:.1} km/h avg, {} FD samples",
        stats.count,
        stats.avg_speed_kmh,
        stats.points.len()
    );

    Ok(())
}
