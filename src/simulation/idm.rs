pub const DELTA: f32 = 4.0;
pub const COMFORT_DECEL: f32 = 2.0;
pub const JAM_DISTANCE: f32 = 2.0;
// Keeps the interaction term finite when the geometric gap collapses to zero or goes negative.
const GAP_FLOOR: f32 = 0.1;

// Noise is added by the caller, not here, so MOBIL's internal evaluations stay deterministic.
pub fn idm_acceleration(
    v: f32,
    leader_v: Option<f32>,
    gap: Option<f32>,
    v0: f32,
    a_max: f32,
    t: f32,
) -> f32 {
    let a_free = a_max * (1.0 - (v / v0).powf(DELTA));

    let (leader_v, gap) = match (leader_v, gap) {
        (Some(lv), Some(g)) => (lv, g),
        _ => return a_free,
    };

    let delta_v = v - leader_v;
    let s_star =
        JAM_DISTANCE + v * t + (v * delta_v) / (2.0 * (a_max * COMFORT_DECEL).sqrt());
    let a_int = -a_max * (s_star / gap.max(GAP_FLOOR)).powi(2);

    a_free + a_int
}
