//! Hydrostatic pressure model.
//!
//! Converts a fluid column height into the pressure it exerts at the base:
//! `p = h × g × ρ`.  Heights arrive in centimetres and the result is
//! reported in kilopascals, so a single constant divisor folds both unit
//! conversions (cm → m, Pa → kPa).

/// Standard gravitational acceleration (m/s²).
pub const GRAVITY_M_S2: f32 = 9.81;
/// Density of fresh water (kg/m³).
pub const WATER_DENSITY_KG_M3: f32 = 1000.0;
/// cm → m (÷100) and Pa → kPa (÷1000).
pub const CM_PA_TO_KPA_DIVISOR: f32 = 100_000.0;

/// Pressure (kPa) at the bottom of a water column `level_cm` tall.
///
/// Total and branch-free: zero yields zero, large yields large.
pub fn pressure_kpa(level_cm: f32) -> f32 {
    level_cm * GRAVITY_M_S2 * WATER_DENSITY_KG_M3 / CM_PA_TO_KPA_DIVISOR
}
