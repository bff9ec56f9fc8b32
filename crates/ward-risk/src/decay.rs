//! Exponential half-life decay.

/// Down-weight an event by age: `0.5 ^ (age_days / half_life_days)`.
///
/// Equal to 1 at age 0, halves every `half_life_days`, and approaches 0 as
/// age grows. Negative ages (events dated after the as-of date) clamp to 0
/// so a future-dated record never amplifies a score.
#[must_use]
pub fn decay(age_days: i64, half_life_days: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let age = age_days.max(0) as f64;
    0.5_f64.powf(age / half_life_days)
}
