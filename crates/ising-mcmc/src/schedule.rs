use ising_core::errors::ErrorInfo;
use ising_core::IsingError;

use crate::config::TemperatureSchedule;

/// Upper bound on the number of temperatures a generated schedule may hold.
pub const MAX_SCHEDULE_LEN: usize = 1 << 20;

/// Expands a schedule into the ordered list of temperatures to visit.
///
/// Ranges follow half-open `arange` semantics: `ceil((stop - start) / step)`
/// points `start + k·step`. Positivity of the values is checked later by
/// [`SimulationParameters::new`](crate::SimulationParameters::new).
pub fn build_schedule(schedule: &TemperatureSchedule) -> Result<Vec<f64>, IsingError> {
    match schedule {
        TemperatureSchedule::Range { start, stop, step } => {
            if !(step.is_finite() && *step > 0.0) {
                return Err(IsingError::Config(
                    ErrorInfo::new("schedule-step", "range step must be finite and > 0")
                        .with_context("step", step.to_string()),
                ));
            }
            if !(start.is_finite() && stop.is_finite()) {
                return Err(IsingError::Config(
                    ErrorInfo::new("schedule-bounds", "range bounds must be finite")
                        .with_context("start", start.to_string())
                        .with_context("stop", stop.to_string()),
                ));
            }
            let span = ((stop - start) / step).ceil();
            if span <= 0.0 {
                return Ok(Vec::new());
            }
            let count = checked_len(span)?;
            Ok((0..count).map(|k| start + k as f64 * step).collect())
        }
        TemperatureSchedule::Geometric { base, ratio, count } => {
            if !(ratio.is_finite() && *ratio > 0.0) {
                return Err(IsingError::Config(
                    ErrorInfo::new("schedule-ratio", "geometric ratio must be finite and > 0")
                        .with_context("ratio", ratio.to_string()),
                ));
            }
            let count = checked_len(*count as f64)?;
            let mut temperatures = Vec::with_capacity(count);
            let mut temp = *base;
            for _ in 0..count {
                temperatures.push(temp);
                temp *= ratio;
            }
            Ok(temperatures)
        }
        TemperatureSchedule::Manual { temperatures } => Ok(temperatures.clone()),
    }
}

fn checked_len(points: f64) -> Result<usize, IsingError> {
    if points > MAX_SCHEDULE_LEN as f64 {
        return Err(IsingError::Config(
            ErrorInfo::new("schedule-too-long", "schedule exceeds the temperature limit")
                .with_context("points", points.to_string())
                .with_context("limit", MAX_SCHEDULE_LEN.to_string()),
        ));
    }
    Ok(points as usize)
}
