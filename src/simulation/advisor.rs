//! Green-wave speed advice
//!
//! A bounded linear search over a small discrete speed set; cheap enough to
//! run on every tick.

use super::config::{SignalTiming, SpeedRange};
use super::signal::SignalPhase;
use super::types::KMH_PER_MS;

/// Outcome of a speed search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedAdvice {
    /// The slowest candidate that arrives during green (km/h)
    CatchGreen(f64),
    /// No candidate arrives during green; the minimum safe speed (km/h)
    Fallback(f64),
}

impl SpeedAdvice {
    pub fn speed_kmh(&self) -> f64 {
        match self {
            SpeedAdvice::CatchGreen(speed) | SpeedAdvice::Fallback(speed) => *speed,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SpeedAdvice::Fallback(_))
    }
}

/// Searches the candidate speeds for one that meets a green phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedAdvisor {
    pub speeds: SpeedRange,
    pub timing: SignalTiming,
    pub fallback_speed_kmh: f64,
}

impl SpeedAdvisor {
    pub fn new(speeds: SpeedRange, timing: SignalTiming, fallback_speed_kmh: f64) -> Self {
        Self {
            speeds,
            timing,
            fallback_speed_kmh,
        }
    }

    /// Cycle position when a vehicle at `speed_kmh` covers `distance_m`
    pub fn arrival_timer(&self, distance_m: f64, timer: u32, speed_kmh: f64) -> f64 {
        let eta = distance_m / (speed_kmh / KMH_PER_MS);
        (timer as f64 + eta).rem_euclid(self.timing.cycle_length as f64)
    }

    /// Phase the signal will show on arrival, `None` for a stopped vehicle
    pub fn predict_arrival(&self, distance_m: f64, timer: u32, speed_kmh: f64) -> Option<SignalPhase> {
        if speed_kmh <= 0.0 {
            return None;
        }
        let arrival = self.arrival_timer(distance_m, timer, speed_kmh);
        Some(SignalPhase::from_timer(arrival, &self.timing))
    }

    /// Slowest candidate speed that arrives at or after the green start
    pub fn advise(&self, distance_m: f64, timer: u32) -> SpeedAdvice {
        let green_start = self.timing.green_start as f64;

        self.speeds
            .candidates()
            .map(f64::from)
            .find(|speed| self.arrival_timer(distance_m, timer, *speed) >= green_start)
            .map(SpeedAdvice::CatchGreen)
            .unwrap_or(SpeedAdvice::Fallback(self.fallback_speed_kmh))
    }
}
