//! Session configuration
//!
//! Every tunable of a simulation session lives in [`SimConfig`]. The defaults
//! are the single supported policy; alternatives are explicit fields rather
//! than separate code paths.

use anyhow::{ensure, Result};

use super::types::{
    DEFAULT_CYCLE_LENGTH, DEFAULT_GREEN_START, DEFAULT_INITIAL_SPEED_KMH,
    DEFAULT_MAX_PATH_POINTS, DEFAULT_MAX_POINTS_PER_SEGMENT, DEFAULT_PROXIMITY_M,
    DEFAULT_SPACING_M, DEFAULT_TRAIL_LENGTH, DEFAULT_YELLOW_START,
};

/// How signals are placed on the road graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalPolicy {
    /// Every junction whose degree reaches the minimum
    #[default]
    AllJunctions,
    /// Only those junctions that also touch a major road
    MajorJunctions,
    /// The static list of named intersections, ignoring the graph
    NamedIntersections,
}

/// When the advised speed is written to the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedUpdatePolicy {
    /// Overwrite the vehicle speed on every tick a signal is in range
    #[default]
    EveryTick,
    /// Only write when the advice differs from the previous advice
    OnChange,
}

/// Timing shared by all signals of a session
///
/// Phases partition `[0, cycle_length)`:
/// `[0, yellow_start)` is red, `[yellow_start, green_start)` yellow and
/// `[green_start, cycle_length)` green.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalTiming {
    pub cycle_length: u32,
    pub yellow_start: u32,
    pub green_start: u32,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            yellow_start: DEFAULT_YELLOW_START,
            green_start: DEFAULT_GREEN_START,
        }
    }
}

impl SignalTiming {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cycle_length > 0, "cycle length must be positive");
        ensure!(
            self.yellow_start > 0,
            "yellow start must leave a non-empty red interval"
        );
        ensure!(
            self.yellow_start <= self.green_start,
            "yellow start ({}) must not be after green start ({})",
            self.yellow_start,
            self.green_start
        );
        ensure!(
            self.green_start < self.cycle_length,
            "green start ({}) must fall inside the cycle ({})",
            self.green_start,
            self.cycle_length
        );
        Ok(())
    }
}

/// Discrete speed set searched by the advisor, in km/h
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRange {
    pub min_kmh: u32,
    pub max_kmh: u32,
    pub step_kmh: u32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min_kmh: 20,
            max_kmh: 100,
            step_kmh: 5,
        }
    }
}

impl SpeedRange {
    /// Candidate speeds in ascending order
    pub fn candidates(&self) -> impl Iterator<Item = u32> {
        (self.min_kmh..=self.max_kmh).step_by(self.step_kmh.max(1) as usize)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_kmh > 0, "minimum candidate speed must be positive");
        ensure!(self.step_kmh > 0, "speed step must be positive");
        ensure!(
            self.min_kmh <= self.max_kmh,
            "speed range {}..={} is empty",
            self.min_kmh,
            self.max_kmh
        );
        Ok(())
    }
}

/// Configuration of one simulation session
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Maximum distance between interpolated path points (m)
    pub spacing_m: f64,
    /// Cap on points generated for one route segment
    pub max_points_per_segment: usize,
    /// Cap on the total number of path points
    pub max_path_points: usize,
    /// Signals at or beyond this distance are ignored (m)
    pub proximity_m: f64,
    pub timing: SignalTiming,
    pub speeds: SpeedRange,
    /// Speed returned when no candidate reaches a green phase (km/h)
    pub fallback_speed_kmh: f64,
    /// Vehicle speed at session start (km/h)
    pub initial_speed_kmh: f64,
    pub speed_update: SpeedUpdatePolicy,
    /// Number of recent positions kept in the trail
    pub trail_length: usize,
    pub signal_policy: SignalPolicy,
    /// Minimum junction degree for a signal
    pub min_signal_degree: usize,
    /// Seed for initial signal timers; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spacing_m: DEFAULT_SPACING_M,
            max_points_per_segment: DEFAULT_MAX_POINTS_PER_SEGMENT,
            max_path_points: DEFAULT_MAX_PATH_POINTS,
            proximity_m: DEFAULT_PROXIMITY_M,
            timing: SignalTiming::default(),
            speeds: SpeedRange::default(),
            fallback_speed_kmh: 20.0,
            initial_speed_kmh: DEFAULT_INITIAL_SPEED_KMH,
            speed_update: SpeedUpdatePolicy::default(),
            trail_length: DEFAULT_TRAIL_LENGTH,
            signal_policy: SignalPolicy::default(),
            min_signal_degree: 4,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Default configuration with a fixed seed for reproducible sessions
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Checks every field once, before a session starts
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.spacing_m.is_finite() && self.spacing_m > 0.0,
            "interpolation spacing must be positive, got {}",
            self.spacing_m
        );
        ensure!(
            self.max_points_per_segment >= 1,
            "segment point cap must be at least 1"
        );
        ensure!(
            self.max_path_points > self.max_points_per_segment,
            "path point cap ({}) must exceed the segment cap ({})",
            self.max_path_points,
            self.max_points_per_segment
        );
        ensure!(
            self.proximity_m.is_finite() && self.proximity_m > 0.0,
            "proximity threshold must be positive, got {}",
            self.proximity_m
        );
        self.timing.validate()?;
        self.speeds.validate()?;
        ensure!(
            self.fallback_speed_kmh.is_finite() && self.fallback_speed_kmh > 0.0,
            "fallback speed must be positive"
        );
        ensure!(
            self.initial_speed_kmh.is_finite() && self.initial_speed_kmh >= 0.0,
            "initial speed must not be negative"
        );
        ensure!(self.trail_length >= 1, "trail must keep at least one position");
        Ok(())
    }
}
