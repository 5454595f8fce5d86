//! Traffic signals and the registry that owns them
//!
//! Every signal runs its own fixed-cycle timer. The phase is derived from
//! the timer alone, so signals evolve independently of the vehicle.

use log::{debug, warn};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{SignalPolicy, SignalTiming};
use super::providers::Junction;
use super::types::Waypoint;

/// The five junctions used when no road graph is available
pub const NAMED_INTERSECTIONS: [(&str, f64, f64); 5] = [
    ("ISBT Sector 43", 30.7165, 76.7656),
    ("Madhya Marg & Jan Marg", 30.7415, 76.7680),
    ("Sector 17 Plaza", 30.7399, 76.7821),
    ("PGI Chowk", 30.7625, 76.7662),
    ("Sector 35", 30.7270, 76.7651),
];

/// Phase shown by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalPhase {
    Red,
    Yellow,
    Green,
}

impl SignalPhase {
    /// Phase for a timer value under the given timing
    pub fn from_timer(timer: f64, timing: &SignalTiming) -> Self {
        if timer < timing.yellow_start as f64 {
            SignalPhase::Red
        } else if timer < timing.green_start as f64 {
            SignalPhase::Yellow
        } else {
            SignalPhase::Green
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalPhase::Red => "Red",
            SignalPhase::Yellow => "Yellow",
            SignalPhase::Green => "Green",
        }
    }
}

impl std::fmt::Display for SignalPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed-cycle traffic light
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub location: Waypoint,
    pub name: Option<String>,
    /// Seconds into the cycle, always in `[0, cycle_length)`
    timer: u32,
    timing: SignalTiming,
}

impl Signal {
    /// Creates a signal; the timer is wrapped into the cycle
    pub fn new(location: Waypoint, timer: u32, timing: SignalTiming) -> Self {
        Self {
            location,
            name: None,
            timer: timer % timing.cycle_length,
            timing,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn timing(&self) -> &SignalTiming {
        &self.timing
    }

    pub fn phase(&self) -> SignalPhase {
        SignalPhase::from_timer(self.timer as f64, &self.timing)
    }

    /// Seconds until the current phase ends
    pub fn time_remaining(&self) -> u32 {
        let boundary = match self.phase() {
            SignalPhase::Red => self.timing.yellow_start,
            SignalPhase::Yellow => self.timing.green_start,
            SignalPhase::Green => self.timing.cycle_length,
        };
        boundary - self.timer
    }

    /// Advance the timer by one second
    pub fn tick(&mut self) {
        self.timer = (self.timer + 1) % self.timing.cycle_length;
    }
}

/// The nearest relevant signal for a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestSignal<'a> {
    pub index: usize,
    pub signal: &'a Signal,
    pub distance_m: f64,
}

/// Owns every signal of a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalRegistry {
    signals: Vec<Signal>,
}

impl SignalRegistry {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self { signals }
    }

    /// Build signals for the selected junctions with random initial timers
    ///
    /// `seed` makes the timers reproducible; without it the thread RNG is used.
    pub fn from_junctions(
        junctions: &[Junction],
        policy: SignalPolicy,
        min_degree: usize,
        timing: SignalTiming,
        seed: Option<u64>,
    ) -> Self {
        let locations: Vec<(Waypoint, Option<String>)> = match policy {
            SignalPolicy::NamedIntersections => NAMED_INTERSECTIONS
                .iter()
                .map(|(name, lat, lon)| (Waypoint::new(*lat, *lon), Some(name.to_string())))
                .collect(),
            SignalPolicy::AllJunctions | SignalPolicy::MajorJunctions => junctions
                .iter()
                .filter(|junction| junction.degree >= min_degree)
                .filter(|junction| {
                    policy == SignalPolicy::AllJunctions || junction.touches_major_road()
                })
                .map(|junction| (junction.location, junction.name.clone()))
                .collect(),
        };

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let signals: Vec<Signal> = locations
            .into_iter()
            .map(|(location, name)| {
                let timer = rng.random_range(0..timing.cycle_length);
                Signal {
                    location,
                    name,
                    timer,
                    timing,
                }
            })
            .collect();

        if signals.is_empty() {
            warn!("No junction qualifies for a signal under {:?}", policy);
        } else {
            debug!("Placed {} signals under {:?}", signals.len(), policy);
        }

        Self { signals }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn get(&self, index: usize) -> Option<&Signal> {
        self.signals.get(index)
    }

    /// Closest signal strictly within `threshold_m` of `position`
    ///
    /// Ties go to the signal registered first.
    pub fn nearest(&self, position: &Waypoint, threshold_m: f64) -> Option<NearestSignal<'_>> {
        self.signals
            .iter()
            .enumerate()
            .map(|(index, signal)| (index, signal, signal.location.distance(position)))
            .filter(|(_, _, distance)| *distance < threshold_m)
            .min_by_key(|(_, _, distance)| OrderedFloat(*distance))
            .map(|(index, signal, distance_m)| NearestSignal {
                index,
                signal,
                distance_m,
            })
    }

    /// Advance every timer by one second
    pub fn tick(&mut self) {
        for signal in &mut self.signals {
            signal.tick();
        }
    }
}
