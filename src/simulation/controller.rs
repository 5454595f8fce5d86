//! Per-tick orchestration of vehicle and signals
//!
//! [`SimulationController`] holds what stays fixed for a session (path,
//! configuration, initial signals). Everything that changes lives in a
//! [`SimulationState`] value the caller passes into each tick and keeps for
//! the next one.

use anyhow::{ensure, Result};
use log::{debug, info};

use super::advisor::{SpeedAdvice, SpeedAdvisor};
use super::config::{SimConfig, SpeedUpdatePolicy};
use super::motion::MotionEngine;
use super::signal::{SignalPhase, SignalRegistry};
use super::types::{Path, Waypoint};
use super::vehicle::{MotionState, VehicleState};

/// What the vehicle sees of its nearest signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalReading {
    pub name: Option<String>,
    pub phase: SignalPhase,
    pub distance_m: f64,
    /// Seconds left in the current phase
    pub time_remaining_s: u32,
    pub timer: u32,
    /// Phase on arrival at the current speed
    pub predicted_phase: Option<SignalPhase>,
}

/// Immutable view of a session after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub index: usize,
    pub position: Waypoint,
    pub speed_kmh: f64,
    pub state: MotionState,
    pub waiting: bool,
    pub completed: bool,
    /// `None` when no signal is within the proximity threshold
    pub signal: Option<SignalReading>,
    pub advice: Option<SpeedAdvice>,
    pub trail: Vec<Waypoint>,
    /// Human-readable advice for the driver
    pub advisory: String,
}

impl Snapshot {
    /// Phase of the nearest signal, or "None" without one in range
    pub fn phase_label(&self) -> &'static str {
        self.signal
            .as_ref()
            .map(|reading| reading.phase.label())
            .unwrap_or("None")
    }
}

/// Mutable state of one session
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub vehicle: VehicleState,
    pub signals: SignalRegistry,
    /// Ticks processed so far
    pub tick: u64,
    snapshot: Snapshot,
}

impl SimulationState {
    /// The latest snapshot, also available before the first tick
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_completed(&self) -> bool {
        self.vehicle.is_completed()
    }
}

/// Runs the wait/move state machine one tick at a time
#[derive(Debug, Clone)]
pub struct SimulationController {
    path: Path,
    config: SimConfig,
    advisor: SpeedAdvisor,
    engine: MotionEngine,
    initial_signals: SignalRegistry,
}

impl SimulationController {
    pub fn new(path: Path, signals: SignalRegistry, config: SimConfig) -> Result<Self> {
        config.validate()?;
        ensure!(!path.is_empty(), "cannot simulate an empty path");

        let advisor = SpeedAdvisor::new(config.speeds, config.timing, config.fallback_speed_kmh);

        Ok(Self {
            path,
            config,
            advisor,
            engine: MotionEngine,
            initial_signals: signals,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn advisor(&self) -> &SpeedAdvisor {
        &self.advisor
    }

    /// Fresh state at the start of the path
    ///
    /// A path shorter than two points starts out completed.
    pub fn start(&self) -> SimulationState {
        let start = self.path.points()[0];
        let mut vehicle = VehicleState::new(
            start,
            self.config.initial_speed_kmh,
            self.config.trail_length,
        );
        if self.path.len() < 2 {
            vehicle.state = MotionState::Completed;
        }

        let signals = self.initial_signals.clone();
        let (signal, advice) = self.read_signal(&signals, &start, vehicle.speed_kmh);
        let snapshot = self.build_snapshot(0, &vehicle, signal, advice);

        SimulationState {
            vehicle,
            signals,
            tick: 0,
            snapshot,
        }
    }

    /// Discard `state` and start over with the initial signal timers
    pub fn reset(&self, state: SimulationState) -> SimulationState {
        debug!("Resetting session at tick {}", state.tick);
        self.start()
    }

    /// Advance the session by one second
    pub fn tick(&self, mut state: SimulationState) -> (SimulationState, Snapshot) {
        if state.vehicle.is_completed() {
            let snapshot = state.snapshot.clone();
            return (state, snapshot);
        }

        let position = self.position(state.vehicle.index);
        let (mut reading, advice) =
            self.read_signal(&state.signals, &position, state.vehicle.speed_kmh);

        match reading.as_mut().zip(advice) {
            Some((reading, advised)) => {
                match (state.vehicle.state, reading.phase) {
                    (MotionState::Moving, SignalPhase::Red) => {
                        debug!(
                            "Tick {}: stopping for red signal {:.0} m away",
                            state.tick, reading.distance_m
                        );
                        state.vehicle.state = MotionState::Waiting;
                    }
                    // Yellow counts as go
                    (MotionState::Waiting, SignalPhase::Yellow | SignalPhase::Green) => {
                        debug!(
                            "Tick {}: signal turned {}, moving on",
                            state.tick, reading.phase
                        );
                        state.vehicle.state = MotionState::Moving;
                    }
                    _ => {}
                }

                self.apply_advice(&mut state.vehicle, advised);
                reading.predicted_phase = self.advisor.predict_arrival(
                    reading.distance_m,
                    reading.timer,
                    state.vehicle.speed_kmh,
                );
            }
            None => {
                if state.vehicle.is_waiting() {
                    state.vehicle.state = MotionState::Moving;
                }
            }
        }

        if !state.vehicle.is_waiting() {
            let step = self.engine.advance(
                state.vehicle.index,
                &self.path,
                state.vehicle.speed_kmh,
                false,
            );
            state.vehicle.index = step.index;
            if step.completed {
                state.vehicle.state = MotionState::Completed;
            }
        }

        state.signals.tick();
        state
            .vehicle
            .record_position(self.position(state.vehicle.index));
        state.tick += 1;

        if state.vehicle.is_completed() {
            info!("Destination reached after {} ticks", state.tick);
        }

        state.snapshot = self.build_snapshot(state.tick, &state.vehicle, reading, advice);
        let snapshot = state.snapshot.clone();
        (state, snapshot)
    }

    fn position(&self, index: usize) -> Waypoint {
        let index = index.min(self.path.len() - 1);
        self.path.points()[index]
    }

    fn apply_advice(&self, vehicle: &mut VehicleState, advice: SpeedAdvice) {
        let speed = advice.speed_kmh();
        match self.config.speed_update {
            SpeedUpdatePolicy::EveryTick => vehicle.speed_kmh = speed,
            SpeedUpdatePolicy::OnChange => {
                if vehicle.last_advice_kmh != Some(speed) {
                    vehicle.speed_kmh = speed;
                }
            }
        }
        vehicle.last_advice_kmh = Some(speed);
    }

    /// Reading and advice for a position without touching any state
    fn read_signal(
        &self,
        signals: &SignalRegistry,
        position: &Waypoint,
        speed_kmh: f64,
    ) -> (Option<SignalReading>, Option<SpeedAdvice>) {
        match signals.nearest(position, self.config.proximity_m) {
            Some(nearest) => {
                let signal = nearest.signal;
                let reading = SignalReading {
                    name: signal.name.clone(),
                    phase: signal.phase(),
                    distance_m: nearest.distance_m,
                    time_remaining_s: signal.time_remaining(),
                    timer: signal.timer(),
                    predicted_phase: self.advisor.predict_arrival(
                        nearest.distance_m,
                        signal.timer(),
                        speed_kmh,
                    ),
                };
                let advice = self.advisor.advise(nearest.distance_m, signal.timer());
                (Some(reading), Some(advice))
            }
            None => (None, None),
        }
    }

    fn build_snapshot(
        &self,
        tick: u64,
        vehicle: &VehicleState,
        signal: Option<SignalReading>,
        advice: Option<SpeedAdvice>,
    ) -> Snapshot {
        let advisory = advisory_text(vehicle.state, signal.as_ref(), advice);
        Snapshot {
            tick,
            index: vehicle.index,
            position: self.position(vehicle.index),
            speed_kmh: vehicle.speed_kmh,
            state: vehicle.state,
            waiting: vehicle.is_waiting(),
            completed: vehicle.is_completed(),
            signal,
            advice,
            trail: vehicle.trail().iter().copied().collect(),
            advisory,
        }
    }
}

fn advisory_text(
    state: MotionState,
    signal: Option<&SignalReading>,
    advice: Option<SpeedAdvice>,
) -> String {
    match (state, signal, advice) {
        (MotionState::Completed, _, _) => "Destination reached".to_string(),
        (MotionState::Waiting, _, _) => "Red light ahead: wait".to_string(),
        (_, None, _) | (_, _, None) => "No signal nearby".to_string(),
        (_, Some(_), Some(SpeedAdvice::CatchGreen(speed))) => {
            format!("Adjust speed to {:.0} km/h to catch the green", speed)
        }
        (_, Some(_), Some(SpeedAdvice::Fallback(_))) => {
            "No optimal speed found: slow down or wait".to_string()
        }
    }
}
