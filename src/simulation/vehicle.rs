//! Vehicle state for one simulation session

use std::collections::VecDeque;

use super::types::Waypoint;

/// Where the vehicle is in its wait/move cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Moving,
    /// Held at a red signal
    Waiting,
    /// Reached the destination; terminal
    Completed,
}

/// The vehicle following the path
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    /// Index into the path, never decreases
    pub index: usize,
    /// Current speed in km/h
    pub speed_kmh: f64,
    pub state: MotionState,
    /// Most recent speed advice, used by the on-change update policy
    pub last_advice_kmh: Option<f64>,
    trail: VecDeque<Waypoint>,
    trail_length: usize,
}

impl VehicleState {
    pub fn new(start: Waypoint, speed_kmh: f64, trail_length: usize) -> Self {
        let mut trail = VecDeque::with_capacity(trail_length);
        trail.push_back(start);
        Self {
            index: 0,
            speed_kmh,
            state: MotionState::Moving,
            last_advice_kmh: None,
            trail,
            trail_length,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.state == MotionState::Waiting
    }

    pub fn is_completed(&self) -> bool {
        self.state == MotionState::Completed
    }

    pub fn trail(&self) -> &VecDeque<Waypoint> {
        &self.trail
    }

    /// Record a visited position, dropping the oldest beyond the bound
    ///
    /// A position equal to the newest entry is not repeated, so waiting at a
    /// signal leaves the trail untouched.
    pub fn record_position(&mut self, position: Waypoint) {
        if self.trail.back() == Some(&position) {
            return;
        }
        self.trail.push_back(position);
        while self.trail.len() > self.trail_length {
            self.trail.pop_front();
        }
    }
}
