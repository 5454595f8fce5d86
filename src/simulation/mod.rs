//! Signal-aware vehicle simulation
//!
//! Moves a vehicle along a densified route one second at a time, holds it at
//! red signals and advises a speed that reaches the next signal on green.
//! Routing and road data come in through the traits in [`providers`].

mod advisor;
mod config;
mod controller;
mod motion;
mod path;
pub mod providers;
mod road_network;
mod session;
mod signal;
mod types;
mod vehicle;

pub use advisor::{SpeedAdvice, SpeedAdvisor};
pub use config::{SignalPolicy, SignalTiming, SimConfig, SpeedRange, SpeedUpdatePolicy};
pub use controller::{SignalReading, SimulationController, SimulationState, Snapshot};
pub use motion::{Advance, MotionEngine};
pub use path::PathInterpolator;
pub use providers::{Junction, RoadClass, RoadGraphProvider, RoutingProvider};
pub use road_network::{RoadEdge, RoadNetwork, RoadNode};
pub use session::{start_session, SessionStart};
pub use signal::{NearestSignal, Signal, SignalPhase, SignalRegistry, NAMED_INTERSECTIONS};
pub use types::{
    Path, Waypoint, DEFAULT_CYCLE_LENGTH, DEFAULT_GREEN_START, DEFAULT_INITIAL_SPEED_KMH,
    DEFAULT_MAX_PATH_POINTS, DEFAULT_MAX_POINTS_PER_SEGMENT, DEFAULT_PROXIMITY_M,
    DEFAULT_SPACING_M, DEFAULT_TRAIL_LENGTH, DEFAULT_YELLOW_START, EARTH_RADIUS_M, KMH_PER_MS,
};
pub use vehicle::{MotionState, VehicleState};
