//! Session setup
//!
//! Data-availability problems (no route, no signals) are detected here, once,
//! so the tick itself never fails.

use anyhow::{Context, Result};
use log::{info, warn};

use super::config::SimConfig;
use super::controller::{SimulationController, SimulationState};
use super::path::PathInterpolator;
use super::providers::{RoadGraphProvider, RoutingProvider};
use super::signal::SignalRegistry;
use super::types::Waypoint;

/// Outcome of starting a session
#[derive(Debug, Clone)]
pub enum SessionStart {
    /// Ready to tick
    Started {
        controller: SimulationController,
        state: SimulationState,
    },
    /// The routing provider found no path; nothing was started
    Unreachable,
}

/// Route from `start` to `end` and prepare a session
///
/// Returns an error only for an invalid configuration.
pub fn start_session(
    routing: &impl RoutingProvider,
    road_graph: &impl RoadGraphProvider,
    start: Waypoint,
    end: Waypoint,
    config: SimConfig,
) -> Result<SessionStart> {
    config.validate().context("Invalid simulation configuration")?;

    let raw = match routing.route(start, end) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            warn!("No route from {} to {}", start, end);
            return Ok(SessionStart::Unreachable);
        }
    };

    let interpolator = PathInterpolator::new(
        config.spacing_m,
        config.max_points_per_segment,
        config.max_path_points,
    );
    let path = interpolator.interpolate(&raw);

    let signals = SignalRegistry::from_junctions(
        &road_graph.junctions(),
        config.signal_policy,
        config.min_signal_degree,
        config.timing,
        config.seed,
    );
    if signals.is_empty() {
        warn!("Running without signals; the vehicle will never wait");
    }

    info!(
        "Session ready: {} route waypoints, {} path points ({:.0} m), {} signals",
        raw.len(),
        path.len(),
        path.length(),
        signals.len()
    );

    let controller = SimulationController::new(path, signals, config)?;
    let state = controller.start();

    Ok(SessionStart::Started { controller, state })
}
