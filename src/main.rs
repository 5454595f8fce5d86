use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{info, warn};

use green_wave::simulation::{
    start_session, RoadNetwork, SessionStart, SignalPolicy, SignalTiming, SimConfig, SpeedRange,
    SpeedUpdatePolicy, Waypoint, DEFAULT_CYCLE_LENGTH, DEFAULT_GREEN_START,
    DEFAULT_INITIAL_SPEED_KMH, DEFAULT_PROXIMITY_M, DEFAULT_SPACING_M, DEFAULT_TRAIL_LENGTH,
    DEFAULT_YELLOW_START,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Every junction of degree four or more
    All,
    /// Junctions touching a major road
    Major,
    /// The fixed list of named intersections
    Named,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SpeedUpdateArg {
    EveryTick,
    OnChange,
}

#[derive(Parser)]
#[command(name = "green_wave")]
#[command(about = "Headless green-wave speed advisory simulation")]
struct Cli {
    #[arg(long, default_value_t = 30.7270, allow_negative_numbers = true)]
    start_lat: f64,

    #[arg(long, default_value_t = 76.7651, allow_negative_numbers = true)]
    start_lon: f64,

    #[arg(long, default_value_t = 30.7165, allow_negative_numbers = true)]
    end_lat: f64,

    #[arg(long, default_value_t = 76.7656, allow_negative_numbers = true)]
    end_lon: f64,

    /// Initial vehicle speed in km/h
    #[arg(long, default_value_t = DEFAULT_INITIAL_SPEED_KMH)]
    speed: f64,

    /// Maximum spacing between path points in meters
    #[arg(long, default_value_t = DEFAULT_SPACING_M)]
    spacing: f64,

    /// Distance below which a signal affects the vehicle, in meters
    #[arg(long, default_value_t = DEFAULT_PROXIMITY_M)]
    proximity: f64,

    #[arg(long, default_value_t = DEFAULT_CYCLE_LENGTH)]
    cycle_length: u32,

    #[arg(long, default_value_t = DEFAULT_YELLOW_START)]
    yellow_start: u32,

    #[arg(long, default_value_t = DEFAULT_GREEN_START)]
    green_start: u32,

    #[arg(long, default_value_t = 20)]
    min_speed: u32,

    #[arg(long, default_value_t = 100)]
    max_speed: u32,

    #[arg(long, default_value_t = 5)]
    speed_step: u32,

    /// Speed used when no candidate catches a green phase
    #[arg(long, default_value_t = 20.0)]
    fallback_speed: f64,

    #[arg(long, default_value_t = DEFAULT_TRAIL_LENGTH)]
    trail_length: usize,

    #[arg(long, value_enum, default_value = "all")]
    policy: PolicyArg,

    #[arg(long, value_enum, default_value = "every-tick")]
    speed_update: SpeedUpdateArg,

    /// Seed for the initial signal timers
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks even if the destination is not reached
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Junctions per side of the demo grid city
    #[arg(long, default_value = "8")]
    grid_size: usize,
}

impl Cli {
    fn config(&self) -> SimConfig {
        SimConfig {
            spacing_m: self.spacing,
            proximity_m: self.proximity,
            timing: SignalTiming {
                cycle_length: self.cycle_length,
                yellow_start: self.yellow_start,
                green_start: self.green_start,
            },
            speeds: SpeedRange {
                min_kmh: self.min_speed,
                max_kmh: self.max_speed,
                step_kmh: self.speed_step,
            },
            fallback_speed_kmh: self.fallback_speed,
            initial_speed_kmh: self.speed,
            speed_update: match self.speed_update {
                SpeedUpdateArg::EveryTick => SpeedUpdatePolicy::EveryTick,
                SpeedUpdateArg::OnChange => SpeedUpdatePolicy::OnChange,
            },
            trail_length: self.trail_length,
            signal_policy: match self.policy {
                PolicyArg::All => SignalPolicy::AllJunctions,
                PolicyArg::Major => SignalPolicy::MajorJunctions,
                PolicyArg::Named => SignalPolicy::NamedIntersections,
            },
            seed: self.seed,
            ..SimConfig::default()
        }
    }
}

/// South-west corner of the demo grid
const GRID_ORIGIN: Waypoint = Waypoint {
    lat: 30.7150,
    lon: 76.7600,
};

/// Block size of the demo grid in degrees (about 200 m)
const GRID_BLOCK_DEG: f64 = 0.002;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let start = Waypoint::new(cli.start_lat, cli.start_lon);
    let end = Waypoint::new(cli.end_lat, cli.end_lon);

    let network = RoadNetwork::grid_city(GRID_ORIGIN, cli.grid_size, GRID_BLOCK_DEG);
    info!(
        "Road network: {} junctions, {} roads",
        network.junction_count(),
        network.road_count()
    );

    let (controller, mut state) = match start_session(&network, &network, start, end, cli.config())? {
        SessionStart::Started { controller, state } => (controller, state),
        SessionStart::Unreachable => {
            warn!("Destination unreachable from {}; nothing to simulate", start);
            return Ok(());
        }
    };

    let mut waited = 0u64;
    while !state.is_completed() && state.tick < cli.ticks {
        let (next, snapshot) = controller.tick(state);
        state = next;
        if snapshot.waiting {
            waited += 1;
        }

        info!(
            "t={:>4}s idx={:>3} pos={} speed={:>5.1} km/h signal={}{} | {}",
            snapshot.tick,
            snapshot.index,
            snapshot.position,
            snapshot.speed_kmh,
            snapshot.phase_label(),
            snapshot
                .signal
                .as_ref()
                .map(|reading| format!(
                    " ({:.0} m, {} s left)",
                    reading.distance_m, reading.time_remaining_s
                ))
                .unwrap_or_default(),
            snapshot.advisory
        );
    }

    let snapshot = state.snapshot();
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks: {}", state.tick);
    info!("Path points: {}", controller.path().len());
    info!("Path length: {:.0} m", controller.path().length());
    info!("Signals: {}", state.signals.len());
    info!("Ticks waiting: {}", waited);
    info!("Final position: {}", snapshot.position);
    info!("Destination reached: {}", snapshot.completed);

    Ok(())
}
