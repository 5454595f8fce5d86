//! Core types for the signal simulation
//!
//! Geographic coordinates, the densified route and the shared defaults.

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Conversion factor between km/h and m/s
pub const KMH_PER_MS: f64 = 3.6;

/// Default spacing between interpolated path points in meters
pub const DEFAULT_SPACING_M: f64 = 15.0;

/// Default cap on points produced for a single route segment
pub const DEFAULT_MAX_POINTS_PER_SEGMENT: usize = 50;

/// Default cap on the total number of path points
pub const DEFAULT_MAX_PATH_POINTS: usize = 300;

/// Default distance below which a signal is relevant to the vehicle
pub const DEFAULT_PROXIMITY_M: f64 = 50.0;

/// Default signal cycle length in seconds
pub const DEFAULT_CYCLE_LENGTH: u32 = 60;

/// Default timer value at which a signal turns yellow
pub const DEFAULT_YELLOW_START: u32 = 30;

/// Default timer value at which a signal turns green
pub const DEFAULT_GREEN_START: u32 = 35;

/// Default number of recent positions kept in the trail
pub const DEFAULT_TRAIL_LENGTH: usize = 5;

/// Default vehicle speed at session start (km/h)
pub const DEFAULT_INITIAL_SPEED_KMH: f64 = 40.0;

/// A single (latitude, longitude) coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance(&self, other: &Waypoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }

    /// Planar interpolation of latitude and longitude.
    /// Good enough at city scale, not a geodesic slerp.
    pub fn lerp(&self, other: &Waypoint, t: f64) -> Waypoint {
        Waypoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// The immutable, densified route followed by the vehicle
///
/// Index 0 is the start, the last index is the destination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<Waypoint>,
}

impl Path {
    pub fn new(points: Vec<Waypoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    /// Index of the destination, `None` for an empty path
    pub fn last_index(&self) -> Option<usize> {
        self.points.len().checked_sub(1)
    }

    /// Total length along the path in meters
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}
