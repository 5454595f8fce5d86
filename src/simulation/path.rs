//! Route densification
//!
//! Turns the sparse waypoints handed over by a routing provider into an
//! evenly spaced [`Path`] the motion engine can step along.

use log::{debug, warn};

use super::types::{Path, Waypoint};

/// Densifies raw routes into evenly spaced points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathInterpolator {
    /// Maximum distance between consecutive output points (m)
    pub spacing_m: f64,
    /// Cap on points generated for one consecutive pair
    pub max_points_per_segment: usize,
    /// Cap on the total number of output points
    pub max_path_points: usize,
}

impl PathInterpolator {
    pub fn new(spacing_m: f64, max_points_per_segment: usize, max_path_points: usize) -> Self {
        Self {
            spacing_m,
            max_points_per_segment,
            max_path_points,
        }
    }

    /// Build the densified path for a raw route
    ///
    /// A pair closer than the spacing is kept as is. Longer pairs are split
    /// into `ceil(distance / spacing)` equal parts (capped), so consecutive
    /// points stay within the spacing unless the cap kicks in. A pair that
    /// would overflow the total cap is dropped together with everything
    /// after it.
    pub fn interpolate(&self, raw: &[Waypoint]) -> Path {
        let Some(first) = raw.first() else {
            return Path::default();
        };

        let mut points = vec![*first];

        for (segment, pair) in raw.windows(2).enumerate() {
            let (p1, p2) = (pair[0], pair[1]);
            let distance = p1.distance(&p2);

            let parts = if distance < self.spacing_m {
                1
            } else {
                ((distance / self.spacing_m).ceil() as usize).clamp(1, self.max_points_per_segment)
            };

            if points.len() + parts > self.max_path_points {
                warn!(
                    "Route truncated at segment {} of {} ({} points)",
                    segment,
                    raw.len() - 1,
                    points.len()
                );
                break;
            }

            // The first point of each pair is already the last point emitted
            points.extend((1..parts).map(|step| p1.lerp(&p2, step as f64 / parts as f64)));
            points.push(p2);
        }

        debug!(
            "Interpolated {} raw waypoints into {} path points",
            raw.len(),
            points.len()
        );

        Path::new(points)
    }
}
