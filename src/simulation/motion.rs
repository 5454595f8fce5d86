//! Movement of the vehicle along the path

use super::types::{Path, KMH_PER_MS};

/// Result of advancing for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub index: usize,
    /// The destination was reached on this tick
    pub completed: bool,
}

/// Steps the path index by the distance covered in one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionEngine;

impl MotionEngine {
    /// Advance from `index` at `speed_kmh` for one second
    ///
    /// Whole segments are consumed while their summed length fits the travel
    /// budget. A moving vehicle always gains at least one index, even when the
    /// budget is shorter than the next segment. The result never passes the
    /// last index.
    pub fn advance(&self, index: usize, path: &Path, speed_kmh: f64, waiting: bool) -> Advance {
        let Some(last) = path.last_index() else {
            return Advance {
                index: 0,
                completed: true,
            };
        };

        let index = index.min(last);
        if waiting {
            return Advance {
                index,
                completed: index == last,
            };
        }
        if index == last {
            return Advance {
                index,
                completed: true,
            };
        }

        let budget = speed_kmh.max(0.0) / KMH_PER_MS;
        let points = path.points();
        let mut travelled = 0.0;
        let mut next = index;

        while next < last {
            let segment = points[next].distance(&points[next + 1]);
            if travelled + segment > budget {
                break;
            }
            travelled += segment;
            next += 1;
        }

        let next = next.max(index + 1).min(last);

        Advance {
            index: next,
            completed: next == last,
        }
    }
}
