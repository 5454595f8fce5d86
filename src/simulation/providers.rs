//! Collaborators the simulation consumes but does not implement
//!
//! Routing and road-graph data come from outside the core. The
//! [`RoadNetwork`](super::RoadNetwork) in this crate is one implementation.

use super::types::Waypoint;

/// Classification of a road, following common OSM `highway` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
}

impl RoadClass {
    /// Major roads qualify a junction for the stricter signal policy
    pub fn is_major(&self) -> bool {
        matches!(
            self,
            RoadClass::Motorway | RoadClass::Trunk | RoadClass::Primary | RoadClass::Secondary
        )
    }
}

/// A junction as reported by the road graph
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub location: Waypoint,
    pub name: Option<String>,
    /// Number of road segments meeting at the junction
    pub degree: usize,
    /// Classes of the roads meeting at the junction
    pub road_classes: Vec<RoadClass>,
}

impl Junction {
    pub fn touches_major_road(&self) -> bool {
        self.road_classes.iter().any(RoadClass::is_major)
    }
}

/// Produces the shortest route between two coordinates
pub trait RoutingProvider {
    /// Ordered waypoints from `start` to `end`, `None` when no path exists
    fn route(&self, start: Waypoint, end: Waypoint) -> Option<Vec<Waypoint>>;
}

/// Exposes junction connectivity for signal placement
pub trait RoadGraphProvider {
    fn junctions(&self) -> Vec<Junction>;
}
