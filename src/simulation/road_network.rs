//! In-memory road graph for routing and signal placement
//!
//! A small petgraph-backed network that stands in for an external map
//! service. It is built programmatically, never parsed from map files.

use anyhow::{bail, Context, Result};
use log::debug;
use ordered_float::OrderedFloat;
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::providers::{Junction, RoadClass, RoadGraphProvider, RoutingProvider};
use super::types::Waypoint;

/// Node data for the road graph
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNode {
    pub location: Waypoint,
    pub name: Option<String>,
}

/// Edge data for the road graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadEdge {
    pub length_m: f64,
    pub class: RoadClass,
}

/// Undirected road network
#[derive(Debug, Default, Clone)]
pub struct RoadNetwork {
    graph: UnGraph<RoadNode, RoadEdge>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a junction and returns its node index
    pub fn add_junction(&mut self, location: Waypoint) -> NodeIndex {
        self.graph.add_node(RoadNode {
            location,
            name: None,
        })
    }

    pub fn add_named_junction(&mut self, location: Waypoint, name: impl Into<String>) -> NodeIndex {
        self.graph.add_node(RoadNode {
            location,
            name: Some(name.into()),
        })
    }

    /// Connects two junctions; the length is the great-circle distance
    pub fn add_road(&mut self, from: NodeIndex, to: NodeIndex, class: RoadClass) -> Result<()> {
        if from == to {
            bail!("Road must connect two different junctions");
        }
        let start = self
            .graph
            .node_weight(from)
            .context("Start junction not found")?
            .location;
        let end = self
            .graph
            .node_weight(to)
            .context("End junction not found")?
            .location;

        self.graph.add_edge(
            from,
            to,
            RoadEdge {
                length_m: start.distance(&end),
                class,
            },
        );
        Ok(())
    }

    pub fn junction_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn location(&self, node: NodeIndex) -> Option<Waypoint> {
        self.graph.node_weight(node).map(|node| node.location)
    }

    /// Junction closest to an arbitrary coordinate
    pub fn nearest_junction(&self, position: &Waypoint) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .min_by_key(|node| OrderedFloat(self.graph[*node].location.distance(position)))
    }

    /// Shortest path between two junctions by road length (A* with a
    /// great-circle heuristic)
    pub fn find_path(&self, start: NodeIndex, end: NodeIndex) -> Option<Vec<NodeIndex>> {
        let target = self.graph.node_weight(end)?.location;

        let (_, nodes) = astar(
            &self.graph,
            start,
            |node| node == end,
            |edge| edge.weight().length_m,
            |node| self.graph[node].location.distance(&target),
        )?;

        Some(nodes)
    }

    /// Build a grid city of `size` x `size` junctions around `origin`
    ///
    /// The middle row and column are primary roads, everything else is
    /// residential. Interior junctions have degree four.
    pub fn grid_city(origin: Waypoint, size: usize, block_deg: f64) -> Self {
        let mut network = RoadNetwork::new();
        let mut grid = vec![vec![NodeIndex::new(0); size]; size];

        for (row, nodes) in grid.iter_mut().enumerate() {
            for (col, node) in nodes.iter_mut().enumerate() {
                let location = Waypoint::new(
                    origin.lat + row as f64 * block_deg,
                    origin.lon + col as f64 * block_deg,
                );
                *node = network.add_junction(location);
            }
        }

        let middle = size / 2;
        let class_for = |line: usize| {
            if line == middle {
                RoadClass::Primary
            } else {
                RoadClass::Residential
            }
        };

        // Grid nodes are distinct, so these roads cannot fail
        for row in 0..size {
            for col in 0..size.saturating_sub(1) {
                let _ = network.add_road(grid[row][col], grid[row][col + 1], class_for(row));
            }
        }
        for row in 0..size.saturating_sub(1) {
            for col in 0..size {
                let _ = network.add_road(grid[row][col], grid[row + 1][col], class_for(col));
            }
        }

        debug!(
            "Built grid city with {} junctions and {} roads",
            network.junction_count(),
            network.road_count()
        );

        network
    }
}

impl RoutingProvider for RoadNetwork {
    fn route(&self, start: Waypoint, end: Waypoint) -> Option<Vec<Waypoint>> {
        let start_node = self.nearest_junction(&start)?;
        let end_node = self.nearest_junction(&end)?;

        let nodes = self.find_path(start_node, end_node)?;
        Some(
            nodes
                .into_iter()
                .filter_map(|node| self.location(node))
                .collect(),
        )
    }
}

impl RoadGraphProvider for RoadNetwork {
    fn junctions(&self) -> Vec<Junction> {
        self.graph
            .node_indices()
            .map(|node| {
                let road_classes: Vec<RoadClass> = self
                    .graph
                    .edges(node)
                    .map(|edge| edge.weight().class)
                    .collect();
                Junction {
                    location: self.graph[node].location,
                    name: self.graph[node].name.clone(),
                    degree: road_classes.len(),
                    road_classes,
                }
            })
            .collect()
    }
}
