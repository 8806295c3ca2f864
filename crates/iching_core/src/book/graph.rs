//! Relationship graph over trigrams and hexagrams.
//!
//! # Invariants
//! - 72 nodes: `t1..t8` then `h1..h64`.
//! - Every hexagram has one `top` and one `bottom` edge to a trigram node,
//!   followed by 63 change edges named by the change's binary pattern.
//! - The graph is built once per book; later calls return the same instance.

use super::{Book, LookupResult};
use crate::model::trigram::Position;
use log::info;
use serde::Serialize;
use std::time::Instant;

/// Node family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Trigram,
    Hexagram,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// `t<N>` for trigrams, `h<N>` for hexagrams.
    pub id: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub number: u32,
}

/// Directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    /// `top`/`bottom` for trigram edges, six-line pattern for change edges.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Edges from a hexagram to one of its trigrams.
    pub fn trigram_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(|edge| edge.to.starts_with('t'))
    }

    /// Edges from a hexagram to another hexagram.
    pub fn change_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(|edge| edge.to.starts_with('h'))
    }
}

pub fn trigram_node_id(number: u32) -> String {
    format!("t{number}")
}

pub fn hexagram_node_id(number: u32) -> String {
    format!("h{number}")
}

impl Book {
    /// Relationship graph of this book, built on first call.
    pub fn as_graph(&self) -> LookupResult<&Graph> {
        self.graph.get_or_try_init(|| self.build_graph())
    }

    fn build_graph(&self) -> LookupResult<Graph> {
        let started_at = Instant::now();

        let mut nodes = Vec::with_capacity(self.trigrams.len() + self.hexagrams.len());
        nodes.extend(self.trigrams.iter().map(|trigram| GraphNode {
            id: trigram_node_id(trigram.number()),
            kind: NodeKind::Trigram,
            number: trigram.number(),
        }));
        nodes.extend(self.hexagrams.iter().map(|hexagram| GraphNode {
            id: hexagram_node_id(hexagram.number()),
            kind: NodeKind::Hexagram,
            number: hexagram.number(),
        }));

        let mut edges = Vec::new();
        for hexagram in &self.hexagrams {
            let from = hexagram_node_id(hexagram.number());
            for position in [Position::Top, Position::Bottom] {
                edges.push(GraphEdge {
                    from: from.clone(),
                    to: trigram_node_id(hexagram.trigram_at(position).number()),
                    name: position.as_str().to_string(),
                });
            }
            for change in self.changes(hexagram)? {
                edges.push(GraphEdge {
                    from: from.clone(),
                    to: hexagram_node_id(change.to().number()),
                    name: change.binary(),
                });
            }
        }

        info!(
            "event=graph_build module=graph status=ok nodes={} edges={} duration_ms={}",
            nodes.len(),
            edges.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Graph { nodes, edges })
    }
}
