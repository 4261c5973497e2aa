use crate::{
    config::Config,
    error::Result,
    matrix::square,
    types::{MAX_WEIGHT, NodeIndex},
};
use derive_more::{Debug, Display};
use thiserror::Error;
use tracing::debug;

/// Edge as supplied by the caller: 1-based endpoints and a signed weight, so
/// that invalid input can be reported rather than truncated.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
#[display("({from}, {to}, {weight})")]
pub struct Edge {
    pub from: i64,
    pub to: i64,
    pub weight: i64,
}

impl Edge {
    #[must_use]
    pub const fn new(from: i64, to: i64, weight: i64) -> Self {
        Self { from, to, weight }
    }
}

/// Rejected graph input. Always reported before any computation starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("node count {nodes} is outside 1..={max}")]
    NodeCount { nodes: i64, max: usize },
    #[error("edge count {0} is negative")]
    EdgeCount(i64),
    #[error("edge {edge} has a negative weight")]
    NegativeWeight { edge: Edge },
    #[error("edge {edge} has a weight above {max}", max = MAX_WEIGHT)]
    WeightTooLarge { edge: Edge },
    #[error("edge {edge} names node {node}, outside 1..={order}")]
    NodeOutOfRange { edge: Edge, node: i64, order: usize },
    #[error("expected {expected} at token {position}, found end of input")]
    UnexpectedEnd {
        expected: &'static str,
        position: usize,
    },
    #[error("expected {expected} at token {position}, found `{token}`")]
    NotAnInteger {
        expected: &'static str,
        position: usize,
        token: String,
    },
}

/// Dense undirected adjacency.
///
/// A stored weight of `0` means "no direct edge": loading an edge with weight
/// zero leaves the pair disconnected.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    order: usize,
    #[debug(skip)]
    weights: Vec<u32>,
}

impl Graph {
    /// Graph with `nodes` nodes and no edges.
    ///
    /// # Errors
    /// - [`InputError::NodeCount`] unless `1 <= nodes <= config.max_nodes`.
    /// - [`crate::Error::AllocationFailure`] if the adjacency cannot be
    ///   allocated.
    pub fn new(nodes: usize, config: &Config) -> Result<Self> {
        if nodes == 0 || nodes > config.max_nodes {
            return Err(InputError::NodeCount {
                nodes: i64::try_from(nodes).unwrap_or(i64::MAX),
                max: config.max_nodes,
            }
            .into());
        }
        Ok(Self {
            order: nodes,
            weights: square(nodes, 0)?,
        })
    }

    /// Graph with `nodes` nodes and the given edges, loaded in order.
    ///
    /// # Errors
    /// See [`Graph::new`] and [`Graph::add_edge`].
    pub fn from_edges(
        nodes: usize,
        edges: impl IntoIterator<Item = Edge>,
        config: &Config,
    ) -> Result<Self> {
        let mut graph = Self::new(nodes, config)?;
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Parse the whitespace-separated text format: `N M` followed by `M`
    /// triples `source destination weight` with 1-based node indexes.
    ///
    /// Tokens after the last triple are ignored.
    ///
    /// # Errors
    /// [`crate::Error::InvalidInput`] on malformed or invalid input, and
    /// [`crate::Error::AllocationFailure`] as in [`Graph::new`].
    pub fn parse(text: &str, config: &Config) -> Result<Self> {
        let mut tokens = Tokens {
            inner: text.split_whitespace(),
            position: 0,
        };
        let nodes = tokens.next_integer("node count")?;
        let edges = tokens.next_integer("edge count")?;
        let nodes = usize::try_from(nodes)
            .ok()
            .filter(|&nodes| nodes >= 1 && nodes <= config.max_nodes)
            .ok_or(InputError::NodeCount {
                nodes,
                max: config.max_nodes,
            })?;
        if edges < 0 {
            return Err(InputError::EdgeCount(edges).into());
        }
        let mut graph = Self::new(nodes, config)?;
        for _ in 0..edges {
            let edge = Edge {
                from: tokens.next_integer("edge source")?,
                to: tokens.next_integer("edge destination")?,
                weight: tokens.next_integer("edge weight")?,
            };
            graph.add_edge(edge)?;
        }
        debug!(nodes, edges, "parsed graph");
        Ok(graph)
    }

    /// Load an undirected edge, overwriting any earlier weight for the pair.
    ///
    /// # Errors
    /// [`InputError::NegativeWeight`], [`InputError::WeightTooLarge`] or
    /// [`InputError::NodeOutOfRange`]; the graph is left unchanged.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), InputError> {
        if edge.weight < 0 {
            return Err(InputError::NegativeWeight { edge });
        }
        let weight = u32::try_from(edge.weight).map_err(|_| InputError::WeightTooLarge { edge })?;
        let from = self.node(edge, edge.from)?;
        let to = self.node(edge, edge.to)?;
        self.weights[from * self.order + to] = weight;
        self.weights[to * self.order + from] = weight;
        Ok(())
    }

    fn node(&self, edge: Edge, node: i64) -> Result<NodeIndex, InputError> {
        usize::try_from(node)
            .ok()
            .filter(|&node| node >= 1 && node <= self.order)
            .map(|node| node - 1)
            .ok_or(InputError::NodeOutOfRange {
                edge,
                node,
                order: self.order,
            })
    }

    /// Number of nodes.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Weight of the direct edge between two 0-based nodes, if any.
    ///
    /// # Panics
    /// If either index is not below [`Self::order`].
    #[must_use]
    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> Option<u32> {
        assert!(from < self.order && to < self.order, "node out of range");
        match self.weights[from * self.order + to] {
            0 => None,
            weight => Some(weight),
        }
    }

    /// Direct neighbours of a 0-based node with the connecting weights.
    ///
    /// # Panics
    /// If `node` is not below [`Self::order`].
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, u32)> + '_ {
        assert!(node < self.order, "node out of range");
        self.weights[node * self.order..(node + 1) * self.order]
            .iter()
            .enumerate()
            .filter(|&(_, &weight)| weight != 0)
            .map(|(to, &weight)| (to, weight))
    }
}

struct Tokens<'a> {
    inner: core::str::SplitWhitespace<'a>,
    position: usize,
}

impl Tokens<'_> {
    fn next_integer(&mut self, expected: &'static str) -> Result<i64, InputError> {
        let position = self.position;
        self.position += 1;
        let token = self.inner.next().ok_or(InputError::UnexpectedEnd { expected, position })?;
        token.parse().map_err(|_| InputError::NotAnInteger {
            expected,
            position,
            token: token.to_owned(),
        })
    }
}
