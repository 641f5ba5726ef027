//! Relationship graph built by bounded breadth-first traversal of tags.
//!
//! The graph uses petgraph's directed `Graph` as the backing store with a
//! HashMap index for O(1) node lookup by address. Node and edge indices
//! grow in discovery order and nothing is ever removed, so iterating the
//! weights yields discovery order.
//!
//! Directional assertions between two addresses collapse into one edge:
//! the first direction seen fixes `from`/`to`, and seeing the opposite
//! direction later only sets `bidirectional`.

use bsn_core::prelude::*;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing::debug;

/// Traversal depth used when none is given.
pub const DEFAULT_DEPTH: usize = 2;

/// Parameters of a graph build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRequest {
    pub center: Address,
    /// Levels expanded from the center; nodes at exactly this level are
    /// included but not expanded.
    #[serde(default = "default_depth")]
    pub depth: usize,
    /// When set, only tags of this type are followed.
    #[serde(default)]
    pub tag_filter: Option<String>,
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

impl GraphRequest {
    pub fn new(center: impl Into<Address>) -> Self {
        Self {
            center: center.into(),
            depth: DEFAULT_DEPTH,
            tag_filter: None,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Follow only `tag_type`; an empty string clears the filter.
    pub fn with_tag(mut self, tag_type: impl Into<String>) -> Self {
        let tag_type = tag_type.into();
        self.tag_filter = (!tag_type.is_empty()).then_some(tag_type);
        self
    }

    fn follows(&self, tag_type: &str) -> bool {
        self.tag_filter.as_deref().map_or(true, |wanted| wanted == tag_type)
    }
}

/// A node of the relationship graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipNode {
    pub address: Address,
    pub name: String,
    /// Set by the layout pass; origin until then.
    #[serde(flatten)]
    pub position: Position,
    /// Edge endpoints touching this node, set by the layout pass.
    pub connections: usize,
    /// Union of tag types on incident edges, set by the layout pass.
    pub tag_types: BTreeSet<String>,
}

impl RelationshipNode {
    fn new(address: &str, name: String) -> Self {
        Self {
            address: address.to_string(),
            name,
            position: Position::default(),
            connections: 0,
            tag_types: BTreeSet::new(),
        }
    }
}

/// One or more tag assertions between two addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipEdge {
    pub from: Address,
    pub to: Address,
    /// Distinct tag types in first-seen order.
    pub types: Vec<String>,
    pub bidirectional: bool,
}

impl RelationshipEdge {
    fn add_type(&mut self, tag_type: &str) {
        if !self.types.iter().any(|t| t == tag_type) {
            self.types.push(tag_type.to_string());
        }
    }
}

/// Nodes and edges reachable from a center address.
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    graph: DiGraph<RelationshipNode, RelationshipEdge>,
    index: HashMap<Address, NodeIndex>,
    center: Address,
}

impl RelationshipGraph {
    fn with_center(center: &str) -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            center: center.to_string(),
        }
    }

    /// Build the graph around `request.center`.
    ///
    /// Never fails: an unknown center yields a single node, and tag targets
    /// missing from the directory are skipped.
    pub fn build<A: Annotations + ?Sized>(
        directory: &Directory,
        request: &GraphRequest,
        annotations: &A,
    ) -> Self {
        let mut graph = Self::with_center(&request.center);
        graph.ensure_node(directory, &request.center, annotations);

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        queue.push_back((request.center.as_str(), 0));

        while let Some((address, level)) = queue.pop_front() {
            if level >= request.depth || !visited.insert(address) {
                continue;
            }
            let Some(account) = directory.get(address) else {
                continue;
            };

            for (tag_type, targets) in &account.tags {
                if !request.follows(tag_type) {
                    continue;
                }
                for target in targets {
                    if !directory.contains(target) {
                        continue;
                    }
                    graph.ensure_node(directory, target, annotations);
                    graph.merge_edge(address, target, tag_type);
                    queue.push_back((target.as_str(), level + 1));
                }
            }
        }

        debug!(
            center = %request.center,
            depth = request.depth,
            tag = request.tag_filter.as_deref().unwrap_or("*"),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built relationship graph"
        );
        graph
    }

    fn ensure_node<A: Annotations + ?Sized>(
        &mut self,
        directory: &Directory,
        address: &str,
        annotations: &A,
    ) -> NodeIndex {
        if let Some(&idx) = self.index.get(address) {
            return idx;
        }
        let name = directory.display_name(address, annotations);
        let idx = self.graph.add_node(RelationshipNode::new(address, name));
        self.index.insert(address.to_string(), idx);
        idx
    }

    fn merge_edge(&mut self, from: &str, to: &str, tag_type: &str) {
        let (Some(&from_idx), Some(&to_idx)) = (self.index.get(from), self.index.get(to)) else {
            return;
        };

        if let Some(edge) = self.graph.find_edge(from_idx, to_idx) {
            self.graph[edge].add_type(tag_type);
        } else if let Some(edge) = self.graph.find_edge(to_idx, from_idx) {
            let edge = &mut self.graph[edge];
            edge.bidirectional = true;
            edge.add_type(tag_type);
        } else {
            self.graph.add_edge(
                from_idx,
                to_idx,
                RelationshipEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                    types: vec![tag_type.to_string()],
                    bidirectional: false,
                },
            );
        }
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    /// Nodes in discovery order, center first.
    pub fn nodes(&self) -> impl Iterator<Item = &RelationshipNode> {
        self.graph.node_weights()
    }

    /// Edges in discovery order.
    pub fn edges(&self) -> impl Iterator<Item = &RelationshipEdge> {
        self.graph.edge_weights()
    }

    pub fn node(&self, address: &str) -> Option<&RelationshipNode> {
        self.index.get(address).map(|&idx| &self.graph[idx])
    }

    /// Edge between two addresses in either stored direction.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&RelationshipEdge> {
        let a = *self.index.get(a)?;
        let b = *self.index.get(b)?;
        self.graph
            .find_edge(a, b)
            .or_else(|| self.graph.find_edge(b, a))
            .map(|edge| &self.graph[edge])
    }

    pub fn contains(&self, address: &str) -> bool {
        self.index.contains_key(address)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn inner_mut(&mut self) -> &mut DiGraph<RelationshipNode, RelationshipEdge> {
        &mut self.graph
    }

    /// Consume the graph into owned node and edge lists, discovery order.
    pub fn into_parts(self) -> (Vec<RelationshipNode>, Vec<RelationshipEdge>) {
        let (nodes, edges) = self.graph.into_nodes_edges();
        (
            nodes.into_iter().map(|n| n.weight).collect(),
            edges.into_iter().map(|e| e.weight).collect(),
        )
    }
}

impl Serialize for RelationshipGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nodes: Vec<&RelationshipNode> = self.nodes().collect();
        let edges: Vec<&RelationshipEdge> = self.edges().collect();
        let mut state = serializer.serialize_struct("RelationshipGraph", 3)?;
        state.serialize_field("center", &self.center)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

/// Build the relationship graph around `request.center`.
pub fn build_graph<A: Annotations + ?Sized>(
    directory: &Directory,
    request: &GraphRequest,
    annotations: &A,
) -> RelationshipGraph {
    RelationshipGraph::build(directory, request, annotations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(json: &str) -> Directory {
        Directory::from_json_str(json).unwrap()
    }

    #[test]
    fn unknown_center_is_a_single_node() {
        let d = dir(r#"{"accounts": {"GA": {"tags": {"Link": ["GB"]}}, "GB": {}}}"#);
        let graph = build_graph(&d, &GraphRequest::new("GNOWHERE1234"), &NoAnnotations);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node("GNOWHERE1234").unwrap().name, "GNOWHERE");
    }

    #[test]
    fn depth_zero_expands_nothing() {
        let d = dir(r#"{"accounts": {"GA": {"tags": {"Link": ["GB"]}}, "GB": {}}}"#);
        let graph = build_graph(&d, &GraphRequest::new("GA").with_depth(0), &NoAnnotations);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn repeated_types_merge_into_one_edge() {
        let d = dir(
            r#"{"accounts": {
                "GA": {"tags": {"Friend": ["GB", "GB"], "Partner": ["GB"]}},
                "GB": {"tags": {"Friend": ["GA"]}}
            }}"#,
        );
        let graph = build_graph(&d, &GraphRequest::new("GA"), &NoAnnotations);
        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge_between("GB", "GA").unwrap();
        assert_eq!(edge.from, "GA");
        assert_eq!(edge.types, vec!["Friend", "Partner"]);
        assert!(edge.bidirectional);
    }

    #[test]
    fn self_tag_makes_a_loop() {
        let d = dir(r#"{"accounts": {"GA": {"tags": {"Me": ["GA"]}}}}"#);
        let graph = build_graph(&d, &GraphRequest::new("GA"), &NoAnnotations);
        assert_eq!(graph.node_count(), 1);
        let edge = graph.edge_between("GA", "GA").unwrap();
        assert!(!edge.bidirectional);
    }

    #[test]
    fn tag_filter_limits_expansion() {
        let d = dir(
            r#"{"accounts": {
                "GA": {"tags": {"Friend": ["GB"], "Partner": ["GC"]}},
                "GB": {"tags": {"Partner": ["GC"]}},
                "GC": {}
            }}"#,
        );
        let graph = build_graph(&d, &GraphRequest::new("GA").with_tag("Friend"), &NoAnnotations);
        assert!(graph.contains("GB"));
        assert!(!graph.contains("GC"));

        let cleared = GraphRequest::new("GA").with_tag("");
        assert_eq!(cleared.tag_filter, None);
    }

    #[test]
    fn names_use_nicknames() {
        let d = dir(r#"{"accounts": {"GA": {"tags": {"Link": ["GBOBADDRESS"]}}, "GBOBADDRESS": {}}}"#);
        let mut state = ClientState::default();
        state.set_nickname("GBOBADDRESS", "Bobby");
        let graph = build_graph(&d, &GraphRequest::new("GA"), &state);
        assert_eq!(graph.node("GBOBADDRESS").unwrap().name, "Bobby");
    }

    #[test]
    fn serializes_flat_positions() {
        let d = dir(r#"{"accounts": {"GA": {"tags": {"Link": ["GB"]}}, "GB": {}}}"#);
        let graph = build_graph(&d, &GraphRequest::new("GA"), &NoAnnotations);
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["center"], "GA");
        assert_eq!(json["nodes"][1]["address"], "GB");
        assert!(json["nodes"][0]["x"].is_number());
        assert_eq!(json["edges"][0]["types"][0], "Link");
    }

    #[test]
    fn into_parts_keeps_discovery_order() {
        let d = dir(
            r#"{"accounts": {
                "GA": {"tags": {"Link": ["GC", "GB"]}},
                "GB": {}, "GC": {}
            }}"#,
        );
        let (nodes, edges) = build_graph(&d, &GraphRequest::new("GA"), &NoAnnotations).into_parts();
        let order: Vec<_> = nodes.iter().map(|n| n.address.as_str()).collect();
        assert_eq!(order, vec!["GA", "GC", "GB"]);
        assert_eq!(edges[0].to, "GC");
    }
}
