use super::{AnnotationKind, MemberNode, Node, NodeId, StructureNode};
use crate::error::GraphError;
use ahash::AHashMap;
use itertools::Itertools;
use std::sync::Arc;

/// Outcome of a per-node rule passed to [`SchemaGraph::map_nodes`].
#[derive(Debug, Clone)]
pub enum Rewrite {
    /// Keep the node; the output graph shares it with the input.
    Keep,
    /// Replace the node with `node` and add `added` as brand-new nodes.
    ///
    /// `node` must carry an id already in the graph, otherwise the map fails with
    /// `UnknownNode`.
    Replace { node: Node, added: Vec<Node> },
}

impl Rewrite {
    pub fn replace(node: Node) -> Self {
        Rewrite::Replace {
            node,
            added: Vec::new(),
        }
    }
}

/// An immutable collection of schema nodes addressed by `NodeId`.
///
/// Cloning a graph, or deriving a new one through [`SchemaGraph::to_builder`] or
/// [`SchemaGraph::map_nodes`], shares every untouched node with the original.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    nodes: AHashMap<NodeId, Arc<Node>>,
}

impl PartialEq for SchemaGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.nodes.iter().all(|(id, node)| {
                other
                    .nodes
                    .get(id)
                    .is_some_and(|o| Arc::ptr_eq(node, o) || node == o)
            })
    }
}

impl Eq for SchemaGraph {}

impl SchemaGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// A builder holding every node of this graph by reference.
    pub fn to_builder(&self) -> GraphBuilder {
        GraphBuilder {
            nodes: self.nodes.clone(),
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<&Arc<Node>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn structure(&self, id: &NodeId) -> Option<&StructureNode> {
        self.get(id).and_then(|node| node.as_structure())
    }

    /// Resolves the member nodes of structure `id` in declaration order.
    /// Members whose node is missing from the graph are skipped.
    pub fn members_of(&self, id: &NodeId) -> Vec<(&str, &MemberNode)> {
        self.structure(id)
            .map(|s| {
                s.members()
                    .iter()
                    .filter_map(|(name, member_id)| {
                        self.get(member_id)
                            .and_then(|n| n.as_member())
                            .map(|m| (name.as_str(), m))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.nodes.values()
    }

    /// All node ids in lexical order.
    pub fn ids_sorted(&self) -> Vec<&NodeId> {
        self.nodes.keys().sorted().collect()
    }

    /// Ids of the nodes carrying an annotation of `kind`, in lexical order.
    pub fn annotated_with(&self, kind: AnnotationKind) -> Vec<&NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.annotations().contains(kind))
            .map(|(id, _)| id)
            .sorted()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Applies `rule` to every node and returns the resulting graph.
    ///
    /// Rules see the nodes of `self` only; replacements and additions are applied
    /// afterwards, so the result does not depend on iteration order. An added node
    /// whose id already exists fails the whole map with `DuplicateNodeId`.
    pub fn map_nodes<F, E>(&self, mut rule: F) -> Result<SchemaGraph, E>
    where
        F: FnMut(&Arc<Node>) -> Result<Rewrite, E>,
        E: From<GraphError>,
    {
        let mut rewrites = Vec::new();
        for node in self.nodes.values() {
            if let Rewrite::Replace { node, added } = rule(node)? {
                rewrites.push((node, added));
            }
        }

        let mut builder = self.to_builder();
        let mut additions = Vec::new();
        for (node, added) in rewrites {
            builder.replace_node(node)?;
            additions.extend(added);
        }
        for node in additions {
            builder.add_node(node)?;
        }
        Ok(builder.build())
    }
}

/// Accumulates nodes for a new `SchemaGraph`.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: AHashMap<NodeId, Arc<Node>>,
}

impl GraphBuilder {
    /// Adds a node whose id must not be present yet.
    pub fn add_node(&mut self, node: Node) -> Result<&mut Self, GraphError> {
        self.add_shared(Arc::new(node))
    }

    /// Adds an already shared node whose id must not be present yet.
    pub fn add_shared(&mut self, node: Arc<Node>) -> Result<&mut Self, GraphError> {
        let id = node.id().clone();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNodeId(id));
        }
        self.nodes.insert(id, node);
        Ok(self)
    }

    /// Swaps in a new version of a node that must already be present.
    fn replace_node(&mut self, node: Node) -> Result<&mut Self, GraphError> {
        let id = node.id().clone();
        match self.nodes.get_mut(&id) {
            Some(slot) => {
                *slot = Arc::new(node);
                Ok(self)
            }
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    pub fn build(self) -> SchemaGraph {
        SchemaGraph { nodes: self.nodes }
    }
}
