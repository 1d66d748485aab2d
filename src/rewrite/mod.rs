use crate::error::TransformError;
use crate::model::{Node, NodeId, OrderingPayload, ScalarKind, ScalarNode, SchemaGraph};
use tracing::debug;

mod rules;
pub mod scope;
pub mod targets;

use rules::SortOrderRules;
pub use scope::contains_service;
pub use targets::RewriteTargets;

/// Adds a synthesized sort-order counter to interleaved list elements of a response.
///
/// Some protocols send the elements of two lists as one interleaved sequence; once
/// deserialized into two separate lists their relative order is lost. This pass
/// annotates the response shape with an ordering annotation and gives each element
/// shape a counter member the deserializer fills in while reading that sequence.
#[derive(Debug, Clone, Default)]
pub struct SortOrderRewrite {
    targets: RewriteTargets,
}

pub struct SortOrderRewriteBuilder {
    targets: RewriteTargets,
}

impl SortOrderRewriteBuilder {
    pub fn new() -> Self {
        Self {
            targets: RewriteTargets::default(),
        }
    }
    pub fn with_targets(mut self, targets: RewriteTargets) -> Self {
        self.targets = targets;
        self
    }
    pub fn with_service(mut self, service: NodeId) -> Self {
        self.targets.service = service;
        self
    }
    pub fn with_response(mut self, response: NodeId) -> Self {
        self.targets.response = response;
        self
    }
    pub fn with_elements(mut self, elements: impl IntoIterator<Item = NodeId>) -> Self {
        self.targets.elements = elements.into_iter().collect();
        self
    }
    pub fn with_counter_type(mut self, counter_type: NodeId) -> Self {
        self.targets.counter_type = counter_type;
        self
    }
    pub fn with_counter_member(mut self, name: &str, initial_value: &str) -> Self {
        self.targets.counter_member = name.to_string();
        self.targets.initial_value = initial_value.to_string();
        self
    }
    pub fn with_containers<S: Into<String>>(
        mut self,
        containers: impl IntoIterator<Item = S>,
    ) -> Self {
        self.targets.containers = containers.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_timestamp_member(mut self, name: &str) -> Self {
        self.targets.timestamp_member = name.to_string();
        self
    }
    pub fn build(self) -> SortOrderRewrite {
        SortOrderRewrite {
            targets: self.targets,
        }
    }
}

impl Default for SortOrderRewriteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SortOrderRewrite {
    pub fn builder() -> SortOrderRewriteBuilder {
        SortOrderRewriteBuilder::new()
    }

    pub fn targets(&self) -> &RewriteTargets {
        &self.targets
    }

    /// The ordering annotation payload this rewrite attaches to the response shape.
    pub fn payload(&self) -> OrderingPayload {
        OrderingPayload::new(
            self.targets.counter_member.as_str(),
            self.targets.initial_value.as_str(),
            self.targets.containers.iter().map(String::as_str),
        )
    }

    /// Whether `transform` would rewrite `graph` when generating `service`.
    pub fn in_scope(&self, graph: &SchemaGraph, service: &NodeId) -> bool {
        *service == self.targets.service && contains_service(graph, service)
    }

    /// Applies the rewrite for `service`, returning a new graph.
    ///
    /// When `service` is not the configured target or is absent from `graph`, the
    /// input is returned unchanged. Otherwise the result holds one new integer
    /// scalar, the annotated response shape and the element shapes with their new
    /// counter member; every other node is shared with `graph`. Applying the
    /// rewrite to its own output fails with a duplicate error. Targets that
    /// overlap fail with `ConflictingTargets` whatever the service.
    #[tracing::instrument(skip_all, fields(service = %service))]
    pub fn transform(
        &self,
        graph: &SchemaGraph,
        service: &NodeId,
    ) -> Result<SchemaGraph, TransformError> {
        self.targets.validate()?;
        if !self.in_scope(graph, service) {
            debug!("service not targeted, leaving graph unchanged");
            return Ok(graph.clone());
        }

        self.require_structure(graph, &self.targets.response)?;
        for element in &self.targets.elements {
            self.require_structure(graph, element)?;
        }

        let mut builder = graph.to_builder();
        builder.add_node(Node::Scalar(ScalarNode::new(
            self.targets.counter_type.clone(),
            ScalarKind::Integer,
        )))?;
        let with_counter_type = builder.build();

        let rules = SortOrderRules::new(
            &self.targets.response,
            &self.targets.elements,
            &self.targets.counter_type,
            self.payload(),
            &self.targets.timestamp_member,
        );
        let rewritten = with_counter_type.map_nodes(|node| rules.apply(node))?;

        debug!(nodes = rewritten.len(), "sort-order rewrite applied");
        Ok(rewritten)
    }

    fn require_structure(&self, graph: &SchemaGraph, id: &NodeId) -> Result<(), TransformError> {
        graph
            .structure(id)
            .map(|_| ())
            .ok_or_else(|| TransformError::MissingTargetNode {
                id: id.clone(),
                expected: "structure",
            })
    }
}

/// Applies the default S3 `ListObjectVersions` rewrite for `service`.
pub fn transform(graph: &SchemaGraph, service: &NodeId) -> Result<SchemaGraph, TransformError> {
    SortOrderRewrite::default().transform(graph, service)
}
