use crate::error::TransformError;
use crate::model::payload::ordering_documentation;
use crate::model::{
    Annotation, AnnotationKind, MemberNode, Node, NodeId, OrderingPayload, Rewrite, StructureNode,
};
use itertools::Itertools;
use std::sync::Arc;
use tracing::debug;

/// Per-node rules of the sort-order rewrite, resolved once from the targets.
pub(super) struct SortOrderRules<'a> {
    response: &'a NodeId,
    elements: &'a [NodeId],
    counter_type: &'a NodeId,
    payload: OrderingPayload,
    documentation: String,
}

impl<'a> SortOrderRules<'a> {
    pub(super) fn new(
        response: &'a NodeId,
        elements: &'a [NodeId],
        counter_type: &'a NodeId,
        payload: OrderingPayload,
        timestamp_member: &str,
    ) -> Self {
        let documentation = ordering_documentation(&payload, timestamp_member);
        Self {
            response,
            elements,
            counter_type,
            payload,
            documentation,
        }
    }

    pub(super) fn apply(&self, node: &Arc<Node>) -> Result<Rewrite, TransformError> {
        let Node::Structure(structure) = node.as_ref() else {
            return Ok(Rewrite::Keep);
        };

        if structure.id() == self.response {
            self.annotate_response(structure)
        } else if self.elements.contains(structure.id()) {
            self.add_counter_member(structure)
        } else {
            Ok(Rewrite::Keep)
        }
    }

    /// Attaches the ordering annotation, carrying every existing annotation forward.
    fn annotate_response(&self, structure: &StructureNode) -> Result<Rewrite, TransformError> {
        let existing = structure.annotations();
        if existing.contains(AnnotationKind::Ordering) {
            return Err(TransformError::DuplicateAnnotation {
                node: structure.id().clone(),
                annotation: AnnotationKind::Ordering.id(),
            });
        }
        debug!(
            node = %structure.id(),
            existing = %existing.ids().join(", "),
            "adding ordering annotation"
        );

        // to_builder seeds members and the full annotation set from the original.
        let replacement = structure
            .to_builder()
            .annotation(Annotation::Ordering(self.payload.clone()))
            .build();

        Ok(Rewrite::replace(Node::Structure(replacement)))
    }

    /// Adds the synthesized counter member typed by the reserved scalar.
    fn add_counter_member(&self, structure: &StructureNode) -> Result<Rewrite, TransformError> {
        let name = self.payload.counter_field.as_str();
        debug!(node = %structure.id(), member = name, "adding counter member");

        let replacement = structure.to_builder().add_member(name)?.build();
        let member_id = structure.id().with_member(name);
        let member = MemberNode::new(member_id, self.counter_type.clone())
            .with_annotation(Annotation::SynthesizedField)
            .with_annotation(Annotation::Documentation(self.documentation.clone()));

        Ok(Rewrite::Replace {
            node: Node::Structure(replacement),
            added: vec![Node::Member(member)],
        })
    }
}
