use crate::model::NodeId;
use thiserror::Error;

/// Errors raised while constructing or updating a `SchemaGraph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' already exists in the schema graph")]
    DuplicateNodeId(NodeId),

    #[error("Structure '{parent}' already has a member named '{member}'")]
    DuplicateMember { parent: NodeId, member: String },

    #[error("'{input}' is not a valid node id: {reason}")]
    InvalidNodeId { input: String, reason: String },

    #[error("Node '{0}' is not in the schema graph")]
    UnknownNode(NodeId),
}

/// Errors that can occur while applying the sort-order rewrite.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Target node '{id}' was not found as a {expected} in the schema graph")]
    MissingTargetNode { id: NodeId, expected: &'static str },

    #[error("Node '{node}' already carries the '{annotation}' annotation")]
    DuplicateAnnotation { node: NodeId, annotation: NodeId },

    #[error("Rewrite target '{id}' conflicts with another target: {reason}")]
    ConflictingTargets { id: NodeId, reason: &'static str },
}

impl TransformError {
    /// True when the failure means the rewrite has already been applied to this graph.
    pub fn is_reapplication(&self) -> bool {
        matches!(
            self,
            TransformError::Graph(GraphError::DuplicateNodeId(_))
                | TransformError::Graph(GraphError::DuplicateMember { .. })
                | TransformError::DuplicateAnnotation { .. }
        )
    }
}

/// Errors that can occur when converting a foreign model format into a `SchemaGraph`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid model data: {0}")]
    ValidationError(String),

    #[error("Annotation '{id}' has a malformed payload: {message}")]
    AnnotationPayload { id: NodeId, message: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
