//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the junban crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use junban::prelude::*;
//!
//! # fn run_example(graph: SchemaGraph) -> Result<()> {
//! let service = NodeId::parse("com.amazonaws.s3#AmazonS3")?;
//! let rewritten = transform(&graph, &service)?;
//! println!("{} nodes after rewrite", rewritten.len());
//! # Ok(())
//! # }
//! ```

// Rewrite entry points
pub use crate::rewrite::{RewriteTargets, SortOrderRewrite, contains_service, transform};

// Graph model
pub use crate::model::{
    Annotation, AnnotationKind, AnnotationSet, IntoGraph, JsonAstModel, MemberNode, Node, NodeId,
    OrderingPayload, Rewrite, ScalarKind, ScalarNode, SchemaGraph, StructureNode, to_json_ast,
};

// Error types
pub use crate::error::{ConversionError, GraphError, TransformError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
