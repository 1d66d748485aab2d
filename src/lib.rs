//! # Junban - Sort-Order Recovery for Schema Graphs
//!
//! **Junban** is a small, pure rewriting pass over immutable schema graphs. Some
//! responses send the elements of two lists as a single interleaved sequence; once a
//! generated client splits them into separate lists, their relative order is gone.
//! Junban prepares a schema graph so that a code generator can restore it.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Model**: Smithy JSON AST documents load through `JsonAstModel`
//!     and are written back with `to_json_ast`. For other formats, parse into your
//!     own Rust structs and implement `IntoGraph` to translate them into a
//!     `SchemaGraph`.
//! 2.  **Configure**: Use `SortOrderRewrite::builder` to pick the response shape,
//!     element shapes, counter member and containers. The defaults describe the
//!     S3 `ListObjectVersions` response.
//! 3.  **Rewrite**: Call `transform` with the service being generated. The result
//!     is a new graph. Untouched nodes are shared with the input.
//! 4.  **Generate**: Downstream generators read the `sortOrder` annotation on the
//!     response shape and skip wire parsing for members marked `transient`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use junban::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph: SchemaGraph = load_model()?;
//!     let service = NodeId::parse("com.amazonaws.s3#AmazonS3")?;
//!
//!     let rewrite = SortOrderRewrite::builder().build();
//!     let rewritten = rewrite.transform(&graph, &service)?;
//!
//!     for id in rewritten.annotated_with(AnnotationKind::Ordering) {
//!         println!("ordering restored on {}", id);
//!     }
//!     Ok(())
//! }
//! # fn load_model() -> Result<SchemaGraph> { Ok(SchemaGraph::default()) }
//! ```

pub mod error;
pub mod model;
pub mod prelude;
pub mod rewrite;
