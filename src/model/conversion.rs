use super::SchemaGraph;
use crate::error::ConversionError;

/// A trait for foreign model documents that can be converted into a `SchemaGraph`.
///
/// This is the extension point for model loaders: parse your format into your own
/// structs, then implement this trait to translate them into graph nodes.
///
/// # Example
///
/// ```rust,no_run
/// use junban::error::ConversionError;
/// use junban::model::{IntoGraph, Node, NodeId, ScalarKind, ScalarNode, SchemaGraph};
///
/// struct MyScalars {
///     names: Vec<String>,
/// }
///
/// impl IntoGraph for MyScalars {
///     fn into_graph(self) -> Result<SchemaGraph, ConversionError> {
///         let mut builder = SchemaGraph::builder();
///         for name in self.names {
///             let id = NodeId::new("example.scalars", name);
///             builder.add_node(Node::Scalar(ScalarNode::new(id, ScalarKind::String)))?;
///         }
///         Ok(builder.build())
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the document and converts it into a schema graph.
    fn into_graph(self) -> Result<SchemaGraph, ConversionError>;
}
