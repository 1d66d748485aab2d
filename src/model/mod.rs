pub mod annotation;
pub mod conversion;
pub mod graph;
pub mod id;
pub mod json_ast;
pub mod node;
pub mod payload;

pub use annotation::*;
pub use conversion::*;
pub use graph::*;
pub use id::*;
pub use json_ast::{JsonAstModel, to_json_ast};
pub use node::*;
pub use payload::OrderingPayload;
