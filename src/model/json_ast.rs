//! Reading and writing the Smithy JSON AST.
//!
//! Only the fields the rewrite interprets are decoded into typed node fields. Every
//! other field of a shape is kept in the node's extra fields, and shape types
//! without a dedicated node kind become [`Node::Other`], so a model survives a
//! load/save cycle without losing data.

use super::{
    Annotation, AnnotationSet, ExtraFields, IntoGraph, ListNode, MemberNode, Node, NodeId,
    OperationNode, OtherNode, ScalarKind, ScalarNode, SchemaGraph, ServiceNode, StructureNode,
};
use crate::error::ConversionError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// Model format version written by [`to_json_ast`].
pub const SMITHY_VERSION: &str = "2.0";

/// A Smithy JSON AST document as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonAstModel {
    #[serde(default)]
    smithy: Option<String>,
    #[serde(default)]
    metadata: Option<Value>,
    #[serde(default)]
    shapes: Map<String, Value>,
}

impl JsonAstModel {
    /// The `smithy` version field of the document, if present.
    pub fn version(&self) -> Option<&str> {
        self.smithy.as_deref()
    }

    /// Model metadata. It is not part of the schema graph.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }
}

#[derive(Deserialize)]
struct RawShape {
    #[serde(rename = "type")]
    shape_type: String,
    #[serde(default)]
    traits: Map<String, Value>,
    #[serde(flatten)]
    rest: ExtraFields,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMember {
    target: String,
    #[serde(default)]
    traits: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawTarget {
    target: String,
}

fn parse_id(raw: &str) -> Result<NodeId, ConversionError> {
    Ok(NodeId::parse(raw)?)
}

fn parse_annotations(traits: Map<String, Value>) -> Result<AnnotationSet, ConversionError> {
    traits
        .into_iter()
        .map(|(id, value)| Annotation::from_value(parse_id(&id)?, value))
        .collect()
}

fn parse_member(id: NodeId, raw: Value) -> Result<MemberNode, ConversionError> {
    let raw: RawMember = serde_json::from_value(raw)
        .map_err(|e| ConversionError::ValidationError(format!("member '{}': {}", id, e)))?;
    Ok(MemberNode {
        id,
        target: parse_id(&raw.target)?,
        annotations: parse_annotations(raw.traits)?,
    })
}

/// Removes `key` from `fields` and decodes it.
fn take<T: DeserializeOwned>(
    fields: &mut ExtraFields,
    key: &str,
    shape: &NodeId,
) -> Result<Option<T>, ConversionError> {
    fields
        .remove(key)
        .map(|value| {
            serde_json::from_value(value).map_err(|e| {
                ConversionError::ValidationError(format!("shape '{}' field '{}': {}", shape, key, e))
            })
        })
        .transpose()
}

fn take_target(
    fields: &mut ExtraFields,
    key: &str,
    shape: &NodeId,
) -> Result<Option<NodeId>, ConversionError> {
    take::<RawTarget>(fields, key, shape)?
        .map(|t| parse_id(&t.target))
        .transpose()
}

impl IntoGraph for JsonAstModel {
    fn into_graph(self) -> Result<SchemaGraph, ConversionError> {
        if let Some(version) = &self.smithy {
            if !version.starts_with('2') {
                tracing::warn!(version = %version, "model version is not 2.x");
            }
        }

        let mut builder = SchemaGraph::builder();
        for (raw_id, raw_shape) in self.shapes {
            let id = parse_id(&raw_id)?;
            let RawShape {
                shape_type,
                traits,
                mut rest,
            } = serde_json::from_value(raw_shape)
                .map_err(|e| ConversionError::ValidationError(format!("shape '{}': {}", id, e)))?;
            let annotations = parse_annotations(traits)?;

            let node = match shape_type.as_str() {
                "structure" => {
                    let members: Map<String, Value> =
                        take(&mut rest, "members", &id)?.unwrap_or_default();
                    let mut structure = StructureNode::builder(id.clone())
                        .annotations(annotations.iter().cloned());
                    for (name, raw_member) in members {
                        structure = structure.add_member(&name)?;
                        let member = parse_member(id.with_member(&name), raw_member)?;
                        builder.add_node(Node::Member(member))?;
                    }
                    Node::Structure(structure.extra(rest).build())
                }
                "list" => {
                    let raw_member: Value = take(&mut rest, "member", &id)?.ok_or_else(|| {
                        ConversionError::ValidationError(format!("list '{}' has no member", id))
                    })?;
                    let member = parse_member(id.with_member("member"), raw_member)?;
                    let list = ListNode {
                        id,
                        member: member.id.clone(),
                        annotations,
                        extra: rest,
                    };
                    builder.add_node(Node::Member(member))?;
                    Node::List(list)
                }
                "service" => {
                    let version = take(&mut rest, "version", &id)?;
                    let operations: Vec<RawTarget> =
                        take(&mut rest, "operations", &id)?.unwrap_or_default();
                    Node::Service(ServiceNode {
                        id,
                        version,
                        operations: operations
                            .iter()
                            .map(|op| parse_id(&op.target))
                            .collect::<Result<_, _>>()?,
                        annotations,
                        extra: rest,
                    })
                }
                "operation" => Node::Operation(OperationNode {
                    input: take_target(&mut rest, "input", &id)?,
                    output: take_target(&mut rest, "output", &id)?,
                    id,
                    annotations,
                    extra: rest,
                }),
                other => match ScalarKind::from_name(other) {
                    Some(kind) => Node::Scalar(ScalarNode {
                        id,
                        kind,
                        annotations,
                        extra: rest,
                    }),
                    None => Node::Other(OtherNode {
                        id,
                        kind: other.to_string(),
                        annotations,
                        body: rest,
                    }),
                },
            };
            builder.add_node(node)?;
        }
        Ok(builder.build())
    }
}

fn traits_value(annotations: &AnnotationSet) -> Value {
    Value::Object(
        annotations
            .iter()
            .map(|a| (a.id().to_string(), a.to_value()))
            .collect(),
    )
}

fn member_value(member: &MemberNode) -> Value {
    let mut value = json!({ "target": member.target.to_string() });
    if !member.annotations.is_empty() {
        value["traits"] = traits_value(&member.annotations);
    }
    value
}

fn target_value(id: &NodeId) -> Value {
    json!({ "target": id.to_string() })
}

/// Renders `graph` as a Smithy JSON AST document.
///
/// Member nodes are written inside their parent shape. Shapes are emitted in
/// lexical id order, members in declaration order.
pub fn to_json_ast(graph: &SchemaGraph) -> Value {
    let mut shapes = Map::new();
    for id in graph.ids_sorted() {
        let Some(node) = graph.get(id) else { continue };
        let mut shape = Map::new();
        shape.insert("type".to_string(), Value::from(node.kind_name()));

        let extra = match node.as_ref() {
            Node::Member(_) => continue,
            Node::Structure(structure) => {
                let members: Map<String, Value> = graph
                    .members_of(id)
                    .into_iter()
                    .map(|(name, member)| (name.to_string(), member_value(member)))
                    .collect();
                if !members.is_empty() {
                    shape.insert("members".to_string(), Value::Object(members));
                }
                structure.extra()
            }
            Node::List(list) => {
                if let Some(member) = graph.get(&list.member).and_then(|n| n.as_member()) {
                    shape.insert("member".to_string(), member_value(member));
                }
                &list.extra
            }
            Node::Scalar(scalar) => &scalar.extra,
            Node::Service(service) => {
                if let Some(version) = &service.version {
                    shape.insert("version".to_string(), Value::from(version.as_str()));
                }
                if !service.operations.is_empty() {
                    let operations = service.operations.iter().map(target_value).collect();
                    shape.insert("operations".to_string(), Value::Array(operations));
                }
                &service.extra
            }
            Node::Operation(op) => {
                if let Some(input) = &op.input {
                    shape.insert("input".to_string(), target_value(input));
                }
                if let Some(output) = &op.output {
                    shape.insert("output".to_string(), target_value(output));
                }
                &op.extra
            }
            Node::Other(other) => &other.body,
        };
        shape.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        if !node.annotations().is_empty() {
            shape.insert("traits".to_string(), traits_value(node.annotations()));
        }
        shapes.insert(id.to_string(), Value::Object(shape));
    }
    json!({ "smithy": SMITHY_VERSION, "shapes": shapes })
}
