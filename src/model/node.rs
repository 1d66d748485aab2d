use super::{Annotation, AnnotationSet, NodeId};
use crate::error::GraphError;
use serde_json::{Map, Value};
use std::fmt;

/// Model fields a node kind does not interpret, kept verbatim for re-emission.
pub type ExtraFields = Map<String, Value>;

/// Primitive value types a scalar node can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    BigInteger,
    BigDecimal,
    Float,
    Double,
    String,
    Blob,
    Timestamp,
    Document,
}

impl ScalarKind {
    /// Name used in model documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Byte => "byte",
            ScalarKind::Short => "short",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long",
            ScalarKind::BigInteger => "bigInteger",
            ScalarKind::BigDecimal => "bigDecimal",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::String => "string",
            ScalarKind::Blob => "blob",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::Document => "document",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => ScalarKind::Boolean,
            "byte" => ScalarKind::Byte,
            "short" => ScalarKind::Short,
            "integer" => ScalarKind::Integer,
            "long" => ScalarKind::Long,
            "bigInteger" => ScalarKind::BigInteger,
            "bigDecimal" => ScalarKind::BigDecimal,
            "float" => ScalarKind::Float,
            "double" => ScalarKind::Double,
            "string" => ScalarKind::String,
            "blob" => ScalarKind::Blob,
            "timestamp" => ScalarKind::Timestamp,
            "document" => ScalarKind::Document,
            _ => return None,
        })
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureNode {
    id: NodeId,
    members: Vec<(String, NodeId)>,
    annotations: AnnotationSet,
    extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub id: NodeId,
    pub member: NodeId,
    pub annotations: AnnotationSet,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberNode {
    pub id: NodeId,
    pub target: NodeId,
    pub annotations: AnnotationSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarNode {
    pub id: NodeId,
    pub kind: ScalarKind,
    pub annotations: AnnotationSet,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNode {
    pub id: NodeId,
    pub version: Option<String>,
    pub operations: Vec<NodeId>,
    pub annotations: AnnotationSet,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNode {
    pub id: NodeId,
    pub input: Option<NodeId>,
    pub output: Option<NodeId>,
    pub annotations: AnnotationSet,
    pub extra: ExtraFields,
}

/// A node of a kind the rewrite never inspects (map, union, enum, resource, ...).
///
/// `body` holds every model field except the kind and the annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherNode {
    pub id: NodeId,
    pub kind: String,
    pub annotations: AnnotationSet,
    pub body: ExtraFields,
}

/// A typed entity of the schema graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Structure(StructureNode),
    List(ListNode),
    Member(MemberNode),
    Scalar(ScalarNode),
    Service(ServiceNode),
    Operation(OperationNode),
    Other(OtherNode),
}

impl Node {
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Structure(n) => &n.id,
            Node::List(n) => &n.id,
            Node::Member(n) => &n.id,
            Node::Scalar(n) => &n.id,
            Node::Service(n) => &n.id,
            Node::Operation(n) => &n.id,
            Node::Other(n) => &n.id,
        }
    }

    pub fn annotations(&self) -> &AnnotationSet {
        match self {
            Node::Structure(n) => &n.annotations,
            Node::List(n) => &n.annotations,
            Node::Member(n) => &n.annotations,
            Node::Scalar(n) => &n.annotations,
            Node::Service(n) => &n.annotations,
            Node::Operation(n) => &n.annotations,
            Node::Other(n) => &n.annotations,
        }
    }

    /// The shape type written to model documents.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Structure(_) => "structure",
            Node::List(_) => "list",
            Node::Member(_) => "member",
            Node::Scalar(n) => n.kind.as_str(),
            Node::Service(_) => "service",
            Node::Operation(_) => "operation",
            Node::Other(n) => &n.kind,
        }
    }

    pub fn as_structure(&self) -> Option<&StructureNode> {
        match self {
            Node::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<&MemberNode> {
        match self {
            Node::Member(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Node::Service(_))
    }
}

impl MemberNode {
    pub fn new(id: NodeId, target: NodeId) -> Self {
        Self {
            id,
            target,
            annotations: AnnotationSet::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }
}

impl ScalarNode {
    pub fn new(id: NodeId, kind: ScalarKind) -> Self {
        Self {
            id,
            kind,
            annotations: AnnotationSet::new(),
            extra: ExtraFields::new(),
        }
    }
}

impl StructureNode {
    pub fn builder(id: NodeId) -> StructureBuilder {
        StructureBuilder {
            id,
            members: Vec::new(),
            annotations: AnnotationSet::new(),
            extra: ExtraFields::new(),
        }
    }

    /// Starts a builder seeded with every field of this node, members and annotations included.
    pub fn to_builder(&self) -> StructureBuilder {
        StructureBuilder {
            id: self.id.clone(),
            members: self.members.clone(),
            annotations: self.annotations.clone(),
            extra: self.extra.clone(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Members in declaration order as `(name, member id)`.
    pub fn members(&self) -> &[(String, NodeId)] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&NodeId> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, id)| id)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn extra(&self) -> &ExtraFields {
        &self.extra
    }
}

/// Copy-on-write builder for `StructureNode`.
#[derive(Debug, Clone)]
pub struct StructureBuilder {
    id: NodeId,
    members: Vec<(String, NodeId)>,
    annotations: AnnotationSet,
    extra: ExtraFields,
}

impl StructureBuilder {
    /// Appends member `name`, whose node id is derived from the structure id.
    pub fn add_member(mut self, name: &str) -> Result<Self, GraphError> {
        if self.members.iter().any(|(member, _)| member == name) {
            return Err(GraphError::DuplicateMember {
                parent: self.id.clone(),
                member: name.to_string(),
            });
        }
        let member_id = self.id.with_member(name);
        self.members.push((name.to_string(), member_id));
        Ok(self)
    }

    /// Attaches `annotation`, replacing any annotation with the same id.
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    pub fn annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Sets the uninterpreted model fields, e.g. `mixins`.
    pub fn extra(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }

    pub fn build(self) -> StructureNode {
        StructureNode {
            id: self.id,
            members: self.members,
            annotations: self.annotations,
            extra: self.extra,
        }
    }
}
