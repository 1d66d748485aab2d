use super::NodeId;
use super::payload::{self, OrderingPayload};
use crate::error::ConversionError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The annotation kinds this crate knows how to build and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationKind {
    /// Describes how to restore the order of interleaved list elements.
    Ordering,
    /// Marks a member that is populated by the deserializer, never read from the wire.
    SynthesizedField,
    /// Human-readable documentation.
    Documentation,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 3] = [
        AnnotationKind::Ordering,
        AnnotationKind::SynthesizedField,
        AnnotationKind::Documentation,
    ];

    /// Namespace every registered kind lives in.
    pub const NAMESPACE: &'static str = "smithy.api";

    /// Name of the kind inside [`AnnotationKind::NAMESPACE`].
    pub fn name(self) -> &'static str {
        match self {
            AnnotationKind::Ordering => "sortOrder",
            AnnotationKind::SynthesizedField => "transient",
            AnnotationKind::Documentation => "documentation",
        }
    }

    /// The fixed id this kind is attached under.
    pub fn id(self) -> NodeId {
        NodeId::new(Self::NAMESPACE, self.name())
    }

    /// Looks up the kind registered under `id`, if any.
    pub fn from_id(id: &NodeId) -> Option<Self> {
        if id.is_member() || id.namespace() != Self::NAMESPACE {
            return None;
        }
        Self::ALL.into_iter().find(|kind| kind.name() == id.name())
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Structured metadata attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Ordering(OrderingPayload),
    SynthesizedField,
    Documentation(String),
    /// An annotation this crate does not interpret. Carried through rewrites untouched.
    Opaque { id: NodeId, value: Value },
}

impl Annotation {
    pub fn kind(&self) -> Option<AnnotationKind> {
        match self {
            Annotation::Ordering(_) => Some(AnnotationKind::Ordering),
            Annotation::SynthesizedField => Some(AnnotationKind::SynthesizedField),
            Annotation::Documentation(_) => Some(AnnotationKind::Documentation),
            Annotation::Opaque { .. } => None,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Annotation::Ordering(_) => AnnotationKind::Ordering.id(),
            Annotation::SynthesizedField => AnnotationKind::SynthesizedField.id(),
            Annotation::Documentation(_) => AnnotationKind::Documentation.id(),
            Annotation::Opaque { id, .. } => id.clone(),
        }
    }

    /// Encodes the payload as the value tree downstream generators read.
    pub fn to_value(&self) -> Value {
        match self {
            Annotation::Ordering(payload) => payload.to_value(),
            Annotation::SynthesizedField => payload::synthesized_marker_payload(),
            Annotation::Documentation(text) => Value::String(text.clone()),
            Annotation::Opaque { value, .. } => value.clone(),
        }
    }

    /// Decodes an annotation through the registry. Unregistered ids become `Opaque`.
    pub fn from_value(id: NodeId, value: Value) -> Result<Self, ConversionError> {
        let malformed = |id: &NodeId, message: String| ConversionError::AnnotationPayload {
            id: id.clone(),
            message,
        };

        match AnnotationKind::from_id(&id) {
            Some(AnnotationKind::Ordering) => serde_json::from_value(value)
                .map(Annotation::Ordering)
                .map_err(|e| malformed(&id, e.to_string())),
            Some(AnnotationKind::SynthesizedField) => match value {
                Value::Object(_) | Value::Null => Ok(Annotation::SynthesizedField),
                other => Err(malformed(&id, format!("expected an object, found {}", other))),
            },
            Some(AnnotationKind::Documentation) => match value {
                Value::String(text) => Ok(Annotation::Documentation(text)),
                other => Err(malformed(&id, format!("expected a string, found {}", other))),
            },
            None => Ok(Annotation::Opaque { id, value }),
        }
    }
}

/// The annotations attached to a node, keyed by annotation id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    entries: BTreeMap<NodeId, Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `annotation`, returning the one it replaced under the same id.
    pub fn insert(&mut self, annotation: Annotation) -> Option<Annotation> {
        self.entries.insert(annotation.id(), annotation)
    }

    pub fn get(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.entries.get(&kind.id())
    }

    pub fn get_by_id(&self, id: &NodeId) -> Option<&Annotation> {
        self.entries.get(id)
    }

    pub fn contains(&self, kind: AnnotationKind) -> bool {
        self.entries.contains_key(&kind.id())
    }

    pub fn ordering(&self) -> Option<&OrderingPayload> {
        match self.get(AnnotationKind::Ordering) {
            Some(Annotation::Ordering(payload)) => Some(payload),
            _ => None,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        let mut set = AnnotationSet::new();
        for annotation in iter {
            set.insert(annotation);
        }
        set
    }
}

impl Extend<Annotation> for AnnotationSet {
    fn extend<I: IntoIterator<Item = Annotation>>(&mut self, iter: I) {
        for annotation in iter {
            self.insert(annotation);
        }
    }
}
