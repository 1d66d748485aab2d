use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a schema-graph node: `namespace#Name`, optionally
/// followed by `$member` for member nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    namespace: String,
    name: String,
    member: Option<String>,
}

impl NodeId {
    /// Builds a top-level id. Callers are responsible for passing non-empty parts.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            member: None,
        }
    }

    /// Parses the absolute `namespace#Name[$member]` form.
    pub fn parse(input: &str) -> Result<Self, GraphError> {
        let invalid = |reason: &str| GraphError::InvalidNodeId {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (namespace, rest) = input
            .split_once('#')
            .ok_or_else(|| invalid("missing '#' namespace separator"))?;
        let (name, member) = match rest.split_once('$') {
            Some((name, member)) => (name, Some(member)),
            None => (rest, None),
        };

        if namespace.is_empty() {
            return Err(invalid("empty namespace"));
        }
        if name.is_empty() {
            return Err(invalid("empty shape name"));
        }
        if member.is_some_and(str::is_empty) {
            return Err(invalid("empty member name"));
        }
        if [namespace, name]
            .iter()
            .chain(member.iter())
            .any(|part| part.contains(['#', '$']) || part.chars().any(char::is_whitespace))
        {
            return Err(invalid("unexpected separator or whitespace"));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            member: member.map(str::to_string),
        })
    }

    /// Returns the id of member `member` of this node. Any existing member suffix is replaced.
    pub fn with_member(&self, member: impl Into<String>) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            member: Some(member.into()),
        }
    }

    /// The id without its member suffix.
    pub fn root(&self) -> Self {
        Self::new(self.namespace.clone(), self.name.clone())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    pub fn is_member(&self) -> bool {
        self.member.is_some()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)?;
        if let Some(member) = &self.member {
            write!(f, "${}", member)?;
        }
        Ok(())
    }
}

impl FromStr for NodeId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NodeId {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}
