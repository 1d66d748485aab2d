use crate::error::TransformError;
use crate::model::NodeId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The shapes and names a sort-order rewrite operates on.
///
/// Defaults describe the S3 `ListObjectVersions` response, whose `DeleteMarkers`
/// and `Versions` lists arrive interleaved on the wire but are split apart when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteTargets {
    /// Service that must be present for the rewrite to apply.
    pub service: NodeId,
    /// Response structure that receives the ordering annotation.
    pub response: NodeId,
    /// Element structures that receive the counter member.
    pub elements: Vec<NodeId>,
    /// Reserved id of the integer scalar typing the counter member.
    pub counter_type: NodeId,
    /// Name of the counter member added to each element structure.
    pub counter_member: String,
    /// Literal the deserializer seeds the counter with.
    pub initial_value: String,
    /// Response members holding the element lists, in wire order.
    pub containers: Vec<String>,
    /// Element member the counter order agrees with; only used in documentation.
    pub timestamp_member: String,
}

impl Default for RewriteTargets {
    fn default() -> Self {
        Self {
            service: NodeId::new("com.amazonaws.s3", "AmazonS3"),
            response: NodeId::new("smithy.go.synthetic", "ListObjectVersionsOutput"),
            elements: vec![
                NodeId::new("com.amazonaws.s3", "DeleteMarkerEntry"),
                NodeId::new("com.amazonaws.s3", "ObjectVersion"),
            ],
            counter_type: NodeId::new("com.amazonaws.s3", "SortOrderInteger"),
            counter_member: "SortOrder".to_string(),
            initial_value: "int32(0)".to_string(),
            containers: vec!["DeleteMarkers".to_string(), "Versions".to_string()],
            timestamp_member: "LastModified".to_string(),
        }
    }
}

impl RewriteTargets {
    /// Checks that the response, the elements and the counter type are distinct shapes.
    pub fn validate(&self) -> Result<(), TransformError> {
        let conflict = |id: &NodeId, reason: &'static str| TransformError::ConflictingTargets {
            id: id.clone(),
            reason,
        };

        if self.elements.contains(&self.response) {
            return Err(conflict(&self.response, "the response is also listed as an element"));
        }
        if let Some(id) = self.elements.iter().duplicates().next() {
            return Err(conflict(id, "the element is listed more than once"));
        }
        if self.counter_type == self.response || self.elements.contains(&self.counter_type) {
            return Err(conflict(
                &self.counter_type,
                "the counter type is also a rewritten structure",
            ));
        }
        Ok(())
    }
}
