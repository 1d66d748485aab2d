//! Value constructors for annotation payloads and the documentation attached
//! to synthesized members.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Payload of the ordering annotation.
///
/// The serialized keys are the contract read by code generators:
/// `targetMemberName`, `initValue` and `targetContainerNames`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderingPayload {
    /// Name of the synthesized counter member on each element shape.
    #[serde(rename = "targetMemberName")]
    pub counter_field: String,
    /// Literal the generated deserializer seeds the counter with, e.g. `int32(0)`.
    #[serde(rename = "initValue")]
    pub initial_value: String,
    /// List members of the response whose elements share the counter, in order.
    #[serde(rename = "targetContainerNames")]
    pub container_fields: Vec<String>,
}

impl OrderingPayload {
    pub fn new<S: Into<String>>(
        counter_field: impl Into<String>,
        initial_value: impl Into<String>,
        container_fields: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            counter_field: counter_field.into(),
            initial_value: initial_value.into(),
            container_fields: container_fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "targetMemberName": self.counter_field,
            "initValue": self.initial_value,
            "targetContainerNames": self.container_fields,
        })
    }
}

/// The fixed payload of the synthesized-field marker.
pub fn synthesized_marker_payload() -> Value {
    json!({ "ID": "transient" })
}

/// Documentation for the counter member, stating the ordering contract between
/// elements of every container named in `payload`.
pub fn ordering_documentation(payload: &OrderingPayload, timestamp_member: &str) -> String {
    let counter = &payload.counter_field;
    let containers = payload.container_fields.iter().join(" and ");
    format!(
        "The {counter} can be used to bring the elements of {containers} into chronological order. \
         For any two elements e1 and e2 of these lists, if e1.{counter} > e2.{counter} \
         then e1.{timestamp_member} >= e2.{timestamp_member}."
    )
}
