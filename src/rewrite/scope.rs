use crate::model::{NodeId, SchemaGraph};

/// True iff `service` names a service node of `graph`.
pub fn contains_service(graph: &SchemaGraph, service: &NodeId) -> bool {
    graph.get(service).is_some_and(|node| node.is_service())
}
