//! Common test utilities for building schema graphs.
use junban::model::{ExtraFields, ListNode, OperationNode, ServiceNode};
use junban::prelude::*;

#[allow(dead_code)]
pub const S3: &str = "com.amazonaws.s3";

#[allow(dead_code)]
pub fn s3_id(name: &str) -> NodeId {
    NodeId::new(S3, name)
}

#[allow(dead_code)]
pub fn service_id() -> NodeId {
    s3_id("AmazonS3")
}

#[allow(dead_code)]
pub fn response_id() -> NodeId {
    NodeId::new("smithy.go.synthetic", "ListObjectVersionsOutput")
}

#[allow(dead_code)]
pub fn delete_marker_id() -> NodeId {
    s3_id("DeleteMarkerEntry")
}

#[allow(dead_code)]
pub fn version_id() -> NodeId {
    s3_id("ObjectVersion")
}

#[allow(dead_code)]
pub fn counter_type_id() -> NodeId {
    s3_id("SortOrderInteger")
}

/// An annotation the rewrite does not know about.
#[allow(dead_code)]
pub fn xml_name(name: &str) -> Annotation {
    Annotation::Opaque {
        id: NodeId::new("smithy.api", "xmlName"),
        value: serde_json::json!(name),
    }
}

#[allow(dead_code)]
fn add_scalar(builder: &mut junban::model::GraphBuilder, id: NodeId, kind: ScalarKind) {
    builder
        .add_node(Node::Scalar(ScalarNode::new(id, kind)))
        .expect("scalar id is unique");
}

/// Adds a structure and its member nodes. `members` are `(name, target)` pairs.
#[allow(dead_code)]
fn add_structure(
    builder: &mut junban::model::GraphBuilder,
    id: NodeId,
    members: &[(&str, NodeId)],
    annotations: Vec<Annotation>,
) {
    let mut structure = StructureNode::builder(id.clone()).annotations(annotations);
    for (name, target) in members {
        structure = structure.add_member(name).expect("member names are unique");
        builder
            .add_node(Node::Member(MemberNode::new(
                id.with_member(*name),
                target.clone(),
            )))
            .expect("member id is unique");
    }
    builder
        .add_node(Node::Structure(structure.build()))
        .expect("structure id is unique");
}

#[allow(dead_code)]
fn add_list(builder: &mut junban::model::GraphBuilder, id: NodeId, element: NodeId) {
    let member = MemberNode::new(id.with_member("member"), element);
    let list = ListNode {
        id,
        member: member.id.clone(),
        annotations: AnnotationSet::new(),
        extra: ExtraFields::new(),
    };
    builder.add_node(Node::Member(member)).expect("unique");
    builder.add_node(Node::List(list)).expect("unique");
}

/// Builds a trimmed-down S3 model around `ListObjectVersions`.
///
/// The response carries the given annotations; the element shapes have no
/// counter member yet.
#[allow(dead_code)]
pub fn create_s3_graph_with(response_annotations: Vec<Annotation>) -> SchemaGraph {
    let mut builder = SchemaGraph::builder();

    add_scalar(&mut builder, s3_id("ObjectKey"), ScalarKind::String);
    add_scalar(&mut builder, s3_id("LastModified"), ScalarKind::Timestamp);
    add_scalar(&mut builder, s3_id("IsLatest"), ScalarKind::Boolean);

    add_structure(
        &mut builder,
        delete_marker_id(),
        &[
            ("Key", s3_id("ObjectKey")),
            ("IsLatest", s3_id("IsLatest")),
            ("LastModified", s3_id("LastModified")),
        ],
        vec![],
    );
    add_structure(
        &mut builder,
        version_id(),
        &[
            ("Key", s3_id("ObjectKey")),
            ("LastModified", s3_id("LastModified")),
        ],
        vec![Annotation::Documentation("The version of an object.".to_string())],
    );
    add_structure(
        &mut builder,
        s3_id("Owner"),
        &[("DisplayName", s3_id("ObjectKey"))],
        vec![],
    );

    add_list(&mut builder, s3_id("DeleteMarkers"), delete_marker_id());
    add_list(&mut builder, s3_id("ObjectVersionList"), version_id());

    add_structure(
        &mut builder,
        response_id(),
        &[
            ("Name", s3_id("ObjectKey")),
            ("DeleteMarkers", s3_id("DeleteMarkers")),
            ("Versions", s3_id("ObjectVersionList")),
        ],
        response_annotations,
    );
    add_structure(
        &mut builder,
        s3_id("ListObjectVersionsRequest"),
        &[("Bucket", s3_id("ObjectKey"))],
        vec![],
    );

    builder
        .add_node(Node::Operation(OperationNode {
            id: s3_id("ListObjectVersions"),
            input: Some(s3_id("ListObjectVersionsRequest")),
            output: Some(response_id()),
            annotations: AnnotationSet::new(),
            extra: ExtraFields::new(),
        }))
        .expect("unique");
    builder
        .add_node(Node::Service(ServiceNode {
            id: service_id(),
            version: Some("2006-03-01".to_string()),
            operations: vec![s3_id("ListObjectVersions")],
            annotations: AnnotationSet::new(),
            extra: ExtraFields::new(),
        }))
        .expect("unique");

    builder.build()
}

/// The S3 model with an unannotated response shape.
#[allow(dead_code)]
pub fn create_s3_graph() -> SchemaGraph {
    create_s3_graph_with(vec![])
}

/// A graph with the same shapes but no service node at all.
#[allow(dead_code)]
pub fn create_serviceless_graph() -> SchemaGraph {
    let graph = create_s3_graph();
    let mut builder = SchemaGraph::builder();
    for node in graph.nodes().filter(|n| !n.is_service()) {
        builder.add_shared(node.clone()).expect("unique");
    }
    builder.build()
}
