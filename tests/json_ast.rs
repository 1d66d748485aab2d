//! Tests for loading and writing Smithy JSON AST models.
mod common;
use common::*;
use junban::prelude::*;
use serde_json::{Value, json};

/// A slice of the S3 model, including shape types the rewrite never inspects.
fn s3_model() -> Value {
    json!({
        "smithy": "2.0",
        "shapes": {
            "com.amazonaws.s3#AmazonS3": {
                "type": "service",
                "version": "2006-03-01",
                "operations": [{ "target": "com.amazonaws.s3#ListObjectVersions" }],
                "resources": [{ "target": "com.amazonaws.s3#Bucket" }],
                "traits": { "aws.api#service": { "sdkId": "S3" } }
            },
            "com.amazonaws.s3#Bucket": {
                "type": "resource",
                "identifiers": { "Bucket": { "target": "com.amazonaws.s3#BucketName" } }
            },
            "com.amazonaws.s3#BucketName": { "type": "string" },
            "com.amazonaws.s3#ListObjectVersions": {
                "type": "operation",
                "input": { "target": "com.amazonaws.s3#ListObjectVersionsRequest" },
                "output": { "target": "smithy.go.synthetic#ListObjectVersionsOutput" },
                "errors": [{ "target": "com.amazonaws.s3#NoSuchBucket" }]
            },
            "com.amazonaws.s3#NoSuchBucket": {
                "type": "structure",
                "traits": { "smithy.api#error": "client" }
            },
            "com.amazonaws.s3#ListObjectVersionsRequest": {
                "type": "structure",
                "members": {
                    "Bucket": {
                        "target": "com.amazonaws.s3#BucketName",
                        "traits": { "smithy.api#required": {} }
                    }
                }
            },
            "smithy.go.synthetic#ListObjectVersionsOutput": {
                "type": "structure",
                "members": {
                    "Name": { "target": "com.amazonaws.s3#BucketName" },
                    "DeleteMarkers": { "target": "com.amazonaws.s3#DeleteMarkers" },
                    "Versions": { "target": "com.amazonaws.s3#ObjectVersionList" }
                }
            },
            "com.amazonaws.s3#DeleteMarkers": {
                "type": "list",
                "member": { "target": "com.amazonaws.s3#DeleteMarkerEntry" },
                "traits": { "smithy.api#xmlFlattened": {} }
            },
            "com.amazonaws.s3#ObjectVersionList": {
                "type": "list",
                "member": { "target": "com.amazonaws.s3#ObjectVersion" }
            },
            "com.amazonaws.s3#DeleteMarkerEntry": {
                "type": "structure",
                "members": {
                    "Key": { "target": "com.amazonaws.s3#BucketName" },
                    "LastModified": { "target": "com.amazonaws.s3#LastModified" }
                }
            },
            "com.amazonaws.s3#ObjectVersion": {
                "type": "structure",
                "members": {
                    "Key": { "target": "com.amazonaws.s3#BucketName" },
                    "LastModified": { "target": "com.amazonaws.s3#LastModified" },
                    "StorageClass": { "target": "com.amazonaws.s3#StorageClass" }
                },
                "traits": { "smithy.api#documentation": "The version of an object." }
            },
            "com.amazonaws.s3#LastModified": { "type": "timestamp" },
            "com.amazonaws.s3#Size": { "type": "bigInteger" },
            "com.amazonaws.s3#Metadata": {
                "type": "map",
                "key": { "target": "com.amazonaws.s3#BucketName" },
                "value": { "target": "com.amazonaws.s3#BucketName" }
            },
            "com.amazonaws.s3#StorageClass": {
                "type": "enum",
                "members": {
                    "STANDARD": {
                        "target": "smithy.api#Unit",
                        "traits": { "smithy.api#enumValue": "STANDARD" }
                    }
                }
            },
            "com.amazonaws.s3#Selection": {
                "type": "union",
                "members": {
                    "Csv": { "target": "com.amazonaws.s3#BucketName" }
                }
            },
            "com.amazonaws.s3#Filter": { "type": "document" }
        }
    })
}

fn load(model: Value) -> SchemaGraph {
    let model: JsonAstModel = serde_json::from_value(model).expect("model parses");
    model.into_graph().expect("model converts")
}

#[test]
fn test_load_then_write_keeps_every_field() {
    let graph = load(s3_model());
    assert_eq!(to_json_ast(&graph), s3_model());
}

#[test]
fn test_unmodelled_shape_types_pass_through() {
    let graph = load(s3_model());

    let metadata = graph.get(&s3_id("Metadata")).expect("map shape");
    assert_eq!(metadata.kind_name(), "map");
    match metadata.as_ref() {
        Node::Other(other) => {
            assert_eq!(other.body["key"], json!({ "target": "com.amazonaws.s3#BucketName" }));
        }
        other => panic!("Expected an Other node, found {:?}", other),
    }

    assert_eq!(graph.get(&s3_id("Size")).unwrap().kind_name(), "bigInteger");
    assert_eq!(graph.get(&s3_id("Filter")).unwrap().kind_name(), "document");
    assert!(graph.get(&s3_id("Selection").with_member("Csv")).is_none());
}

#[test]
fn test_rewrite_through_json_ast() {
    let rewritten = transform(&load(s3_model()), &service_id()).expect("rewrite succeeds");
    let document = to_json_ast(&rewritten);
    let shapes = &document["shapes"];

    assert_eq!(shapes["com.amazonaws.s3#SortOrderInteger"], json!({ "type": "integer" }));
    assert_eq!(
        shapes["smithy.go.synthetic#ListObjectVersionsOutput"]["traits"]["smithy.api#sortOrder"],
        json!({
            "targetMemberName": "SortOrder",
            "initValue": "int32(0)",
            "targetContainerNames": ["DeleteMarkers", "Versions"]
        })
    );

    let version = shapes["com.amazonaws.s3#ObjectVersion"]["members"]
        .as_object()
        .expect("members object");
    let names: Vec<&str> = version.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Key", "LastModified", "StorageClass", "SortOrder"]);
    assert_eq!(
        version["SortOrder"]["target"],
        json!("com.amazonaws.s3#SortOrderInteger")
    );
    assert_eq!(
        version["SortOrder"]["traits"]["smithy.api#transient"],
        json!({ "ID": "transient" })
    );

    let original = s3_model();
    for untouched in [
        "com.amazonaws.s3#ListObjectVersions",
        "com.amazonaws.s3#Metadata",
        "com.amazonaws.s3#AmazonS3",
    ] {
        assert_eq!(shapes[untouched], original["shapes"][untouched]);
    }
}

#[test]
fn test_service_without_version_omits_optional_fields() {
    let graph = load(json!({
        "smithy": "2.0",
        "shapes": { "example.weather#Weather": { "type": "service" } }
    }));
    assert_eq!(
        to_json_ast(&graph)["shapes"]["example.weather#Weather"],
        json!({ "type": "service" })
    );
}

#[test]
fn test_rejects_malformed_shapes() {
    let list_without_member: JsonAstModel = serde_json::from_value(json!({
        "shapes": { "example.weather#Cities": { "type": "list" } }
    }))
    .unwrap();
    assert!(matches!(
        list_without_member.into_graph(),
        Err(ConversionError::ValidationError(message)) if message.contains("example.weather#Cities")
    ));

    let bad_member: JsonAstModel = serde_json::from_value(json!({
        "shapes": {
            "example.weather#City": {
                "type": "structure",
                "members": { "Name": { "target": "smithy.api#String", "mixin": true } }
            }
        }
    }))
    .unwrap();
    assert!(bad_member.into_graph().is_err());

    let bad_id: JsonAstModel = serde_json::from_value(json!({
        "shapes": { "NoNamespace": { "type": "string" } }
    }))
    .unwrap();
    assert!(matches!(
        bad_id.into_graph(),
        Err(ConversionError::Graph(GraphError::InvalidNodeId { .. }))
    ));
}
