use clap::Parser;
use junban::model::{IntoGraph, JsonAstModel, NodeId, to_json_ast};
use junban::rewrite::{RewriteTargets, SortOrderRewrite};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Applies the sort-order rewrite to a Smithy JSON AST model
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the model JSON file
    model_path: String,

    /// Id of the service being generated, e.g. com.amazonaws.s3#AmazonS3
    #[arg(short, long)]
    service: String,

    /// Optional JSON file overriding the rewrite targets
    #[arg(short, long)]
    targets: Option<String>,

    /// Write the rewritten model here instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Loading ---
    let model_json = fs::read_to_string(&cli.model_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read model file '{}': {}",
            &cli.model_path, e
        ))
    });
    let targets = match &cli.targets {
        Some(path) => {
            let raw = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read targets file '{}': {}", path, e))
            });
            serde_json::from_str::<RewriteTargets>(&raw)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse targets JSON: {}", e)))
        }
        None => RewriteTargets::default(),
    };
    let service = NodeId::parse(&cli.service)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid service id: {}", e)));

    // --- 2. Parsing and Conversion ---
    let model: JsonAstModel = serde_json::from_str(&model_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse model JSON: {}", e)));
    let metadata = model.metadata().cloned();
    let graph = model
        .into_graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert model to graph: {}", e)));

    // --- 3. Rewrite ---
    let rewrite = SortOrderRewrite::builder().with_targets(targets).build();
    rewrite
        .targets()
        .validate()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid rewrite targets: {}", e)));
    let rewrite_start = Instant::now();
    let rewritten = rewrite
        .transform(&graph, &service)
        .unwrap_or_else(|e| exit_with_error(&format!("Rewrite failed: {}", e)));
    tracing::info!(
        nodes_before = graph.len(),
        nodes_after = rewritten.len(),
        elapsed = ?rewrite_start.elapsed(),
        "rewrite finished"
    );

    // --- 4. Output ---
    let mut document = to_json_ast(&rewritten);
    if let Some(metadata) = metadata {
        document["metadata"] = metadata;
    }
    let rendered = serde_json::to_string_pretty(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to render model JSON: {}", e)));
    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e))),
        None => println!("{}", rendered),
    }
    tracing::debug!(elapsed = ?total_start.elapsed(), "done");
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
