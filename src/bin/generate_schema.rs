//! Schema generator for the demo GraphQL schema.
//!
//! This binary writes the SDL of the schema served by the Lambda function,
//! for clients and code generators. The output path defaults to
//! `schema.graphql` and can be given as the first argument.

use alb_graphql_lambda::schema::build_schema;
use std::fs;

const DEFAULT_OUTPUT_PATH: &str = "schema.graphql";

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
    let sdl = build_schema().sdl();

    fs::write(&output_path, &sdl).unwrap_or_else(|e| {
        eprintln!("Failed to write {output_path}: {e}");
        std::process::exit(1);
    });

    println!("✅ Generated {output_path} ({} bytes)", sdl.len());
}
