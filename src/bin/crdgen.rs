//! # CRD Generator
//!
//! Generates the Kubernetes CustomResourceDefinition for `Wordpress` from the
//! Rust type definitions.
//!
//! ## Usage
//!
//! ```bash
//! # Generate CRD YAML
//! cargo run --bin crdgen > config/crd/wordpress.yaml
//!
//! # Generate and apply directly
//! cargo run --bin crdgen | kubectl apply -f -
//!
//! # JSON instead of YAML
//! cargo run --bin crdgen -- --format json
//! ```

use clap::{Parser, ValueEnum};
use kube::core::CustomResourceExt;
use wordpress_operator::crd::Wordpress;

const GENERATED_HEADER: &str =
    "# This file is auto-generated by crdgen\n# DO NOT EDIT THIS FILE MANUALLY\n";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "crdgen")]
#[command(about = "Print the Wordpress CustomResourceDefinition", long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    format: Format,
}

fn main() {
    let args = Args::parse();
    let crd = Wordpress::crd();

    let rendered = match args.format {
        Format::Yaml => serde_yaml::to_string(&crd)
            .map(|yaml| format!("{GENERATED_HEADER}---\n{yaml}"))
            .map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(&crd)
            .map(|json| format!("{json}\n"))
            .map_err(|e| e.to_string()),
    };

    match rendered {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Failed to serialize CRD: {e}");
            std::process::exit(1);
        }
    }
}
