//! Generate CATALOG.md from the calculator catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-catalog
//! ```
//!
//! The generated file is written to `estimate_core/src/catalog/CATALOG.md`.

use std::fs;
use std::path::Path;

use estimate_core::catalog::generate_catalog_markdown;

fn main() {
    println!("Generating CATALOG.md...");

    let markdown = generate_catalog_markdown();
    let output_path = Path::new("estimate_core/src/catalog/CATALOG.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
