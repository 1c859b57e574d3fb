use std::env;
use std::path::PathBuf;

use feederbook_core::DEFAULT_OUTPUT_FILE;
use feederbook_eval::{evaluate_workbook, render_report};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

    let metrics = evaluate_workbook(&path)?;
    println!("{}", render_report(&metrics));
    Ok(())
}
