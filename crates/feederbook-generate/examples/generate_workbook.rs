use std::env;
use std::path::PathBuf;

use feederbook_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                options.output_path = args.next().map(PathBuf::from).ok_or("missing --out path")?
            }
            "--sheet" => options.sheet_name = args.next().ok_or("missing --sheet name")?,
            _ => return Err("unexpected argument".into()),
        }
    }

    let engine = GenerationEngine::new(options);
    let result = engine.run()?;

    println!(
        "output={} rows={}",
        result.report.output_path.display(),
        result.report.rows_written
    );
    Ok(())
}
