use std::env;

use silhouette_core::{Candidate, ParameterGroup};
use silhouette_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut selection = Vec::new();
    let mut seed = 0_u64;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                seed = args.next().ok_or("missing --seed value")?.parse()?;
            }
            flag if flag.starts_with("--") => {
                let group: ParameterGroup = flag.trim_start_matches("--").parse()?;
                selection.push((group, args.next()));
            }
            _ => return Err("unexpected argument".into()),
        }
    }

    let base = Candidate::from_selection(
        selection
            .iter()
            .map(|(group, value)| (*group, value.as_deref())),
    )?;

    let engine = GenerationEngine::new(GenerateOptions::default())?;
    let result = engine.run(&base, seed);

    for (index, candidate) in result.candidates.iter().enumerate() {
        println!("{}", candidate.describe(index + 1));
    }
    println!("{}", serde_json::to_string_pretty(&result.report.counters)?);
    Ok(())
}
