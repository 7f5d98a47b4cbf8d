use schemars::schema_for;
use silhouette_core::Candidate;

fn main() {
    let schema = schema_for!(Candidate);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
