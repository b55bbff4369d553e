//! Print the JSON Schema of the config file
//!
//! Usage: cargo run --features dev-bins --bin generate_schema > config.schema.json

use kite::Config;

fn main() -> Result<(), serde_json::Error> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
