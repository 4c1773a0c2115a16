//! Extracts a model from a requirement given as arguments (or stdin) and prints it as JSON.
//!
//! cargo run --bin extract_demo -- "A Customer creates an Order. An Admin is a User."

use std::io::Read;

use req2uml::extract_model;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut requirement = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if requirement.trim().is_empty() {
        std::io::stdin().read_to_string(&mut requirement)?;
    }
    if requirement.trim().is_empty() {
        anyhow::bail!("Requirement is required");
    }

    let model = extract_model(&requirement);
    model.validate()?;
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
