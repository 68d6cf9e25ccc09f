//! Render Form 'A' once to the configured output path.

use anyhow::Context;
use mediation_form_server::form::Generator;
use mediation_form_server::{config::ServerConfig, init_logging, state::build_generator};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let generator = build_generator(&config)?;
    let rendered = generator
        .generate()
        .with_context(|| format!("failed to generate {}", config.output_path().display()))?;

    println!("File created successfully: {}", rendered.path.display());
    Ok(())
}
