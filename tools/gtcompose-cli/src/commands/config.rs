//! Show or persist the effective configuration.

use gtcompose_common::config::ComposeConfig;

pub fn run(config: &ComposeConfig, save: bool) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    if save {
        config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
        tracing::info!("Configuration saved");
    }

    Ok(())
}
