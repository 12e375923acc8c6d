use anyhow::Context;

/// Load `.env` from the current directory (if present), then the layered config.
pub fn load_config() -> anyhow::Result<vet_config::VetConfig> {
    vet_config::VetConfig::load_with_dotenv().context("failed to load vetrec configuration")
}
