use vet_config::VetConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod config;
pub mod doctor;
pub mod ocr;
pub mod schema;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: &Commands,
    config: &VetConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Ocr(args) => ocr::handle(args, config, flags).await,
        Commands::Doctor => doctor::handle(config, flags).await,
        Commands::Config(args) => config::handle(args, config, flags),
        Commands::Schema(args) => schema::handle(args, flags),
    }
}
