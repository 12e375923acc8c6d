use anyhow::Context;
use vet_config::VetConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConfigArgs;
use crate::output::output;

/// Handle `vetrec config`.
pub fn handle(args: &ConfigArgs, config: &VetConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.toml {
        let rendered =
            toml::to_string_pretty(config).context("failed to render configuration as TOML")?;
        print!("{rendered}");
        return Ok(());
    }

    output(config, flags.format)
}
