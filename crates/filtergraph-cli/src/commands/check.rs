//! Configuration validation command.

use clap::Args;
use filtergraph_config::FilterConfig;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Filter configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = FilterConfig::load(&args.config)?;
    let mut filter = config.build()?;
    filter.check()?;

    let label = config.name.as_deref().unwrap_or(config.filter.name());
    println!(
        "{}: {} ({}), {} input(s), {} output(s)",
        args.config.display(),
        label,
        config.filter.describe(),
        filter.nb_inputs(),
        filter.nb_outputs()
    );
    println!("OK");
    Ok(())
}
