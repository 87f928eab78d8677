//! Preset listing command.

use filtergraph_config::{FilterSpec, Overrides};

pub fn run() -> anyhow::Result<()> {
    println!("Available presets:\n");
    for name in FilterSpec::names() {
        let spec = FilterSpec::preset(name, Overrides::default())?;
        println!("  {name:<10} {}", spec.describe());
    }
    println!("\nDefault: {}", FilterSpec::default().name());
    Ok(())
}
