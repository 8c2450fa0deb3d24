use anyhow::Result;

use crate::config;
use crate::templates::TemplateSet;

pub fn run() -> Result<()> {
    let config_path = config::config_path()?;

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
    } else {
        config::create_default_config(&config_path)?;
        println!("Created {}", config_path.display());
    }

    let templates_dir = config::config_dir()?.join("templates");
    TemplateSet::write_defaults(&templates_dir)?;
    println!("Templates in {}", templates_dir.display());

    println!(
        "\nEdit the config to point at your calendar source, then run:\n  \
        notedir pull"
    );

    Ok(())
}
