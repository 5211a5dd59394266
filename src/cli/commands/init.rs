//! Init command handler

use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Created default config.toml");
    } else {
        println!("config.toml already exists, leaving it alone.");
    }

    Ok(())
}
