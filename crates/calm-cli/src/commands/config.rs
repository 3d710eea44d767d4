use clap::Subcommand;
use calm_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting (e.g. "tick_interval_ms", "box_breathing.cycles")
    Get { key: String },
    /// Change one setting and write the config file
    Set { key: String, value: String },
    /// Print every setting as JSON
    List,
    /// Overwrite the config file with defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let output = match action {
        ConfigAction::Get { key } => Config::load()?
            .get(&key)
            .ok_or(ConfigError::UnknownKey(key))?,
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "config updated");
            "ok".to_string()
        }
        ConfigAction::List => serde_json::to_string_pretty(&Config::load()?)?,
        ConfigAction::Reset => {
            Config::default().save()?;
            "config reset to defaults".to_string()
        }
        ConfigAction::Path => Config::path()?.display().to_string(),
    };
    println!("{output}");
    Ok(())
}
