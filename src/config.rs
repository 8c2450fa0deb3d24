use anyhow::{Context, Result};
use notedir_core::NoteDirError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory the generated notes live in
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Directory with template overrides (falls back to the built-ins
    /// for any template file that is missing)
    #[serde(default)]
    pub templates_dir: Option<String>,

    /// How many days ahead to fetch
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    /// Calendar source configuration
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    /// Source binary to run: `notedir-source-{provider}` from PATH
    pub provider: String,

    /// Source-specific settings, passed through to the source binary
    #[serde(default)]
    pub params: HashMap<String, toml::Value>,
}

fn default_vault_dir() -> String {
    "~/notes".to_string()
}

fn default_window_days() -> i64 {
    notedir_core::DEFAULT_WINDOW_DAYS
}

/// Get the config directory path (~/.config/notedir)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("notedir");
    Ok(config_dir)
}

/// Get the config file path (~/.config/notedir/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from ~/.config/notedir/config.toml
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Err(NoteDirError::Config(format!(
            "Config file not found at {}\n\n\
            Run `notedir init` to create one, then point it at your calendar source:\n\n\
            [source]\n\
            provider = \"outlook\"",
            path.display()
        ))
        .into());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    parse_config(&contents, &path)
}

/// Parse config contents, reporting failures as configuration errors.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    toml::from_str(contents).map_err(|e| {
        NoteDirError::Config(format!(
            "Failed to parse config file at {}: {e}",
            path.display()
        ))
        .into()
    })
}

/// Write a default config file with all options commented out.
pub fn create_default_config(path: &std::path::Path) -> Result<()> {
    let contents = "\
# notedir configuration

# Where generated notes live:
# vault_dir = \"~/notes\"

# Template overrides (any of meeting.md, person.md, recurring.md):
# templates_dir = \"~/.config/notedir/templates\"

# How many days ahead to fetch:
# window_days = 7

[source]
provider = \"outlook\"

# Source-specific settings, passed through to the source binary:
# [source.params]
# mailbox = \"you@example.com\"
";

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(())
}

/// The vault directory with ~ expanded.
pub fn vault_path(cfg: &Config) -> PathBuf {
    expand_path(&cfg.vault_dir)
}

/// Templates directory: configured override, or ~/.config/notedir/templates.
pub fn templates_path(cfg: &Config) -> Result<PathBuf> {
    match &cfg.templates_dir {
        Some(dir) => Ok(expand_path(dir)),
        None => Ok(config_dir()?.join("templates")),
    }
}

/// Source params converted to the JSON map the protocol carries.
pub fn source_params(cfg: &Config) -> Result<serde_json::Map<String, serde_json::Value>> {
    match serde_json::to_value(&cfg.source.params).context("Invalid source params")? {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("[source.params] must be a table"),
    }
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let cfg: Config = toml::from_str(
            "[source]\n\
             provider = \"outlook\"\n",
        )
        .unwrap();
        assert_eq!(cfg.vault_dir, "~/notes");
        assert_eq!(cfg.window_days, 7);
        assert_eq!(cfg.source.provider, "outlook");
        assert!(cfg.source.params.is_empty());
    }

    #[test]
    fn invalid_config_is_a_config_error() {
        let err = parse_config("not valid toml [", Path::new("config.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NoteDirError>(),
            Some(NoteDirError::Config(_))
        ));
    }

    #[test]
    fn source_params_pass_through_as_json() {
        let cfg: Config = toml::from_str(
            "[source]\n\
             provider = \"outlook\"\n\
             [source.params]\n\
             mailbox = \"me@example.com\"\n\
             lookahead = 3\n",
        )
        .unwrap();
        let params = source_params(&cfg).unwrap();
        assert_eq!(params["mailbox"], "me@example.com");
        assert_eq!(params["lookahead"], 3);
    }
}
