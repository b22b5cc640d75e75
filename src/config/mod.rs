use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::gate::SecretKey;

/// Environment variable holding the shared signing key.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Shared secret for signed command tokens. Supports `${VAR}` / `$VAR`.
    /// Unset or empty runs the gate in unauthenticated mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when neither `--verbose` nor `RUST_LOG` is set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from `path` (or the default location) and apply the
    /// environment. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key))
    }

    /// Load with a custom env var lookup (for testing).
    pub fn load_with_env<F>(path: Option<&Path>, env_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Config::default()
        };

        config.gate.secret_key = config
            .gate
            .secret_key
            .as_deref()
            .and_then(|raw| expand_env(raw, &env_fn));

        // The environment wins over the file.
        if let Ok(key) = env_fn(SECRET_KEY_ENV)
            && !key.is_empty()
        {
            config.gate.secret_key = Some(key);
        }

        Ok(config)
    }

    /// `<config_dir>/promptgate/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        use etcetera::BaseStrategy;

        let strategy = etcetera::choose_base_strategy()
            .map_err(|e| anyhow::anyhow!("Failed to determine base directories: {}", e))?;
        Ok(strategy.config_dir().join("promptgate").join(CONFIG_FILENAME))
    }

    /// The configured secret key, if any.
    pub fn secret_key(&self) -> Option<SecretKey> {
        self.gate.secret_key.as_deref().and_then(SecretKey::from_text)
    }

    /// Copy of this config that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.gate.secret_key.is_some() {
            config.gate.secret_key = Some("<redacted>".to_string());
        }
        config
    }

    /// Write the default template to `path`.
    pub fn write_template(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Expand `${VAR}` or `$VAR`. An unset variable or empty result means no
/// value, so a literal `${SECRET_KEY}` never becomes the key.
fn expand_env<F>(s: &str, env_fn: &F) -> Option<String>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let value = if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        env_fn(var_name).ok()?
    } else if let Some(var_name) = s.strip_prefix('$') {
        env_fn(var_name).ok()?
    } else {
        s.to_string()
    };
    (!value.is_empty()).then_some(value)
}

/// Default config template with helpful comments (used by `config init`)
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# promptgate configuration

[gate]
# Shared secret for signed `$Sys.command.<n>.<digest>` tokens.
# Leave unset to run without signature checks.
# The SECRET_KEY environment variable always takes precedence.
# secret_key = "${SECRET_KEY}"

[logging]
# trace, debug, info, warn or error. RUST_LOG and --verbose take precedence.
level = "info"
"#;
