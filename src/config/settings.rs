use crate::core::completion::DEFAULT_SYMBOL_CHARS;
use crate::core::ConfigProvider;
use crate::utils::error::{CandidateError, Result};
use crate::utils::validation::{compile_symbol_class, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "curated-completion";
pub const STORE_FILE_NAME: &str = ".candidates.json";
pub const SETTINGS_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Load candidates at startup and save them at shutdown.
    pub restore_on_startup: bool,
    pub persistence_file_path: Option<PathBuf>,
    /// Character-class body used to grab the prefix before the cursor.
    pub symbol_chars: String,
    #[serde(skip)]
    resolved_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restore_on_startup: true,
            persistence_file_path: None,
            symbol_chars: DEFAULT_SYMBOL_CHARS.to_string(),
            resolved_path: default_store_path(),
        }
    }
}

/// `<config dir>/curated-completion/.candidates.json`, or the working
/// directory when the platform has no config dir.
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(STORE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE_NAME))
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE_NAME))
}

impl Settings {
    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(CandidateError::IoError(e)),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut settings: Settings =
            toml::from_str(&processed_content).map_err(|e| CandidateError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        settings.resolve_path();
        Ok(settings)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn set_persistence_file_path(&mut self, path: impl Into<PathBuf>) {
        self.persistence_file_path = Some(path.into());
        self.resolve_path();
    }

    fn resolve_path(&mut self) {
        self.resolved_path = self
            .persistence_file_path
            .clone()
            .unwrap_or_else(default_store_path);
    }
}

impl ConfigProvider for Settings {
    fn restore_on_startup(&self) -> bool {
        self.restore_on_startup
    }

    fn persistence_file_path(&self) -> &Path {
        &self.resolved_path
    }

    fn symbol_chars(&self) -> &str {
        &self.symbol_chars
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path(
            "persistence_file_path",
            &self.resolved_path.to_string_lossy(),
        )?;
        compile_symbol_class("symbol_chars", &self.symbol_chars)?;
        Ok(())
    }
}
