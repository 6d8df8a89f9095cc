use crate::config::settings::{default_settings_path, Settings};
use crate::utils::error::{CandidateError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "curated-completion")]
#[command(about = "Manage a hand-curated list of completion candidates")]
pub struct CliConfig {
    /// Settings file (defaults to <config dir>/curated-completion/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Candidate file, overriding persistence_file_path from the settings
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Do not load or save candidates; only read-only commands are allowed
    #[arg(long, global = true)]
    pub no_restore: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a candidate (taken verbatim)
    Add { candidate: String },
    /// Delete a candidate; unknown names are ignored
    Remove { candidate: String },
    /// Delete every candidate
    Clear,
    /// Print every candidate in store order
    List,
    /// Print candidates starting with PREFIX
    Query {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// Print candidates for the symbol before CURSOR in TEXT
    Complete {
        text: String,
        /// Byte offset of the cursor (defaults to the end of TEXT)
        #[arg(long)]
        cursor: Option<usize>,
    },
    /// Write the candidate file now
    Save,
    /// Show the effective settings
    Config,
}

impl Command {
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. } | Command::Remove { .. } | Command::Clear
        )
    }

    /// Commands whose result only exists once the candidate file is written.
    pub fn writes_store(&self) -> bool {
        self.mutates() || *self == Command::Save
    }
}

impl CliConfig {
    /// Settings file contents with command-line overrides applied.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match self.config.clone().or_else(default_settings_path) {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(store) = &self.store {
            settings.set_persistence_file_path(store);
        }
        if self.no_restore {
            settings.restore_on_startup = false;
        }
        Ok(settings)
    }

    /// Each run is a fresh process: without a restore the store starts empty,
    /// so writing commands would either be dropped or clobber the file.
    pub fn check_command(&self, settings: &Settings) -> Result<()> {
        if self.command.writes_store() && !settings.restore_on_startup {
            return Err(CandidateError::ConfigValidationError {
                field: "restore_on_startup".to_string(),
                message: "commands that change or save candidates need restore enabled; \
                          drop --no-restore or set restore_on_startup = true"
                    .to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_parse_subcommands() {
        let cli = CliConfig::parse_from(["curated-completion", "add", "alpha"]);
        assert_eq!(
            cli.command,
            Command::Add {
                candidate: "alpha".to_string()
            }
        );
        assert!(cli.command.mutates());

        let cli = CliConfig::parse_from(["curated-completion", "query"]);
        assert_eq!(
            cli.command,
            Command::Query {
                prefix: String::new()
            }
        );
        assert!(!cli.command.mutates());

        let cli = CliConfig::parse_from(["curated-completion", "complete", "foo ba", "--cursor", "3"]);
        assert_eq!(
            cli.command,
            Command::Complete {
                text: "foo ba".to_string(),
                cursor: Some(3)
            }
        );
    }

    #[test]
    fn test_overrides_apply_to_settings() {
        let dir = TempDir::new().unwrap();
        let settings_path = dir.path().join("config.toml");
        std::fs::write(
            &settings_path,
            "restore_on_startup = true\npersistence_file_path = \"/from/file.json\"\n",
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "curated-completion",
            "list",
            "--config",
            settings_path.to_str().unwrap(),
            "--store",
            "/from/cli.json",
            "--no-restore",
        ]);
        let settings = cli.settings().unwrap();

        assert_eq!(settings.persistence_file_path(), Path::new("/from/cli.json"));
        assert!(!settings.restore_on_startup());
    }

    #[test]
    fn test_writing_commands_need_restore() {
        let mut settings = Settings::default();
        settings.restore_on_startup = false;

        for args in [
            vec!["curated-completion", "add", "foo"],
            vec!["curated-completion", "remove", "foo"],
            vec!["curated-completion", "clear"],
            vec!["curated-completion", "save"],
        ] {
            let cli = CliConfig::parse_from(args);
            assert!(matches!(
                cli.check_command(&settings),
                Err(CandidateError::ConfigValidationError { .. })
            ));
        }

        let cli = CliConfig::parse_from(["curated-completion", "list"]);
        assert!(cli.check_command(&settings).is_ok());

        settings.restore_on_startup = true;
        let cli = CliConfig::parse_from(["curated-completion", "save"]);
        assert!(cli.check_command(&settings).is_ok());
    }
}
