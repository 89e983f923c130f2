//! Settings loading and directory resolution for `recall-cli`.
//!
//! Trimmed down from `djls-conf`'s shape: a `config`-crate layered loader
//! plus `directories::ProjectDirs` for the log directory. No
//! Django-specific fields (tagspecs, venv, pythonpath) survive here; this
//! core has nothing resembling them.

use std::fs;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

#[must_use]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "recall")
}

/// The log directory for the application, created if absent.
///
/// Returns the XDG cache directory (e.g. `~/.cache/recall` on Linux) if
/// available, otherwise falls back to `/tmp`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn log_dir() -> Result<Utf8PathBuf, ConfigError> {
    let dir = project_dirs()
        .and_then(|proj_dirs| Utf8PathBuf::from_path_buf(proj_dirs.cache_dir().to_path_buf()).ok())
        .unwrap_or_else(|| Utf8PathBuf::from("/tmp"));

    fs::create_dir_all(&dir).map_err(ConfigError::Io)?;

    Ok(dir)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
    #[error("failed to create log directory")]
    Io(#[from] std::io::Error),
}

/// User-adjustable settings: log verbosity and an optional default
/// fixture directory for `recall-cli` subcommands that omit `--fixture`.
#[derive(Debug, Deserialize, Default, PartialEq, Eq, Clone)]
pub struct Settings {
    #[serde(default)]
    debug: bool,
    fixture_dir: Option<String>,
}

impl Settings {
    /// Load settings layered project file over user config file, matching
    /// `djls-conf`'s precedence (project overrides user).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Config`] if any source fails to parse or the
    /// merged result fails to deserialize into [`Settings`].
    pub fn new(project_root: &Utf8Path, overrides: Option<Settings>) -> Result<Self, ConfigError> {
        let user_config_file =
            project_dirs().map(|proj_dirs| proj_dirs.config_dir().join("recall.toml"));

        let mut settings = Self::load_from_paths(project_root, user_config_file.as_deref())?;

        if let Some(overrides) = overrides {
            settings.debug = overrides.debug || settings.debug;
            settings.fixture_dir = overrides.fixture_dir.or(settings.fixture_dir);
        }

        Ok(settings)
    }

    fn load_from_paths(
        project_root: &Utf8Path,
        user_config_path: Option<&std::path::Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(project_root.join("recall.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings = config.try_deserialize()?;
        Ok(settings)
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub fn fixture_dir(&self) -> Option<&str> {
        self.fixture_dir.as_deref()
    }
}
