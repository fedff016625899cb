//! Preset loading orchestration.
//! Archives the previous preset, checks the template folder and config
//! document, then renders the template tree.

use crate::archive::archive_existing;
use crate::config::{load_config, ConfigError};
use crate::constants::{CONFIG_FILE, PRESETS_DIR, TEMPLATES_DIR};
use crate::error::Result;
use crate::renderer::{render_tree, RenderSummary};
use crate::resolver::{EnvSource, ProcessEnv, TokenResolver};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a [`PresetLoader`].
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Directory containing the template and preset folders
    pub base_dir: PathBuf,
    /// Name of the template folder under `base_dir`
    pub template_folder: String,
    /// Name of the config document inside the template folder
    pub config_file: String,
    /// Fall back to environment variables for names missing from the config
    pub use_env_vars: bool,
}

impl LoaderOptions {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            template_folder: TEMPLATES_DIR.to_string(),
            config_file: CONFIG_FILE.to_string(),
            use_env_vars: false,
        }
    }
}

/// How a load finished when no fatal error occurred.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The template folder was missing; an empty one was created
    NoTemplates { template_dir: PathBuf },
    /// The config document was missing or malformed
    NoConfig(ConfigError),
    /// The preset was rendered
    Rendered {
        summary: RenderSummary,
        /// Where the previous preset was moved, if there was one
        archived: Option<PathBuf>,
    },
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, LoadOutcome::Rendered { .. })
    }
}

/// Renders `<base>/<template_folder>` into `<base>/presets`.
pub struct PresetLoader<'e> {
    options: LoaderOptions,
    env: &'e dyn EnvSource,
}

impl PresetLoader<'static> {
    /// Loader reading fallback values from the process environment.
    pub fn new(options: LoaderOptions) -> Self {
        static PROCESS_ENV: ProcessEnv = ProcessEnv;
        Self { options, env: &PROCESS_ENV }
    }
}

impl<'e> PresetLoader<'e> {
    /// Loader reading fallback values from `env`.
    pub fn with_env(options: LoaderOptions, env: &'e dyn EnvSource) -> Self {
        Self { options, env }
    }

    pub fn template_dir(&self) -> PathBuf {
        self.options.base_dir.join(&self.options.template_folder)
    }

    pub fn preset_dir(&self) -> PathBuf {
        self.options.base_dir.join(PRESETS_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.template_dir().join(&self.options.config_file)
    }

    /// Runs archive, checks and render in order.
    ///
    /// The previous preset is archived before the template folder and config
    /// are checked, so it is moved aside even when nothing new is rendered.
    ///
    /// # Errors
    /// * Any filesystem failure while archiving, creating the template folder
    ///   or rendering
    pub fn load(&self) -> Result<LoadOutcome> {
        let template_dir = self.template_dir();
        let preset_dir = self.preset_dir();

        let archived = archive_existing(&preset_dir)?;

        if !template_dir.exists() {
            fs::create_dir_all(&template_dir)?;
            error!("No template folder found, created empty '{}'.", template_dir.display());
            return Ok(LoadOutcome::NoTemplates { template_dir });
        }

        let config = match load_config(self.config_path()) {
            Ok(config) => config,
            Err(err) => {
                match &err {
                    ConfigError::Missing { .. } => error!("{} not found.", self.options.config_file),
                    ConfigError::Unreadable { .. } | ConfigError::Malformed { .. } => error!("{err}."),
                }
                return Ok(LoadOutcome::NoConfig(err));
            }
        };

        let resolver = if self.options.use_env_vars {
            TokenResolver::with_env_fallback(&config, self.env)
        } else {
            TokenResolver::new(&config)
        };

        info!(
            "Starting to copy {} into {}.",
            display_name(&template_dir),
            display_name(&preset_dir)
        );
        let summary = render_tree(&template_dir, &preset_dir, &resolver)?;
        info!(
            "Copying templates finished: {} files rendered, {} copied, {} tokens replaced.",
            summary.files_rendered, summary.files_copied, summary.tokens_replaced
        );
        if !summary.unresolved.is_empty() {
            warn!("{} tokens were left unresolved.", summary.unresolved.len());
        }

        Ok(LoadOutcome::Rendered { summary, archived })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| format!("{}/", name.to_string_lossy()))
        .unwrap_or_else(|| path.display().to_string())
}
