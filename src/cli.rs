//! Command-line interface implementation for presetter.
//! Provides argument parsing using clap.

use crate::constants::{CONFIG_FILE, TEMPLATES_DIR};
use crate::loader::LoaderOptions;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for presetter.
#[derive(Parser, Debug)]
#[command(author, version, about = "presetter: render server config presets from templates", long_about = None)]
pub struct Args {
    /// Directory containing the template and preset folders [default: current directory]
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Template folder name under the base directory
    #[arg(short, long, value_name = "NAME", default_value = TEMPLATES_DIR)]
    pub template_folder: String,

    /// Config document name inside the template folder
    #[arg(short, long, value_name = "NAME", default_value = CONFIG_FILE)]
    pub config_file: String,

    /// Fall back to environment variables for tokens missing from the config document
    #[arg(short = 'e', long)]
    pub use_env_vars: bool,

    /// Skip rendering presets from templates
    #[arg(short, long)]
    pub skip_preset_load: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Maps the arguments onto loader settings, using `current_dir` when no
    /// base directory was given.
    pub fn loader_options(&self, current_dir: PathBuf) -> LoaderOptions {
        LoaderOptions {
            base_dir: self.base_dir.clone().unwrap_or(current_dir),
            template_folder: self.template_folder.clone(),
            config_file: self.config_file.clone(),
            use_env_vars: self.use_env_vars,
        }
    }
}

/// Parses command line arguments, exiting through clap on invalid input.
pub fn get_args() -> Args {
    Args::parse()
}
