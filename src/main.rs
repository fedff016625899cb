//! presetter's main application entry point.
//! Parses arguments, initializes logging and renders the preset once
//! before the managed server is started.

use presetter::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    loader::{LoadOutcome, PresetLoader},
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// Skipped renders (no templates, no config) are logged by the loader and
/// still exit successfully; only filesystem failures are returned.
fn run(args: Args) -> Result<()> {
    if args.skip_preset_load {
        log::info!("Preset loader skipped.");
        return Ok(());
    }

    log::info!("Loading presets.");
    let options = args.loader_options(std::env::current_dir()?);
    let loader = PresetLoader::new(options);

    match loader.load()? {
        LoadOutcome::Rendered { archived, .. } => {
            if let Some(archived) = archived {
                println!("Previous preset archived in {}.", archived.display());
            }
            println!("Preset generation completed successfully in {}.", loader.preset_dir().display());
        }
        LoadOutcome::NoTemplates { .. } | LoadOutcome::NoConfig(_) => {
            log::warn!("Preset generation skipped.");
        }
    }
    Ok(())
}
