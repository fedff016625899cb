use presetter::config::ConfigError;
use presetter::constants::LINE_ENDING;
use presetter::loader::{LoadOutcome, LoaderOptions, PresetLoader};
use presetter::resolver::LookupSource;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn archives(base: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(base)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            let name = path.file_name().unwrap().to_string_lossy();
            name.starts_with("presets") && name != "presets"
        })
        .collect();
    found.sort();
    found
}

#[test_log::test]
fn test_renders_port_scenario() {
    let base = TempDir::new().unwrap();
    write(base.path(), "templates/template_cfg.json", r#"{"port": "8080"}"#);
    write(base.path(), "templates/cfg/server_cfg.ini", "Port=[$port]\n");

    let loader = PresetLoader::new(LoaderOptions::new(base.path()));
    let outcome = loader.load().unwrap();

    match outcome {
        LoadOutcome::Rendered { summary, archived } => {
            assert_eq!(archived, None);
            assert_eq!(summary.tokens_replaced, 1);
        }
        other => panic!("Expected Rendered, got {other:?}"),
    }
    assert_eq!(
        fs::read_to_string(base.path().join("presets/cfg/server_cfg.ini")).unwrap(),
        format!("Port=8080{LINE_ENDING}")
    );
    // The config document is part of the template tree and is mirrored too.
    assert!(base.path().join("presets/template_cfg.json").is_file());
}

#[test_log::test]
fn test_unresolved_token_is_kept_and_recorded() {
    let base = TempDir::new().unwrap();
    write(base.path(), "templates/template_cfg.json", r#"{"port": "8080"}"#);
    write(base.path(), "templates/extra_cfg.ini", "VALUE=[$token]\n");

    let outcome = PresetLoader::new(LoaderOptions::new(base.path())).load().unwrap();

    let LoadOutcome::Rendered { summary, .. } = outcome else {
        panic!("Expected Rendered outcome");
    };
    assert_eq!(summary.unresolved.len(), 1);
    assert_eq!(summary.unresolved[0].name, "token");
    assert_eq!(summary.unresolved[0].source, LookupSource::Config);
    assert_eq!(
        fs::read_to_string(base.path().join("presets/extra_cfg.ini")).unwrap(),
        format!("VALUE=[$token]{LINE_ENDING}")
    );
}

#[test_log::test]
fn test_existing_preset_is_archived() {
    let base = TempDir::new().unwrap();
    write(base.path(), "templates/template_cfg.json", r#"{"name": "new"}"#);
    write(base.path(), "templates/server_cfg.ini", "NAME=[$name]\n");
    write(base.path(), "presets/old.cfg", "old contents\n");

    let outcome = PresetLoader::new(LoaderOptions::new(base.path())).load().unwrap();

    let LoadOutcome::Rendered { archived: Some(archived), .. } = outcome else {
        panic!("Expected Rendered outcome with an archive");
    };
    assert_eq!(fs::read_to_string(archived.join("old.cfg")).unwrap(), "old contents\n");
    assert!(!base.path().join("presets/old.cfg").exists());
    assert!(base.path().join("presets/server_cfg.ini").is_file());
}

#[test_log::test]
fn test_consecutive_runs_never_lose_data() {
    let base = TempDir::new().unwrap();
    write(base.path(), "templates/template_cfg.json", r#"{"name": "server"}"#);
    write(base.path(), "templates/a/b/c.cfg", "NAME=[$name]\n");
    let loader = PresetLoader::new(LoaderOptions::new(base.path()));

    loader.load().unwrap();
    let first_run = fs::read(base.path().join("presets/a/b/c.cfg")).unwrap();
    loader.load().unwrap();
    loader.load().unwrap();

    let archives = archives(base.path());
    assert_eq!(archives.len(), 2);
    for archive in &archives {
        assert_eq!(fs::read(archive.join("a/b/c.cfg")).unwrap(), first_run);
    }
    assert_eq!(fs::read(base.path().join("presets/a/b/c.cfg")).unwrap(), first_run);
}

#[test_log::test]
fn test_missing_template_folder_is_created() {
    let base = TempDir::new().unwrap();

    let outcome = PresetLoader::new(LoaderOptions::new(base.path())).load().unwrap();

    match outcome {
        LoadOutcome::NoTemplates { template_dir } => {
            assert_eq!(template_dir, base.path().join("templates"));
            assert!(template_dir.is_dir());
        }
        other => panic!("Expected NoTemplates, got {other:?}"),
    }
    assert!(!base.path().join("presets").exists());
}

#[test_log::test]
fn test_missing_config_skips_render_after_archiving() {
    let base = TempDir::new().unwrap();
    write(base.path(), "templates/server_cfg.ini", "NAME=[$name]\n");
    write(base.path(), "presets/old.cfg", "old\n");

    let outcome = PresetLoader::new(LoaderOptions::new(base.path())).load().unwrap();

    assert!(matches!(outcome, LoadOutcome::NoConfig(ConfigError::Missing { .. })));
    assert!(!outcome.is_rendered());
    assert!(!base.path().join("presets").exists());
    let archives = archives(base.path());
    assert_eq!(archives.len(), 1);
    assert_eq!(fs::read_to_string(archives[0].join("old.cfg")).unwrap(), "old\n");
}

#[test_log::test]
fn test_malformed_config_skips_render() {
    let base = TempDir::new().unwrap();
    write(base.path(), "templates/template_cfg.json", r#"{"port": 8080}"#);
    write(base.path(), "templates/server_cfg.ini", "Port=[$port]\n");

    let outcome = PresetLoader::new(LoaderOptions::new(base.path())).load().unwrap();

    assert!(matches!(outcome, LoadOutcome::NoConfig(ConfigError::Malformed { .. })));
    assert!(!base.path().join("presets").exists());
}

#[test_log::test]
fn test_custom_template_folder_and_env_fallback() {
    let base = TempDir::new().unwrap();
    write(base.path(), "tpl/values.yml", "track: ks_nordschleife\npassword: ''\n");
    write(
        base.path(),
        "tpl/server_cfg.ini",
        "TRACK=[$track]\nNAME=[$SERVER_NAME]\nPASSWORD=[$password]\n",
    );
    let env: HashMap<String, String> = [
        ("SERVER_NAME".to_string(), "Env Server".to_string()),
        ("password".to_string(), "from-env".to_string()),
    ]
    .into_iter()
    .collect();

    let options = LoaderOptions {
        template_folder: "tpl".to_string(),
        config_file: "values.yml".to_string(),
        use_env_vars: true,
        ..LoaderOptions::new(base.path())
    };
    let outcome = PresetLoader::with_env(options, &env).load().unwrap();

    let LoadOutcome::Rendered { summary, .. } = outcome else {
        panic!("Expected Rendered outcome");
    };
    assert_eq!(summary.tokens_replaced, 2);
    assert_eq!(summary.unresolved.len(), 1);
    assert_eq!(summary.unresolved[0].name, "password");
    assert_eq!(
        fs::read_to_string(base.path().join("presets/server_cfg.ini")).unwrap(),
        format!(
            "TRACK=ks_nordschleife{LINE_ENDING}NAME=Env Server{LINE_ENDING}PASSWORD=[$password]{LINE_ENDING}"
        )
    );
}
