// tests/service_config.rs
use req2uml::config::service::{
    ENV_CATALOG_PATH, ENV_CONFIG_PATH, ENV_LOG_CLASS_NAMES, ENV_MAX_REQUIREMENT_CHARS,
};
use req2uml::config::ServiceConfig;
use req2uml::AppState;
use std::{env, fs};

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_MAX_REQUIREMENT_CHARS);
    env::remove_var(ENV_CATALOG_PATH);
    env::remove_var(ENV_LOG_CLASS_NAMES);
}

#[serial_test::serial]
#[test]
fn defaults_when_nothing_configured() {
    // Isolate CWD so the repo's config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    let cfg = ServiceConfig::from_env().unwrap();
    assert_eq!(cfg.limits.max_requirement_chars, 20_000);
    assert_eq!(cfg.limits.max_feedback_chars, 2_000);
    assert!(cfg.catalog.path.is_none());

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn env_path_then_field_overrides() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("svc.toml");
    fs::write(
        &p,
        r#"
[limits]
max_requirement_chars = 300
max_feedback_chars = 40
"#,
    )
    .unwrap();

    env::set_var(ENV_CONFIG_PATH, p.display().to_string());
    let cfg = ServiceConfig::from_env().unwrap();
    assert_eq!(cfg.limits.max_requirement_chars, 300);
    assert_eq!(cfg.limits.max_feedback_chars, 40);

    env::set_var(ENV_MAX_REQUIREMENT_CHARS, "77");
    let cfg = ServiceConfig::from_env().unwrap();
    assert_eq!(cfg.limits.max_requirement_chars, 77);

    clear_env();
}

#[serial_test::serial]
#[test]
fn missing_explicit_path_is_an_error() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "__req2uml_config_should_not_exist__.toml");
    assert!(ServiceConfig::from_env().is_err());
    clear_env();
}

#[serial_test::serial]
#[test]
fn custom_catalog_replaces_builtin() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("catalog.json");
    fs::write(
        &p,
        r#"{ "classes": { "Book": { "attributes": ["isbn", "publishDate"], "methods": [] } } }"#,
    )
    .unwrap();
    env::set_var(ENV_CATALOG_PATH, p.display().to_string());

    let state = AppState::from_env().unwrap();
    assert_eq!(state.catalog.len(), 1);

    let m = req2uml::extract_with_catalog("A Library has a Book.", &state.catalog);
    let book = m.classes.iter().find(|c| c.name == "Book").unwrap();
    let attrs: Vec<(&str, &str)> = book
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), a.ty.as_str()))
        .collect();
    assert_eq!(attrs, [("isbn", "string"), ("publishDate", "Date")]);

    clear_env();
}

#[serial_test::serial]
#[test]
fn class_name_logging_follows_file_then_env() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("svc.toml");
    fs::write(&p, "[logging]\nclass_names = true\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, &p);

    assert!(ServiceConfig::from_env().unwrap().logging.class_names);

    env::set_var(ENV_LOG_CLASS_NAMES, "0");
    assert!(!ServiceConfig::from_env().unwrap().logging.class_names);

    // unparseable values leave the file setting alone
    env::set_var(ENV_LOG_CLASS_NAMES, "sometimes");
    assert!(ServiceConfig::from_env().unwrap().logging.class_names);

    clear_env();
}
