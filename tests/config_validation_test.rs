use std::collections::HashMap;
use std::path::PathBuf;

use todos::config::{AppConfig, DatabaseSection, LogFormat, ServerConfig};
use todos::storage::StoreConfig;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_are_valid() {
    let config = AppConfig::default();

    assert_eq!(config.server.port, 3000);
    assert!(!config.server.expose_errors);
    assert_eq!(config.logging.format, LogFormat::Json);
    config.validate().expect("default configuration should be valid");

    assert_eq!(
        config.store_config().unwrap(),
        StoreConfig::Local {
            root_path: PathBuf::from("./data")
        }
    );
}

#[test]
fn port_and_database_url_overrides() {
    let mut config = AppConfig::default();
    config
        .apply_env_overrides(lookup(&[("PORT", " 8080 "), ("DATABASE_URL", "memory://")]))
        .unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.store_config().unwrap(), StoreConfig::Memory);
}

#[test]
fn invalid_port_override_fails() {
    let mut config = AppConfig::default();
    let result = config.apply_env_overrides(lookup(&[("PORT", "eighty")]));

    assert!(result.is_err(), "Expected a non-numeric PORT to be rejected");
    assert_eq!(config.server.port, 3000);
}

#[test]
fn zero_port_rejected() {
    let config = AppConfig {
        server: ServerConfig {
            port: 0,
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn empty_database_url_rejected() {
    let config = AppConfig {
        database: DatabaseSection {
            url: "  ".to_string(),
        },
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn unsupported_database_scheme_rejected() {
    let config = AppConfig {
        database: DatabaseSection {
            url: "mongodb://localhost:27017/todos".to_string(),
        },
        ..Default::default()
    };

    config.validate().expect("non-empty url passes basic validation");
    assert!(
        config.store_config().is_err(),
        "Expected unsupported scheme to fail store resolution"
    );
}
