use iredo_domain::config::{ApiConfig, Environment, LogConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert_eq!(server.http_port, 8080);
    assert!(server.ssl.is_none());
    assert_eq!(server.environment, Environment::Production);

    let log = LogConfig::default();
    assert!(log.path.is_none());
    assert_eq!(log.level, "info");
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": {
            "address": "::",
            "port": 8443,
            "http_port": 8080,
            "environment": "development",
            "ssl": { "cert": "/tmp/cert.pem", "key": "/tmp/key.pem" }
        },
        "log": { "path": "/tmp/logs", "level": "debug" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8443);
    assert!(cfg.server.environment.is_development());
    assert_eq!(cfg.server.ssl.as_ref().map(|s| s.cert.clone()), Some("/tmp/cert.pem".into()));
    assert_eq!(cfg.log.level, "debug");
}

#[test]
fn production_is_the_default_environment() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("empty config");
    assert!(!cfg.server.environment.is_development());
}
