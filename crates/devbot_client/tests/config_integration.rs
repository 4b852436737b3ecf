//! Integration tests for config load/save and endpoint URL assembly.

use devbot_client::config::{self, Config};

#[test]
fn load_existing_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        r#"
server:
  host: "chat.example.com"
  port: 9001
  path: "/assistant"
chat:
  starter_prompts:
    - "How do I create a smart contract?"
    - "How do I get started?"
"#,
    )
    .unwrap();

    let cfg = config::load(&path).expect("load should succeed");
    assert_eq!(cfg.server.host.as_deref(), Some("chat.example.com"));
    assert_eq!(cfg.server.port, Some(9001));
    assert_eq!(cfg.server.path.as_deref(), Some("/assistant"));
    assert_eq!(cfg.chat.starter_prompts.len(), 2);
    assert_eq!(cfg.server_url(), "ws://chat.example.com:9001/assistant");
}

#[test]
fn defaults_fill_missing_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "server:\n  port: 8100\n").unwrap();

    let cfg = config::load(&path).expect("load should succeed");
    assert_eq!(cfg.server_url(), "ws://127.0.0.1:8100/ws");
    assert!(cfg.chat.starter_prompts.is_empty());
}

#[test]
fn default_url_matches_the_fixed_endpoint() {
    assert_eq!(Config::default().server_url(), "ws://127.0.0.1:8000/ws");
}

#[test]
fn save_creates_directory_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devbot").join("config.yaml");

    let mut cfg = Config::default();
    cfg.server.host = Some("localhost".into());
    cfg.server.port = Some(8200);
    cfg.chat.starter_prompts = vec!["Hi?".into()];
    config::save(&path, &cfg).expect("save should succeed");

    let loaded = config::load(&path).expect("load should succeed");
    assert_eq!(loaded.server.host.as_deref(), Some("localhost"));
    assert_eq!(loaded.server.port, Some(8200));
    assert_eq!(loaded.chat.starter_prompts, ["Hi?"]);
}

#[test]
fn load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(config::load(&dir.path().join("nope.yaml")).is_err());
}
