use std::path::PathBuf;
use nowshowing::cli::Args;
use nowshowing::config::{Config, FileConfig, Flavor};

fn make_args(port: Option<u16>, jellyfin_url: Option<String>) -> Args {
    Args {
        port,
        jellyfin_url,
        ..Args::default()
    }
}

#[test]
fn test_defaults_when_nothing_set() {
    let config = Config::resolve(None, &make_args(None, None));
    assert_eq!(config.port, 5000);
    assert_eq!(config.jellyfin_url, "http://jellyfin:8096");
    assert_eq!(config.poll_interval, 5);
    assert_eq!(config.idle_after, 30);
    assert_eq!(config.settings_path, PathBuf::from("config.json"));
    assert_eq!(config.flavor, Flavor::Display);
    assert!(config.api_key.is_none());
    assert!(config.user_id.is_none());
}

#[test]
fn test_cli_flag_overrides_default() {
    let config = Config::resolve(None, &make_args(Some(9000), None));
    assert_eq!(config.port, 9000);
}

#[test]
fn test_toml_overrides_default() {
    let file = FileConfig { port: Some(7777), flavor: Some(Flavor::Classic), ..FileConfig::default() };
    let config = Config::resolve(Some(file), &make_args(None, None));
    assert_eq!(config.port, 7777);
    assert_eq!(config.flavor, Flavor::Classic);
}

#[test]
fn test_cli_overrides_toml() {
    let file = FileConfig {
        port: Some(7777),
        jellyfin_url: Some("http://toml:8096".to_string()),
        ..FileConfig::default()
    };
    let args = make_args(Some(9000), Some("http://cli:8096".to_string()));
    let config = Config::resolve(Some(file), &args);
    assert_eq!(config.port, 9000); // CLI wins
    assert_eq!(config.jellyfin_url, "http://cli:8096");
}

#[test]
fn test_trailing_slash_trimmed_from_url() {
    let config = Config::resolve(None, &make_args(None, Some("http://jf.local:8096/".to_string())));
    assert_eq!(config.jellyfin_url, "http://jf.local:8096");
}

#[test]
fn test_empty_api_key_is_unset() {
    let args = Args { api_key: Some("  ".to_string()), ..Args::default() };
    let config = Config::resolve(None, &args);
    assert!(config.api_key.is_none());
}

#[test]
fn test_toml_parse() {
    let toml_str = r#"
jellyfin_url = "http://media.lan:8096"
api_key = "abc"
user_id = "u1"
poll_interval = 10
idle_after = 120
settings_path = "/var/lib/nowshowing/config.json"
flavor = "classic"
"#;
    let parsed: FileConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(parsed.jellyfin_url.as_deref(), Some("http://media.lan:8096"));
    assert_eq!(parsed.api_key.as_deref(), Some("abc"));
    assert_eq!(parsed.poll_interval, Some(10));
    assert_eq!(parsed.idle_after, Some(120));
    assert_eq!(parsed.flavor, Some(Flavor::Classic));
    assert_eq!(
        parsed.settings_path,
        Some(PathBuf::from("/var/lib/nowshowing/config.json"))
    );
}

#[test]
fn test_toml_unknown_fields_ignored() {
    // Future keys must not break parsing
    let toml_str = "port = 9000\nunknown_future_key = true\n";
    let parsed: Result<FileConfig, _> = toml::from_str(toml_str);
    assert!(parsed.is_ok());
}

#[test]
fn test_toml_unknown_flavor_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("flavor = \"fancy\"\n");
    assert!(parsed.is_err());
}

#[test]
fn test_localhost_default_false() {
    let config = Config::resolve(None, &make_args(None, None));
    assert!(!config.localhost, "localhost should default to false when neither CLI nor TOML sets it");
}

#[test]
fn test_load_config_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = nowshowing::config::load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, nowshowing::config::ConfigError::Io(_)));
}

#[test]
fn test_explicit_config_path_wins() {
    let explicit = PathBuf::from("/etc/nowshowing.toml");
    let found = nowshowing::config::find_config_file(Some(&explicit));
    assert_eq!(found, Some(explicit));
}
