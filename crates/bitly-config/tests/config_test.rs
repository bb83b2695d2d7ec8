#![allow(clippy::unwrap_used)]
// Layering tests for config loading, isolated with `figment::Jail`.

use std::path::Path;

use figment::Jail;

use bitly_config::{ConfigError, load_config_from};

const FILE_TOKEN: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const ENV_TOKEN: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

#[test]
fn test_defaults_without_file_or_env() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let config = load_config_from(Path::new("missing.toml")).unwrap();

        assert!(config.token.is_none());
        assert_eq!(config.api_url, "https://api-ssl.bitly.com");
        assert_eq!(config.timeout, 30);
        assert!(config.group_guid.is_none());
        Ok(())
    });
}

#[test]
fn test_file_values_are_read() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            &format!(
                r#"
                token = "{FILE_TOKEN}"
                timeout = 10
                organization_guid = "Oj1a2b3c"
                group_guid = "Bk4d5e6f"
                "#
            ),
        )?;

        let config = load_config_from(Path::new("config.toml")).unwrap();

        assert_eq!(config.token.as_deref(), Some(FILE_TOKEN));
        assert_eq!(config.timeout, 10);
        assert_eq!(config.organization_guid.as_deref(), Some("Oj1a2b3c"));
        assert_eq!(config.group_guid.as_deref(), Some("Bk4d5e6f"));
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            &format!("token = \"{FILE_TOKEN}\"\ngroup_guid = \"Bfile\"\n"),
        )?;
        jail.set_env("BITLY_TOKEN", ENV_TOKEN);
        jail.set_env("BITLY_GROUP_GUID", "Benv");
        jail.set_env("BITLY_TIMEOUT", "5");

        let config = load_config_from(Path::new("config.toml")).unwrap();

        assert_eq!(config.token.as_deref(), Some(ENV_TOKEN));
        assert_eq!(config.group_guid.as_deref(), Some("Benv"));
        assert_eq!(config.timeout, 5);
        Ok(())
    });
}

#[test]
fn test_build_client_uses_configured_api_url() {
    Jail::expect_with(|jail| {
        jail.set_env("BITLY_TOKEN", ENV_TOKEN);
        jail.set_env("BITLY_API_URL", "http://127.0.0.1:9/");

        let config = load_config_from(Path::new("config.toml")).unwrap();
        let client = config.build_client().unwrap();

        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9/");
        client.close();
        Ok(())
    });
}

#[test]
fn test_build_client_rejects_malformed_token() {
    Jail::expect_with(|jail| {
        jail.set_env("BITLY_TOKEN", "not-a-token");

        let config = load_config_from(Path::new("config.toml")).unwrap();
        let result = config.build_client();

        assert!(
            matches!(result, Err(ConfigError::Validation { ref field, .. }) if field == "token"),
            "expected token validation error, got: {result:?}"
        );
        Ok(())
    });
}

#[test]
fn test_invalid_timeout_type_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "timeout = \"soon\"\n")?;

        let result = load_config_from(Path::new("config.toml"));

        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
