//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use ama_config::{AmaConfig, ConfigError};
use ama_core::enums::FeedSort;
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_router_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[router]
base_url = "https://router.example.org/functions/v1"
api_key = "anon-key"
timeout_secs = 10
"#,
        )?;

        let config: AmaConfig = Figment::from(Serialized::defaults(AmaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.router.base_url, "https://router.example.org/functions/v1");
        assert_eq!(config.router.api_key, "anon-key");
        assert_eq!(config.router.timeout_secs, 10);
        assert!(config.router.is_configured());
        Ok(())
    });
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/ama/ama.db"

[feed]
posts_per_page = 50
trending_limit = 5
preview_length = 140
default_sort = "top"

[general]
default_limit = 100
"#,
        )?;

        let config: AmaConfig = Figment::from(Serialized::defaults(AmaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/ama/ama.db");
        assert_eq!(config.feed.posts_per_page, 50);
        assert_eq!(config.feed.trending_limit, 5);
        assert_eq!(config.feed.preview_length, 140);
        assert_eq!(config.feed.default_sort, FeedSort::Top);
        assert_eq!(config.general.default_limit, 100);
        assert!(!config.router.is_configured());
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ama")?;
        jail.create_file(
            ".ama/config.toml",
            r#"
[feed]
default_sort = "rising"
"#,
        )?;

        let config = AmaConfig::load().expect("config loads");
        assert_eq!(config.feed.default_sort, FeedSort::Rising);
        assert_eq!(config.feed.posts_per_page, 20);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ama")?;
        jail.create_file(
            ".ama/config.toml",
            r#"
[database]
path = "from-toml.db"
"#,
        )?;
        jail.set_env("AMA_DATABASE__PATH", "from-env.db");
        jail.set_env("AMA_ROUTER__TIMEOUT_SECS", "5");

        let config = AmaConfig::load().expect("config loads");
        assert_eq!(config.database.path, "from-env.db");
        assert_eq!(config.router.timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn env_layer_matches_figment_split() {
    Jail::expect_with(|jail| {
        jail.set_env("AMA_FEED__PREVIEW_LENGTH", "64");

        let config: AmaConfig = Figment::from(Serialized::defaults(AmaConfig::default()))
            .merge(Env::prefixed("AMA_").split("__"))
            .extract()?;

        assert_eq!(config.feed.preview_length, 64);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_load() {
    Jail::expect_with(|jail| {
        jail.set_env("AMA_FEED__POSTS_PER_PAGE", "0");

        let err = AmaConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
