use ama_config::AmaConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &AmaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &AmaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.router.is_configured() && has_env_prefix(&env_keys, "AMA_ROUTER") {
        warnings.push(
            "Router config appears default while AMA_ROUTER* env vars exist. Use double underscores (example: AMA_ROUTER__BASE_URL)."
                .to_string(),
        );
    }

    if config.database.path == AmaConfig::default().database.path
        && env_keys
            .iter()
            .any(|key| key.starts_with("AMA_DATABASE") && key != "AMA_DATABASE__PATH")
    {
        warnings.push(
            "Database path appears default while AMA_DATABASE* env vars exist. Use double underscores (example: AMA_DATABASE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use ama_config::{AmaConfig, RouterConfig};

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let config = AmaConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("AMA_ROUTER_BASE_URL".to_string(), "https://fn.example.org".to_string()),
                ("AMA_DATABASE_PATH".to_string(), "/var/lib/ama.db".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_when_router_is_configured() {
        let config = AmaConfig {
            router: RouterConfig {
                base_url: "https://fn.example.org".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![("AMA_ROUTER__BASE_URL".to_string(), "https://fn.example.org".to_string())],
        );

        assert!(warnings.is_empty());
    }
}
