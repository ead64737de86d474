use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use ama_config::AmaConfig;
use ama_db::service::AmaService;
use ama_router::RouterClient;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AmaService,
    pub config: AmaConfig,
    pub database_path: String,
}

impl AppContext {
    /// Open the database named by `--database` or `database.path`, creating
    /// its directory when needed.
    pub async fn init(config: AmaConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let database_path = database_path(&config, flags);

        if database_path != ":memory:" {
            if let Some(parent) = Path::new(&database_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let service = AmaService::new_local(&database_path)
            .await
            .with_context(|| format!("failed to open database at {database_path}"))?
            .with_actor(flags.actor.clone());

        tracing::debug!(database = %database_path, actor = ?flags.actor, "ama context ready");

        Ok(Self {
            service,
            config,
            database_path,
        })
    }
}

/// Build a routing client from the `router` section.
pub fn router_client(config: &AmaConfig) -> anyhow::Result<RouterClient> {
    let router = config.require_router()?;
    let api_key = (!router.api_key.is_empty()).then(|| router.api_key.clone());
    RouterClient::new(
        &router.base_url,
        api_key,
        Duration::from_secs(router.timeout_secs),
    )
    .context("failed to build routing client")
}

fn database_path(config: &AmaConfig, flags: &GlobalFlags) -> String {
    flags
        .database
        .clone()
        .unwrap_or_else(|| config.database.path.clone())
}

#[cfg(test)]
mod tests {
    use ama_config::AmaConfig;

    use super::{AppContext, database_path, router_client};
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(database: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: true,
            verbose: false,
            database: database.map(String::from),
            actor: Some("usr-c1e4c000".to_string()),
        }
    }

    #[test]
    fn flag_overrides_configured_path() {
        let config = AmaConfig::default();
        assert_eq!(database_path(&config, &flags(None)), ".ama/ama.db");
        assert_eq!(database_path(&config, &flags(Some(":memory:"))), ":memory:");
    }

    #[test]
    fn router_requires_base_url() {
        let err = router_client(&AmaConfig::default()).err().expect("should fail");
        assert!(err.to_string().contains("router"));
    }

    #[tokio::test]
    async fn creates_nested_database_directory() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let path = dir.path().join("nested/state/ama.db");
        let path = path.to_string_lossy().to_string();

        let ctx = AppContext::init(AmaConfig::default(), &flags(Some(&path)))
            .await
            .expect("context should open");

        assert_eq!(ctx.service.actor(), Some("usr-c1e4c000"));
        assert!(std::path::Path::new(&path).exists());
    }
}
