//! Shared test utilities for ama-db unit tests.

pub(crate) mod helpers {
    use ama_core::entities::{Community, Profile};
    use ama_core::enums::AppRole;

    use crate::AmaDb;
    use crate::service::AmaService;

    /// In-memory service with no actor.
    pub async fn test_service() -> AmaService {
        let db = AmaDb::open_local(":memory:").await.unwrap();
        AmaService::from_db(db)
    }

    /// In-memory service whose mutations are attributed to `actor`.
    pub async fn test_service_as(actor: &str) -> AmaService {
        test_service().await.with_actor(Some(actor.to_string()))
    }

    /// Create a citizen profile with the given username.
    pub async fn citizen(svc: &AmaService, username: &str) -> Profile {
        svc.create_profile(username, None, AppRole::Citizen)
            .await
            .unwrap()
    }

    /// Create an official profile with the given username.
    pub async fn official(svc: &AmaService, username: &str) -> Profile {
        svc.create_profile(username, None, AppRole::Official)
            .await
            .unwrap()
    }

    /// Create an empty community with the given slug.
    pub async fn community(svc: &AmaService, name: &str) -> Community {
        svc.create_community(name, "", None, "general", None)
            .await
            .unwrap()
    }
}
