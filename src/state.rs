use crate::config::AppConfig;
use crate::db::MongoStore;
use crate::projects::repo::ProjectStore;
use crate::users::repo::UserStore;
use crate::users::repo_types::OwnerRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub projects: Arc<dyn ProjectStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(MongoStore::connect(&config.mongo).await?);
        Ok(Self::from_parts(config, store.clone(), store))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        projects: Arc<dyn ProjectStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            config,
            projects,
            users,
        }
    }

    pub fn owner(&self) -> OwnerRef {
        self.config.owner_id.into()
    }

    /// State over an in-process store, with a test JWT configuration.
    #[cfg(test)]
    pub fn fake(store: Arc<crate::db::MemoryStore>) -> Self {
        use crate::config::{JwtConfig, MongoConfig};

        let config = Arc::new(AppConfig {
            mongo: MongoConfig {
                uri: "mongodb://localhost:27017".into(),
                database: "portfolio-test".into(),
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            owner_id: None,
        });
        Self::from_parts(config, store.clone(), store)
    }
}
