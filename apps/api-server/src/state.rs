//! Application state - shared across all handlers.

use std::sync::Arc;

use portal_core::AccessPolicy;
use portal_core::ports::{
    CommentRepository, LikeRepository, PasswordService, PostRepository, TokenService,
    UserRepository, WaitlistRepository,
};
use portal_core::services::{AuthService, EngagementService, PublishingService, StatsService};
use portal_infra::{
    Argon2PasswordService, InMemoryCommentRepository, InMemoryLikeRepository,
    InMemoryPostRepository, InMemoryUserRepository, InMemoryWaitlistRepository, JwtConfig,
    JwtTokenService,
};

use crate::config::AppConfig;

/// The storage ports every service is built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub waitlist: Arc<dyn WaitlistRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            likes: Arc::new(InMemoryLikeRepository::new()),
            waitlist: Arc::new(InMemoryWaitlistRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(db: sea_orm::DbConn) -> Self {
        use portal_infra::database::{
            PostgresCommentRepository, PostgresLikeRepository, PostgresPostRepository,
            PostgresUserRepository, PostgresWaitlistRepository,
        };

        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            likes: Arc::new(PostgresLikeRepository::new(db.clone())),
            waitlist: Arc::new(PostgresWaitlistRepository::new(db)),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub engagement: Arc<EngagementService>,
    pub publishing: Arc<PublishingService>,
    pub stats: Arc<StatsService>,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    /// Wire the services over the given repositories.
    pub fn new(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(
                repos.users.clone(),
                repos.waitlist.clone(),
                passwords,
                tokens,
            )),
            engagement: Arc::new(EngagementService::new(
                repos.posts.clone(),
                repos.likes.clone(),
            )),
            publishing: Arc::new(PublishingService::new(
                repos.posts.clone(),
                repos.comments.clone(),
            )),
            stats: Arc::new(StatsService::new(repos.posts)),
            policy: Arc::new(policy),
        }
    }

    /// State backed entirely by in-memory repositories.
    pub fn in_memory(jwt: JwtConfig, policy: AccessPolicy) -> Self {
        Self::new(
            Repositories::in_memory(),
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(jwt)),
            policy,
        )
    }

    /// Build the application state from configuration.
    ///
    /// A configured database that cannot be reached is a startup failure.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let repos = match &config.database {
            #[cfg(feature = "postgres")]
            Some(settings) => {
                let db = portal_infra::connect(&portal_infra::DatabaseConfig {
                    url: settings.url.clone(),
                    max_connections: settings.max_connections,
                    min_connections: settings.min_connections,
                })
                .await?;
                Repositories::postgres(db)
            }
            #[cfg(not(feature = "postgres"))]
            Some(_) => {
                anyhow::bail!("DATABASE_URL is set but the server was built without postgres")
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Repositories::in_memory()
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self::new(
            repos,
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            AccessPolicy::new(config.founder_email.clone()),
        ))
    }
}
