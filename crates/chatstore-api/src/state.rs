//! Application state wiring all services together.
//!
//! Services are generic over repository traits; AppState pins them to the
//! SQLite implementations and carries the access and throttling components
//! shared by every request.

use std::sync::Arc;
use std::time::Instant;

use chatstore_core::access::CredentialVerifier;
use chatstore_core::service::message::MessageService;
use chatstore_core::service::session::SessionService;
use chatstore_core::throttle::{RateLimitConfig, SlidingWindowLimiter};
use chatstore_infra::auth::StaticKeyVerifier;
use chatstore_infra::sqlite::message::SqliteMessageRepository;
use chatstore_infra::sqlite::pool::DatabasePool;
use chatstore_infra::sqlite::session::SqliteSessionRepository;
use chatstore_types::config::ServerConfig;
use secrecy::SecretString;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSessionService = SessionService<SqliteSessionRepository>;

pub type ConcreteMessageService = MessageService<SqliteMessageRepository>;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<ConcreteSessionService>,
    pub message_service: Arc<ConcreteMessageService>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub db_pool: DatabasePool,
    pub config: Arc<ServerConfig>,
    pub started_at: Instant,
}

impl AppState {
    /// Open the database (running migrations) and wire services.
    pub async fn init(config: ServerConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;
        Ok(Self::from_pool(config, db_pool))
    }

    /// Wire services on top of an already opened pool.
    pub fn from_pool(config: ServerConfig, db_pool: DatabasePool) -> Self {
        let verifier = StaticKeyVerifier::new(&SecretString::from(config.api_key.clone()));
        let limiter = SlidingWindowLimiter::new(RateLimitConfig::new(
            config.rate_limit.max_requests,
            config.rate_limit.window_secs,
        ));

        Self {
            session_service: Arc::new(SessionService::new(SqliteSessionRepository::new(
                db_pool.clone(),
            ))),
            message_service: Arc::new(MessageService::new(SqliteMessageRepository::new(
                db_pool.clone(),
            ))),
            verifier: Arc::new(verifier),
            limiter: Arc::new(limiter),
            db_pool,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
