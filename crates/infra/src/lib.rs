mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, NotificationConfig, OpenAIConfig};
pub use repos::{IReminderRepo, IUserRepo, InsertUserError, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

/// External services the reminder core talks to
#[derive(Clone)]
pub struct Services {
    pub extraction: Arc<dyn IExtractionService>,
    pub notifications: Arc<dyn INotificationGateway>,
}

impl Services {
    fn create(config: &Config) -> Self {
        Self {
            extraction: Arc::new(OpenAIExtractionService::new(config.openai.clone())),
            notifications: Arc::new(TwilioGateway::new(config.notifications.clone())),
        }
    }
}

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
}

struct ContextParams {
    pub mongodb_connection_string: Option<String>,
    pub mongodb_db_name: String,
}

impl ReminderContext {
    async fn create(params: ContextParams) -> Self {
        let repos = match params.mongodb_connection_string {
            Some(connection_string) => {
                info!("Using MongoDB repositories");
                Repos::create_mongodb(&connection_string, &params.mongodb_db_name)
                    .await
                    .expect("MongoDB credentials must be valid")
            }
            None => {
                warn!("MONGODB_CONNECTION_STRING is not set, using inmemory repositories. Data will be lost on restart.");
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        let services = Services::create(&config);

        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            services,
        }
    }

    /// Context backed by inmemory repositories, useful for testing
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let services = Services::create(&config);

        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            services,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> ReminderContext {
    ReminderContext::create(ContextParams {
        mongodb_connection_string: std::env::var("MONGODB_CONNECTION_STRING").ok(),
        mongodb_db_name: std::env::var("MONGODB_DATABASE")
            .unwrap_or_else(|_| "reminderAppDB".into()),
    })
    .await
}
