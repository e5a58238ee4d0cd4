use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    DefaultHistoryService, DefaultTicketService, HistoryService, HistoryStore, ReferenceService,
    ReferenceStore, SeaOrmReferenceService, SeaOrmUserService, TicketService, TicketStore,
    UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub ticket_service: Arc<dyn TicketService>,

    pub history_service: Arc<dyn HistoryService>,

    pub reference_service: Arc<dyn ReferenceService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if config.seed.enabled {
            store.seed_reference_data(&config.seed).await?;
        }

        Ok(Self::with_store(config, store))
    }

    /// Wires every service on top of an already-migrated store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let shared = Arc::new(store.clone());
        let references: Arc<dyn ReferenceStore> = shared.clone();
        let tickets: Arc<dyn TicketStore> = shared.clone();
        let history: Arc<dyn HistoryStore> = shared;

        let ticket_service =
            Arc::new(DefaultTicketService::new(references.clone(), tickets.clone()))
                as Arc<dyn TicketService>;

        let history_service =
            Arc::new(DefaultHistoryService::new(references, tickets, history))
                as Arc<dyn HistoryService>;

        let reference_service =
            Arc::new(SeaOrmReferenceService::new(store.clone())) as Arc<dyn ReferenceService>;

        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn UserService>;

        info!("Services initialized");

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            ticket_service,
            history_service,
            reference_service,
            user_service,
        }
    }
}
