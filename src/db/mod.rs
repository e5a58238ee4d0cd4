use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement, TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SeedConfig;
use crate::domain::{LookupKind, TicketId};
use crate::models::{HistoryEntry, LookupEntry, NewHistoryEntry, NewTicket, NewUser, Ticket, User};
use crate::services::stores::{HistoryStore, ReferenceStore, TicketStore};

pub mod migrator;
pub mod repositories;

pub use repositories::user::{UserChanges, hash_password};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each pooled connection to an in-memory SQLite URL would see its own
        // empty database.
        let max_connections = if in_memory { 1 } else { max_connections };
        let min_connections = min_connections.min(max_connections);

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn priority_repo(&self) -> repositories::priority::PriorityRepository {
        repositories::priority::PriorityRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn ticket_repo(&self) -> repositories::ticket::TicketRepository {
        repositories::ticket::TicketRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    /// Inserts the configured default priorities and categories into empty
    /// tables. Tables that already hold rows are left alone.
    pub async fn seed_reference_data(&self, seed: &SeedConfig) -> Result<()> {
        self.priority_repo().seed(&seed.priorities).await?;
        self.category_repo().seed(&seed.categories).await?;
        Ok(())
    }

    // Lookups

    pub async fn get_lookup(&self, kind: LookupKind, id: i32) -> Result<Option<LookupEntry>> {
        match kind {
            LookupKind::Priority => self.priority_repo().get(id).await,
            LookupKind::Category => self.category_repo().get(id).await,
        }
    }

    pub async fn find_lookup_by_name(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<LookupEntry>> {
        match kind {
            LookupKind::Priority => self.priority_repo().find_by_name(name).await,
            LookupKind::Category => self.category_repo().find_by_name(name).await,
        }
    }

    pub async fn list_lookups(&self, kind: LookupKind) -> Result<Vec<LookupEntry>> {
        match kind {
            LookupKind::Priority => self.priority_repo().list_all().await,
            LookupKind::Category => self.category_repo().list_all().await,
        }
    }

    pub async fn lookup_names(&self, kind: LookupKind) -> Result<Vec<String>> {
        match kind {
            LookupKind::Priority => self.priority_repo().names().await,
            LookupKind::Category => self.category_repo().names().await,
        }
    }

    pub async fn create_lookup(
        &self,
        kind: LookupKind,
        name: &str,
        description: &str,
    ) -> Result<LookupEntry> {
        match kind {
            LookupKind::Priority => self.priority_repo().create(name, description).await,
            LookupKind::Category => self.category_repo().create(name, description).await,
        }
    }

    pub async fn update_lookup(
        &self,
        kind: LookupKind,
        id: i32,
        name: &str,
        description: &str,
    ) -> Result<Option<LookupEntry>> {
        match kind {
            LookupKind::Priority => self.priority_repo().update(id, name, description).await,
            LookupKind::Category => self.category_repo().update(id, name, description).await,
        }
    }

    pub async fn delete_lookup(&self, kind: LookupKind, id: i32) -> Result<bool> {
        match kind {
            LookupKind::Priority => self.priority_repo().delete(id).await,
            LookupKind::Category => self.category_repo().delete(id).await,
        }
    }

    /// Number of tickets pointing at a lookup row.
    pub async fn lookup_usage(&self, kind: LookupKind, id: i32) -> Result<u64> {
        match kind {
            LookupKind::Priority => self.ticket_repo().count_with_priority(id).await,
            LookupKind::Category => self.ticket_repo().count_with_category(id).await,
        }
    }

    // Users

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        self.user_repo().create(user).await
    }

    pub async fn update_user(&self, id: i32, changes: UserChanges) -> Result<Option<User>> {
        self.user_repo().update(id, changes).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    /// Tickets submitted plus history entries authored by the user.
    pub async fn user_usage(&self, id: i32) -> Result<u64> {
        let submitted = self.ticket_repo().count_submitted_by(id).await?;
        let authored = self.history_repo().count_by_user(id).await?;
        Ok(submitted + authored)
    }

    // Tickets

    pub async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket> {
        self.ticket_repo().insert(ticket).await
    }

    pub async fn update_ticket(&self, ticket: &Ticket) -> Result<Ticket> {
        self.ticket_repo().update(ticket).await
    }

    /// Writes the ticket row and its history entry in one transaction.
    pub async fn save_status_change(
        &self,
        ticket: &Ticket,
        entry: NewHistoryEntry,
    ) -> Result<Ticket> {
        let txn = self.conn.begin().await?;

        let saved = repositories::ticket::TicketRepository::update_in(&txn, ticket).await?;
        let recorded = repositories::history::HistoryRepository::insert_in(&txn, entry).await?;

        txn.commit().await?;
        info!(
            ticket_id = saved.id.value(),
            history_id = recorded.id,
            "Status change committed"
        );
        Ok(saved)
    }

    pub async fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        self.ticket_repo().get(id).await
    }

    pub async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.ticket_repo().list_all().await
    }

    pub async fn delete_ticket(&self, id: TicketId) -> Result<bool> {
        self.ticket_repo().delete(id).await
    }

    // History

    pub async fn add_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry> {
        self.history_repo().insert(entry).await
    }

    pub async fn get_history(&self, id: i32) -> Result<Option<HistoryEntry>> {
        self.history_repo().get(id).await
    }

    pub async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        self.history_repo().list_all().await
    }

    pub async fn list_history_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<HistoryEntry>> {
        self.history_repo().list_for_ticket(ticket_id).await
    }

    pub async fn update_history_comment(
        &self,
        id: i32,
        comment: Option<String>,
    ) -> Result<Option<HistoryEntry>> {
        self.history_repo().update_comment(id, comment).await
    }
}

#[async_trait::async_trait]
impl ReferenceStore for Store {
    async fn find_lookup_by_id(&self, kind: LookupKind, id: i32) -> Result<Option<LookupEntry>> {
        self.get_lookup(kind, id).await
    }

    async fn find_lookup_by_name(
        &self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<LookupEntry>> {
        Self::find_lookup_by_name(self, kind, name).await
    }

    async fn lookup_names(&self, kind: LookupKind) -> Result<Vec<String>> {
        Self::lookup_names(self, kind).await
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.get_user(id).await
    }
}

#[async_trait::async_trait]
impl TicketStore for Store {
    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket> {
        Self::insert_ticket(self, ticket).await
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<Ticket> {
        self.update_ticket(ticket).await
    }

    async fn save_status_change(
        &self,
        ticket: &Ticket,
        entry: NewHistoryEntry,
    ) -> Result<Ticket> {
        Self::save_status_change(self, ticket, entry).await
    }

    async fn find_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        self.get_ticket(id).await
    }

    async fn delete_ticket(&self, id: TicketId) -> Result<bool> {
        Self::delete_ticket(self, id).await
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        Self::list_tickets(self).await
    }
}

#[async_trait::async_trait]
impl HistoryStore for Store {
    async fn insert_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry> {
        self.add_history(entry).await
    }

    async fn find_history(&self, id: i32) -> Result<Option<HistoryEntry>> {
        self.get_history(id).await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        Self::list_history(self).await
    }

    async fn list_history_for_ticket(&self, ticket_id: TicketId) -> Result<Vec<HistoryEntry>> {
        Self::list_history_for_ticket(self, ticket_id).await
    }

    async fn update_history_comment(
        &self,
        id: i32,
        comment: Option<String>,
    ) -> Result<Option<HistoryEntry>> {
        Self::update_history_comment(self, id, comment).await
    }
}
