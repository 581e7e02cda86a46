mod inmemory;
mod postgres;

pub use inmemory::InMemoryClientRepo;
pub use postgres::PostgresClientRepo;
use revela_domain::Client;

#[async_trait::async_trait]
pub trait IClientRepo: Send + Sync {
    async fn insert(&self, client: &Client) -> anyhow::Result<()>;
    /// Exact, case-sensitive name lookup, excluding soft-deleted clients
    async fn find_active_by_name(&self, name: &str) -> anyhow::Result<Option<Client>>;
}
