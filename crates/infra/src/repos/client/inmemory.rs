use super::IClientRepo;
use crate::repos::shared::inmemory_repo::*;
use revela_domain::Client;

pub struct InMemoryClientRepo {
    clients: std::sync::Mutex<Vec<Client>>,
}

impl InMemoryClientRepo {
    pub fn new() -> Self {
        Self {
            clients: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IClientRepo for InMemoryClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        insert(client, &self.clients);
        Ok(())
    }

    async fn find_active_by_name(&self, name: &str) -> anyhow::Result<Option<Client>> {
        let matches = find_by(&self.clients, |c| c.name == name && !c.deleted);
        Ok(matches.into_iter().next())
    }
}
