use super::IClientRepo;

use revela_domain::Client;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresClientRepo {
    pool: PgPool,
}

impl PostgresClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRaw {
    client_uid: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    deleted: bool,
}

impl From<ClientRaw> for Client {
    fn from(raw: ClientRaw) -> Self {
        Self {
            id: raw.client_uid.into(),
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            deleted: raw.deleted,
        }
    }
}

#[async_trait::async_trait]
impl IClientRepo for PostgresClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clients
            (client_uid, name, email, phone, deleted)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*client.id.inner_ref())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.deleted)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active_by_name(&self, name: &str) -> anyhow::Result<Option<Client>> {
        let client: Option<ClientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM clients
            WHERE name = $1 AND deleted = FALSE
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client.map(Into::into))
    }
}
