use sqlx::PgPool;

use crate::models::item::Item;
use crate::models::store::Store;
use crate::models::user::User;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Build a store whose pool connects on first use. Lets the router be
    /// wired up (and DB-free routes exercised) without a live database.
    pub fn connect_lazy(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    // -- Item Operations --

    pub async fn find_item(&self, name: &str) -> anyhow::Result<Option<Item>> {
        let row = sqlx::query_as::<_, Item>(
            "SELECT id, name, price, store_id FROM items WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_items(&self) -> anyhow::Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, Item>(
            "SELECT id, name, price, store_id FROM items ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert_item(&self, name: &str, price: f64, store_id: i64) -> anyhow::Result<Item> {
        let row = sqlx::query_as::<_, Item>(
            r#"INSERT INTO items (name, price, store_id) VALUES ($1, $2, $3)
               RETURNING id, name, price, store_id"#,
        )
        .bind(name)
        .bind(price)
        .bind(store_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Price is the only mutable item attribute.
    pub async fn update_item_price(&self, name: &str, price: f64) -> anyhow::Result<Item> {
        let row = sqlx::query_as::<_, Item>(
            r#"UPDATE items SET price = $2 WHERE name = $1
               RETURNING id, name, price, store_id"#,
        )
        .bind(name)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_item(&self, name: &str) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Store Operations --

    pub async fn find_store(&self, name: &str) -> anyhow::Result<Option<Store>> {
        let row = sqlx::query_as::<_, Store>("SELECT id, name FROM stores WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_stores(&self) -> anyhow::Result<Vec<Store>> {
        let rows = sqlx::query_as::<_, Store>("SELECT id, name FROM stores ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn insert_store(&self, name: &str) -> anyhow::Result<Store> {
        let row = sqlx::query_as::<_, Store>(
            "INSERT INTO stores (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Deleting an absent store is not an error; the handler reports success
    /// either way.
    pub async fn delete_store(&self, name: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM stores WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn items_in_store(&self, store_id: i64) -> anyhow::Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, Item>(
            "SELECT id, name, price, store_id FROM items WHERE store_id = $1 ORDER BY id ASC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // -- User Operations --

    pub async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_user_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row =
            sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    pub async fn insert_user(&self, username: &str, password: &str) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn delete_user(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
