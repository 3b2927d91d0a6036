use serde::{Deserialize, Serialize};

/// An inventory item. `name` is the natural key used in URLs;
/// `store_id` links the item to its owning store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}
