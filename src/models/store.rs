use serde::{Deserialize, Serialize};

use crate::models::item::Item;

/// A store row. `name` is the natural key used in URLs.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

/// Store representation returned by the API: the store plus every item it
/// owns.
#[derive(Debug, Serialize)]
pub struct StoreWithItems {
    pub id: i64,
    pub name: String,
    pub items: Vec<Item>,
}

impl StoreWithItems {
    pub fn new(store: Store, items: Vec<Item>) -> Self {
        Self {
            id: store.id,
            name: store.name,
            items,
        }
    }
}
