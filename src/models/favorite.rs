use serde::{Deserialize, Serialize};

use super::ItemId;

/// A user's saved item or outfit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: ItemId,
    pub user_id: ItemId,
    pub item_id: Option<ItemId>,
    pub outfit_id: Option<ItemId>,
}

/// Request to save a favorite; at least one of `item_id` / `outfit_id` must be set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: ItemId,
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub outfit_id: Option<ItemId>,
}

impl NewFavorite {
    /// A favorite must point at something
    pub fn is_valid(&self) -> bool {
        self.item_id.is_some() || self.outfit_id.is_some()
    }

    pub fn with_id(self, id: ItemId) -> Favorite {
        Favorite {
            id,
            user_id: self.user_id,
            item_id: self.item_id,
            outfit_id: self.outfit_id,
        }
    }
}
