use serde::{Deserialize, Serialize};

use super::ItemId;

/// A pre-composed outfit made of catalog items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub total_price: String,
    pub occasion: String,
    /// Ids of the clothing items in this outfit
    pub items: Vec<ItemId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOutfit {
    pub name: String,
    pub description: String,
    pub total_price: String,
    pub occasion: String,
    pub items: Vec<ItemId>,
}

impl NewOutfit {
    pub fn with_id(self, id: ItemId) -> Outfit {
        Outfit {
            id,
            name: self.name,
            description: self.description,
            total_price: self.total_price,
            occasion: self.occasion,
            items: self.items,
        }
    }
}
