use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        ClothingItem, ExternalUrls, Favorite, ItemFilter, ItemId, NewClothingItem, NewFavorite,
        NewOutfit, NewUser, Outfit, User,
    },
};

const CLOTHING_SEED: &str = include_str!("../../data/clothing.json");
const OUTFITS_SEED: &str = include_str!("../../data/outfits.json");

/// Users, catalog, outfit and favorites store
///
/// Listing methods return items in catalog order (ascending id, which is
/// insertion order). Results are owned snapshots, so callers never hold the
/// store's lock while they work on them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    async fn user(&self, id: ItemId) -> AppResult<Option<User>>;

    async fn user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Stores a new user; usernames are unique
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    async fn clothing_items(&self) -> AppResult<Vec<ClothingItem>>;

    async fn clothing_item(&self, id: ItemId) -> AppResult<Option<ClothingItem>>;

    async fn clothing_items_matching(&self, filter: ItemFilter) -> AppResult<Vec<ClothingItem>>;

    /// Stores a new item under the next free id
    async fn add_clothing_item(&self, item: NewClothingItem) -> AppResult<ClothingItem>;

    /// Replaces an item's shopping links, returning `None` for an unknown id
    async fn set_external_urls(
        &self,
        id: ItemId,
        urls: Option<ExternalUrls>,
    ) -> AppResult<Option<ClothingItem>>;

    async fn outfits(&self) -> AppResult<Vec<Outfit>>;

    async fn outfit(&self, id: ItemId) -> AppResult<Option<Outfit>>;

    async fn outfits_by_occasion(&self, occasion: &str) -> AppResult<Vec<Outfit>>;

    async fn favorites_for_user(&self, user_id: ItemId) -> AppResult<Vec<Favorite>>;

    async fn add_favorite(&self, favorite: NewFavorite) -> AppResult<Favorite>;

    /// Removing an unknown favorite is a no-op
    async fn remove_favorite(&self, id: ItemId) -> AppResult<()>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}

struct MemStorageInner {
    users: BTreeMap<ItemId, User>,
    clothing_items: BTreeMap<ItemId, ClothingItem>,
    outfits: BTreeMap<ItemId, Outfit>,
    favorites: BTreeMap<ItemId, Favorite>,
    next_user_id: ItemId,
    next_item_id: ItemId,
    next_outfit_id: ItemId,
    next_favorite_id: ItemId,
}

impl MemStorageInner {
    fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            clothing_items: BTreeMap::new(),
            outfits: BTreeMap::new(),
            favorites: BTreeMap::new(),
            next_user_id: 1,
            next_item_id: 1,
            next_outfit_id: 1,
            next_favorite_id: 1,
        }
    }

    fn insert_item(&mut self, item: NewClothingItem) -> ClothingItem {
        let id = self.next_item_id;
        self.next_item_id += 1;
        let item = item.with_id(id);
        self.clothing_items.insert(id, item.clone());
        item
    }

    fn insert_outfit(&mut self, outfit: NewOutfit) -> Outfit {
        let id = self.next_outfit_id;
        self.next_outfit_id += 1;
        let outfit = outfit.with_id(id);
        self.outfits.insert(id, outfit.clone());
        outfit
    }
}

/// In-memory store keyed by auto-incrementing ids
pub struct MemStorage {
    inner: RwLock<MemStorageInner>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemStorageInner::new()),
        }
    }

    /// Creates a store loaded with the bundled clothing catalog and outfits
    pub fn seeded() -> anyhow::Result<Self> {
        let items: Vec<NewClothingItem> = serde_json::from_str(CLOTHING_SEED)
            .map_err(|e| anyhow::anyhow!("Failed to parse clothing seed data: {}", e))?;
        let outfits: Vec<NewOutfit> = serde_json::from_str(OUTFITS_SEED)
            .map_err(|e| anyhow::anyhow!("Failed to parse outfit seed data: {}", e))?;

        let mut inner = MemStorageInner::new();
        for item in items {
            inner.insert_item(NewClothingItem {
                is_external: false,
                external_urls: None,
                ..item
            });
        }
        for outfit in outfits {
            inner.insert_outfit(outfit);
        }

        tracing::info!(
            clothing_items = inner.clothing_items.len(),
            outfits = inner.outfits.len(),
            "Seeded in-memory catalog"
        );

        Ok(Self {
            inner: RwLock::new(inner),
        })
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn user(&self, id: ItemId) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(AppError::InvalidInput("Username already exists".to_string()));
        }

        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = user.with_id(id);
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn clothing_items(&self) -> AppResult<Vec<ClothingItem>> {
        let inner = self.inner.read().await;
        Ok(inner.clothing_items.values().cloned().collect())
    }

    async fn clothing_item(&self, id: ItemId) -> AppResult<Option<ClothingItem>> {
        let inner = self.inner.read().await;
        Ok(inner.clothing_items.get(&id).cloned())
    }

    async fn clothing_items_matching(&self, filter: ItemFilter) -> AppResult<Vec<ClothingItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .clothing_items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn add_clothing_item(&self, item: NewClothingItem) -> AppResult<ClothingItem> {
        let mut inner = self.inner.write().await;
        Ok(inner.insert_item(item))
    }

    async fn set_external_urls(
        &self,
        id: ItemId,
        urls: Option<ExternalUrls>,
    ) -> AppResult<Option<ClothingItem>> {
        let mut inner = self.inner.write().await;
        Ok(inner.clothing_items.get_mut(&id).map(|item| {
            item.external_urls = urls;
            item.clone()
        }))
    }

    async fn outfits(&self) -> AppResult<Vec<Outfit>> {
        let inner = self.inner.read().await;
        Ok(inner.outfits.values().cloned().collect())
    }

    async fn outfit(&self, id: ItemId) -> AppResult<Option<Outfit>> {
        let inner = self.inner.read().await;
        Ok(inner.outfits.get(&id).cloned())
    }

    async fn outfits_by_occasion(&self, occasion: &str) -> AppResult<Vec<Outfit>> {
        let inner = self.inner.read().await;
        Ok(inner
            .outfits
            .values()
            .filter(|outfit| outfit.occasion == occasion)
            .cloned()
            .collect())
    }

    async fn favorites_for_user(&self, user_id: ItemId) -> AppResult<Vec<Favorite>> {
        let inner = self.inner.read().await;
        Ok(inner
            .favorites
            .values()
            .filter(|favorite| favorite.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, favorite: NewFavorite) -> AppResult<Favorite> {
        let mut inner = self.inner.write().await;
        let id = inner.next_favorite_id;
        inner.next_favorite_id += 1;
        let favorite = favorite.with_id(id);
        inner.favorites.insert(id, favorite.clone());
        Ok(favorite)
    }

    async fn remove_favorite(&self, id: ItemId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.favorites.remove(&id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
