mod clothing_item;
mod favorite;
mod outfit;
mod recommendation;
mod user;

pub use clothing_item::{ClothingItem, ExternalUrls, ItemFilter, ItemId, NewClothingItem};
pub use favorite::{Favorite, NewFavorite};
pub use outfit::{NewOutfit, Outfit};
pub use recommendation::{MatchQuality, Recommendation};
pub use user::{Credentials, NewUser, User};
