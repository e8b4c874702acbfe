use serde::{Deserialize, Serialize};

/// Identifier shared by every catalog entity (items, outfits, favorites)
pub type ItemId = u32;

/// Links to the same product on external shopping sites
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopify: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipkart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub myntra: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ajio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tatacliq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nykaa: Option<String>,
}

/// A clothing item in the catalog
///
/// Only `color`, `style` and `occasion` take part in matching; every other
/// field is carried through to clients untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: ItemId,
    pub name: String,
    /// tops, pants, dresses, shoes, accessories, outerwear, ethnic, ...
    pub category: String,
    /// Display price, e.g. "₹1,999"
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub color: String,
    pub style: String,
    pub occasion: String,
    pub is_popular: bool,
    pub external_urls: Option<ExternalUrls>,
    pub is_external: bool,
}

/// A clothing item that has not been assigned an id yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewClothingItem {
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub color: String,
    pub style: String,
    pub occasion: String,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub is_external: bool,
}

impl NewClothingItem {
    /// Attaches an id, producing a catalog entry
    pub fn with_id(self, id: ItemId) -> ClothingItem {
        ClothingItem {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
            color: self.color,
            style: self.style,
            occasion: self.occasion,
            is_popular: self.is_popular,
            external_urls: self.external_urls,
            is_external: self.is_external,
        }
    }
}

/// Attribute filter for catalog queries; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub occasion: Option<String>,
    pub popular: Option<bool>,
    pub external: Option<bool>,
}

impl ItemFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn popular() -> Self {
        Self {
            popular: Some(true),
            ..Self::default()
        }
    }

    pub fn external() -> Self {
        Self {
            external: Some(true),
            ..Self::default()
        }
    }

    /// Checks whether an item satisfies every populated field
    pub fn matches(&self, item: &ClothingItem) -> bool {
        fn field_ok(wanted: &Option<String>, actual: &str) -> bool {
            wanted.as_deref().map_or(true, |w| w == actual)
        }

        field_ok(&self.category, &item.category)
            && field_ok(&self.color, &item.color)
            && field_ok(&self.style, &item.style)
            && field_ok(&self.occasion, &item.occasion)
            && self.popular.map_or(true, |p| p == item.is_popular)
            && self.external.map_or(true, |e| e == item.is_external)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ClothingItem {
        NewClothingItem {
            name: "Black Basic Tee".to_string(),
            category: "tops".to_string(),
            price: "₹599".to_string(),
            description: "Essential black t-shirt".to_string(),
            image_url: "https://example.com/tee.jpg".to_string(),
            color: "black".to_string(),
            style: "casual".to_string(),
            occasion: "casual".to_string(),
            is_popular: true,
            external_urls: None,
            is_external: false,
        }
        .with_id(2)
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(value["imageUrl"], "https://example.com/tee.jpg");
        assert_eq!(value["isPopular"], true);
        assert_eq!(value["isExternal"], false);
        assert!(value["externalUrls"].is_null());
    }

    #[test]
    fn test_new_item_flags_default_to_false() {
        let item: NewClothingItem = serde_json::from_value(json!({
            "name": "Khaki Chinos",
            "category": "pants",
            "price": "₹2,299",
            "description": "Chinos",
            "imageUrl": "https://example.com/chinos.jpg",
            "color": "khaki",
            "style": "smart_casual",
            "occasion": "business"
        }))
        .unwrap();

        assert!(!item.is_popular);
        assert!(!item.is_external);
        assert_eq!(item.external_urls, None);
    }

    #[test]
    fn test_external_urls_omit_missing_shops() {
        let urls = ExternalUrls {
            amazon: Some("https://amazon.in/s?k=tee".to_string()),
            ..ExternalUrls::default()
        };
        let value = serde_json::to_value(&urls).unwrap();
        assert_eq!(value, json!({ "amazon": "https://amazon.in/s?k=tee" }));
    }

    #[test]
    fn test_filter_matches_all_populated_fields() {
        let item = sample();

        assert!(ItemFilter::default().matches(&item));
        assert!(ItemFilter::category("tops").matches(&item));
        assert!(!ItemFilter::category("pants").matches(&item));
        assert!(ItemFilter::popular().matches(&item));
        assert!(!ItemFilter::external().matches(&item));

        let filter = ItemFilter {
            color: Some("black".to_string()),
            style: Some("formal".to_string()),
            ..ItemFilter::default()
        };
        assert!(!filter.matches(&item));
    }
}
