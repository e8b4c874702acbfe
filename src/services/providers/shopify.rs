//! Shopify product provider
//!
//! Reads products from the Shopify admin API and derives the matching
//! attributes (color, style, occasion, category) from the product tags.
//! Prices are converted from USD to rupees at a fixed rate.
use crate::{
    error::{AppError, AppResult},
    models::{ExternalUrls, NewClothingItem},
    services::providers::ProductProvider,
};
use reqwest::{Client as HttpClient, Url};
use serde::Deserialize;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
const INR_PER_USD: f64 = 83.0;
/// Products with fewer units in stock are considered popular
const POPULAR_STOCK_THRESHOLD: i64 = 10;

const STYLE_TAGS: &[&str] = &[
    "casual",
    "formal",
    "sporty",
    "ethnic",
    "business",
    "party",
    "smart_casual",
];
const OCCASION_TAGS: &[&str] = &["casual", "formal", "business", "party", "sport"];
const COLOR_TAGS: &[&str] = &[
    "red", "blue", "green", "black", "white", "yellow", "purple", "pink", "orange", "brown",
    "grey", "beige",
];
const CATEGORY_TAGS: &[&str] = &["tops", "pants", "dresses", "shoes", "accessories", "outerwear"];

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyProduct {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
    #[serde(default)]
    pub image: Option<ShopifyImage>,
    /// Comma separated
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyVariant {
    pub price: String,
    #[serde(default)]
    pub inventory_quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyImage {
    pub src: String,
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Vec<ShopifyProduct>,
}

#[derive(Clone)]
pub struct ShopifyProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl ShopifyProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl ProductProvider for ShopifyProvider {
    async fn fetch_products(&self, category: &str, limit: u32) -> AppResult<Vec<NewClothingItem>> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::InvalidInput("API key is required".to_string()));
        }

        let url = format!("{}/products.json", self.api_url.trim_end_matches('/'));
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .header(ACCESS_TOKEN_HEADER, &self.api_key)
            .query(&[("limit", limit.as_str()), ("collection_id", category)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Shopify API returned status {}: {}",
                status, body
            )));
        }

        let body: ProductsResponse = response.json().await?;
        let fetched = body.products.len();

        let items: Vec<NewClothingItem> = body
            .products
            .into_iter()
            .filter_map(product_to_clothing_item)
            .collect();

        tracing::info!(
            provider = self.name(),
            category = %category,
            fetched,
            mapped = items.len(),
            "Fetched external products"
        );

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "shopify"
    }
}

fn first_tag<'a>(tags: &[&'a str], known: &[&str], fallback: &'a str) -> &'a str {
    tags.iter()
        .copied()
        .find(|tag| known.contains(tag))
        .unwrap_or(fallback)
}

/// Converts a Shopify product into a catalog item, skipping products without a usable price
pub fn product_to_clothing_item(product: ShopifyProduct) -> Option<NewClothingItem> {
    let Some(variant) = product.variants.first() else {
        tracing::warn!(product_id = product.id, "Skipping product without variants");
        return None;
    };

    let Ok(usd) = variant.price.trim().parse::<f64>() else {
        tracing::warn!(product_id = product.id, price = %variant.price, "Skipping product with unparsable price");
        return None;
    };

    let tags: Vec<&str> = product.tags.split(',').map(str::trim).collect();

    Some(NewClothingItem {
        category: first_tag(&tags, CATEGORY_TAGS, "tops").to_string(),
        color: first_tag(&tags, COLOR_TAGS, "black").to_string(),
        style: first_tag(&tags, STYLE_TAGS, "casual").to_string(),
        occasion: first_tag(&tags, OCCASION_TAGS, "casual").to_string(),
        price: format_rupees((usd * INR_PER_USD).floor().max(0.0) as u64),
        is_popular: variant.inventory_quantity < POPULAR_STOCK_THRESHOLD,
        external_urls: Some(shopping_links(product.id, &product.title)),
        is_external: true,
        image_url: product.image.map(|image| image.src).unwrap_or_default(),
        description: product.description,
        name: product.title,
    })
}

/// Formats whole rupees with Indian digit grouping, e.g. `₹1,23,456`
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

/// Spaces are encoded as `%20`; a literal `+` in the title is already `%2B`
fn search_url(base: &str, params: &[(&str, &str)]) -> Option<String> {
    Url::parse_with_params(base, params)
        .map(|url| url.as_str().replace('+', "%20"))
        .ok()
}

fn shopping_links(product_id: u64, title: &str) -> ExternalUrls {
    ExternalUrls {
        shopify: Some(format!("https://shopify.com/products/{}", product_id)),
        amazon: search_url("https://amazon.in/s", &[("k", title)]),
        flipkart: search_url("https://flipkart.com/search", &[("q", title)]),
        myntra: search_url("https://myntra.com/search", &[("q", title)]),
        ajio: search_url("https://www.ajio.com/search/", &[("text", title)]),
        tatacliq: search_url(
            "https://www.tatacliq.com/search/",
            &[("searchCategory", "all"), ("text", title)],
        ),
        nykaa: search_url("https://www.nykaafashion.com/search", &[("q", title)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(tags: &str, price: &str, stock: i64) -> ShopifyProduct {
        ShopifyProduct {
            id: 8812,
            title: "Linen Shirt".to_string(),
            description: "Breathable linen".to_string(),
            variants: vec![ShopifyVariant {
                price: price.to_string(),
                inventory_quantity: stock,
            }],
            image: Some(ShopifyImage {
                src: "https://cdn.shopify.com/linen.jpg".to_string(),
            }),
            tags: tags.to_string(),
        }
    }

    #[test]
    fn test_format_rupees_indian_grouping() {
        assert_eq!(format_rupees(0), "₹0");
        assert_eq!(format_rupees(599), "₹599");
        assert_eq!(format_rupees(1999), "₹1,999");
        assert_eq!(format_rupees(12345), "₹12,345");
        assert_eq!(format_rupees(123456), "₹1,23,456");
        assert_eq!(format_rupees(12345678), "₹1,23,45,678");
    }

    #[test]
    fn test_tags_drive_matching_attributes() {
        let item = product_to_clothing_item(product("summer, white, smart_casual, party, tops", "24.00", 50))
            .unwrap();

        assert_eq!(item.color, "white");
        assert_eq!(item.style, "smart_casual");
        assert_eq!(item.occasion, "party");
        assert_eq!(item.category, "tops");
        assert_eq!(item.price, "₹1,992");
        assert!(!item.is_popular);
        assert!(item.is_external);
        assert_eq!(item.image_url, "https://cdn.shopify.com/linen.jpg");
    }

    #[test]
    fn test_missing_tags_fall_back_to_defaults() {
        let item = product_to_clothing_item(product("", "10", 3)).unwrap();

        assert_eq!(item.color, "black");
        assert_eq!(item.style, "casual");
        assert_eq!(item.occasion, "casual");
        assert_eq!(item.category, "tops");
        assert!(item.is_popular);
    }

    #[test]
    fn test_products_without_price_are_skipped() {
        let mut no_variants = product("tops", "10", 1);
        no_variants.variants.clear();
        assert!(product_to_clothing_item(no_variants).is_none());

        assert!(product_to_clothing_item(product("tops", "free", 1)).is_none());
    }

    #[test]
    fn test_shopping_links_encode_title() {
        let links = shopping_links(8812, "Linen Shirt & Co");

        assert_eq!(links.shopify.as_deref(), Some("https://shopify.com/products/8812"));
        let amazon = links.amazon.unwrap();
        assert!(amazon.starts_with("https://amazon.in/s?k="));
        assert!(!amazon.contains(' '));
        assert!(amazon.contains("%26"));
        assert!(links.tatacliq.unwrap().contains("searchCategory=all"));
    }

    #[test]
    fn test_shopping_links_encode_spaces_as_percent_20() {
        let links = shopping_links(1, "Linen Shirt + Co");

        assert_eq!(
            links.amazon.as_deref(),
            Some("https://amazon.in/s?k=Linen%20Shirt%20%2B%20Co")
        );
        assert_eq!(
            links.tatacliq.as_deref(),
            Some("https://www.tatacliq.com/search/?searchCategory=all&text=Linen%20Shirt%20%2B%20Co")
        );
    }

    #[tokio::test]
    async fn test_empty_api_key_is_rejected_before_any_request() {
        let provider = ShopifyProvider::new("  ".to_string(), "http://127.0.0.1:9".to_string());
        let err = provider.fetch_products("tops", 5).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_products_response_tolerates_missing_list() {
        let body: ProductsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.products.is_empty());
    }
}
