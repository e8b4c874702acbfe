//! Outfit compatibility scoring
//!
//! Scores how well two clothing items go together by color, style and
//! occasion, and ranks candidate pools against a single reference item or
//! against a whole selection of items.
//!
//! The compatibility tables are directed: `black` lists `pink` as a
//! complement but `pink` does not list `black`, so `match_score(a, b)` and
//! `match_score(b, a)` can differ. The tables are kept exactly as curated.

use crate::models::{ClothingItem, MatchQuality, Recommendation};

/// Number of results returned when the caller does not ask for a limit
pub const DEFAULT_LIMIT: usize = 10;

/// Placeholder score given to popular items when nothing is selected
pub const SUGGESTED_SCORE: f64 = 50.0;

const SAME_COLOR_POINTS: u32 = 20;
const COMPLEMENTARY_COLOR_POINTS: u32 = 40;
const SAME_STYLE_POINTS: u32 = 40;
const COMPATIBLE_STYLE_POINTS: u32 = 30;
const SAME_OCCASION_POINTS: u32 = 20;

type CompatibilityTable = &'static [(&'static str, &'static [&'static str])];

/// Colors that pair well with each key color
const COLOR_MATCHES: CompatibilityTable = &[
    ("black", &["white", "gray", "blue", "red", "pink"]),
    ("white", &["black", "navy", "blue", "red", "gray", "brown"]),
    ("gray", &["black", "white", "blue", "pink", "purple"]),
    ("blue", &["white", "gray", "navy", "khaki", "brown"]),
    ("navy", &["white", "gray", "blue", "khaki"]),
    ("red", &["white", "black", "gray", "denim"]),
    ("pink", &["white", "gray", "navy", "denim"]),
    ("green", &["white", "black", "khaki", "brown"]),
    ("khaki", &["navy", "white", "blue", "green", "brown"]),
    ("brown", &["white", "blue", "khaki", "green"]),
    ("denim", &["white", "black", "red", "pink"]),
    ("purple", &["white", "gray", "black"]),
    ("yellow", &["white", "navy", "gray"]),
    ("orange", &["white", "navy", "blue", "gray"]),
];

/// Styles that can be worn with each key style.
/// Note the `sport` key: items are tagged `sporty`, so it never matches a first argument.
const STYLE_COMPATIBILITY: CompatibilityTable = &[
    ("casual", &["casual", "sporty"]),
    ("formal", &["formal", "business"]),
    ("business", &["formal", "business", "smart_casual"]),
    ("party", &["party", "smart_casual"]),
    ("sport", &["sporty", "casual"]),
    ("smart_casual", &["business", "casual", "party"]),
];

fn complements(table: CompatibilityTable, key: &str) -> &'static [&'static str] {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, values)| *values)
        .unwrap_or(&[])
}

/// A scored candidate borrowed from the caller's item pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub item: &'a ClothingItem,
    pub score: f64,
    pub quality: MatchQuality,
}

impl<'a> MatchResult<'a> {
    fn scored(item: &'a ClothingItem, score: f64) -> Self {
        Self {
            item,
            score,
            quality: MatchQuality::for_score(score),
        }
    }
}

impl From<MatchResult<'_>> for Recommendation {
    fn from(result: MatchResult<'_>) -> Self {
        Self {
            item: result.item.clone(),
            score: result.score,
            quality: result.quality,
        }
    }
}

/// Compatibility of `item2` with `item1`, in `0..=100`
///
/// Color is looked up in `item1`'s table, so the argument order matters.
/// Unknown colors or styles simply earn no points for that component.
pub fn match_score(item1: &ClothingItem, item2: &ClothingItem) -> u32 {
    let color = if item1.color == item2.color {
        SAME_COLOR_POINTS
    } else if complements(COLOR_MATCHES, &item1.color).contains(&item2.color.as_str()) {
        COMPLEMENTARY_COLOR_POINTS
    } else {
        0
    };

    let style = if item1.style == item2.style {
        SAME_STYLE_POINTS
    } else if complements(STYLE_COMPATIBILITY, &item1.style).contains(&item2.style.as_str()) {
        COMPATIBLE_STYLE_POINTS
    } else {
        0
    };

    let occasion = if item1.occasion == item2.occasion {
        SAME_OCCASION_POINTS
    } else {
        0
    };

    color + style + occasion
}

/// Highest score first; `sort_by` is stable so ties keep their input order
fn rank(mut results: Vec<MatchResult<'_>>, limit: usize) -> Vec<MatchResult<'_>> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(limit);
    results
}

/// Ranks `candidates` by how well they match `reference`
///
/// The reference itself is skipped (compared by id) if it appears in the pool.
pub fn recommend_matches<'a, I>(
    reference: &ClothingItem,
    candidates: I,
    limit: usize,
) -> Vec<MatchResult<'a>>
where
    I: IntoIterator<Item = &'a ClothingItem>,
{
    let scored = candidates
        .into_iter()
        .filter(|item| item.id != reference.id)
        .map(|item| MatchResult::scored(item, f64::from(match_score(reference, item))))
        .collect();

    rank(scored, limit)
}

/// Ranks items of `target_category` by their average score against every selected item
///
/// With an empty selection no scoring happens: popular items of the category
/// are returned in catalog order as suggestions.
pub fn complementary_items<'a, I>(
    selected: &[&ClothingItem],
    all_items: I,
    target_category: &str,
    limit: usize,
) -> Vec<MatchResult<'a>>
where
    I: IntoIterator<Item = &'a ClothingItem>,
{
    let category_items = all_items
        .into_iter()
        .filter(|item| item.category == target_category);

    if selected.is_empty() {
        return category_items
            .filter(|item| item.is_popular)
            .take(limit)
            .map(|item| MatchResult {
                item,
                score: SUGGESTED_SCORE,
                quality: MatchQuality::Suggested,
            })
            .collect();
    }

    let count = selected.len() as f64;
    let scored = category_items
        .filter(|item| !selected.iter().any(|s| s.id == item.id))
        .map(|item| {
            let total: u32 = selected.iter().map(|s| match_score(s, item)).sum();
            MatchResult::scored(item, f64::from(total) / count)
        })
        .collect();

    rank(scored, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewClothingItem;

    fn item(id: u32, category: &str, color: &str, style: &str, occasion: &str) -> ClothingItem {
        NewClothingItem {
            name: format!("Item {}", id),
            category: category.to_string(),
            price: "₹999".to_string(),
            description: String::new(),
            image_url: String::new(),
            color: color.to_string(),
            style: style.to_string(),
            occasion: occasion.to_string(),
            is_popular: false,
            external_urls: None,
            is_external: false,
        }
        .with_id(id)
    }

    fn popular(mut item: ClothingItem) -> ClothingItem {
        item.is_popular = true;
        item
    }

    fn ids(results: &[MatchResult<'_>]) -> Vec<u32> {
        results.iter().map(|r| r.item.id).collect()
    }

    #[test]
    fn test_self_comparison_scores_80() {
        let shirt = item(1, "tops", "white", "business", "formal");
        assert_eq!(match_score(&shirt, &shirt), 80);
        assert_eq!(
            MatchQuality::for_score(f64::from(match_score(&shirt, &shirt))),
            MatchQuality::Perfect
        );
    }

    #[test]
    fn test_complementary_color_and_compatible_style() {
        let tee = item(1, "tops", "black", "casual", "casual");
        let sneakers = item(2, "shoes", "white", "sporty", "casual");
        assert_eq!(match_score(&tee, &sneakers), 90);
    }

    #[test]
    fn test_unknown_tokens_score_zero() {
        let a = item(1, "tops", "teal", "grunge", "festival");
        let b = item(2, "pants", "mauve", "boho", "wedding");
        assert_eq!(match_score(&a, &b), 0);
        assert_eq!(MatchQuality::for_score(0.0), MatchQuality::Basic);
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let colors = ["black", "white", "pink", "denim", "teal"];
        let styles = ["casual", "sporty", "formal", "smart_casual", "sport"];
        let occasions = ["casual", "formal"];

        let mut pool = Vec::new();
        for color in colors {
            for style in styles {
                for occasion in occasions {
                    pool.push(item(pool.len() as u32, "tops", color, style, occasion));
                }
            }
        }

        for a in &pool {
            for b in &pool {
                assert!(match_score(a, b) <= 100);
            }
        }
    }

    #[test]
    fn test_color_table_is_directed() {
        let black = item(1, "tops", "black", "casual", "casual");
        let pink = item(2, "tops", "pink", "casual", "casual");

        // black lists pink, pink does not list black
        assert_eq!(match_score(&black, &pink), 100);
        assert_eq!(match_score(&pink, &black), 60);
        assert_eq!(match_score(&black, &pink) - match_score(&pink, &black), 40);
    }

    #[test]
    fn test_white_and_brown_list_each_other() {
        assert!(complements(COLOR_MATCHES, "white").contains(&"brown"));
        assert!(complements(COLOR_MATCHES, "brown").contains(&"white"));
    }

    #[test]
    fn test_style_table_is_directed() {
        let casual = item(1, "tops", "black", "casual", "casual");
        let sporty = item(2, "tops", "black", "sporty", "casual");

        assert_eq!(match_score(&casual, &sporty), 20 + 30 + 20);
        // no `sporty` key in the table
        assert_eq!(match_score(&sporty, &casual), 40);
    }

    #[test]
    fn test_recommend_matches_orders_by_score_with_stable_ties() {
        let reference = item(100, "tops", "black", "casual", "casual");
        let c1 = item(1, "pants", "green", "sporty", "formal");
        let c2 = item(2, "pants", "white", "sporty", "casual");
        let c3 = item(3, "pants", "gray", "sporty", "casual");
        let c4 = item(4, "pants", "black", "sporty", "formal");
        let candidates = vec![c1, c2, c3, c4];

        let scores: Vec<u32> = candidates.iter().map(|c| match_score(&reference, c)).collect();
        assert_eq!(scores, vec![30, 90, 90, 50]);

        let results = recommend_matches(&reference, &candidates, 3);
        assert_eq!(ids(&results), vec![2, 3, 4]);
        assert_eq!(results[0].score, 90.0);
        assert_eq!(results[0].quality, MatchQuality::Perfect);
        assert_eq!(results[2].quality, MatchQuality::Good);
    }

    #[test]
    fn test_recommend_matches_skips_the_reference_item() {
        let reference = item(1, "tops", "black", "casual", "casual");
        let other = item(2, "pants", "white", "casual", "casual");
        let candidates = vec![reference.clone(), other];

        let results = recommend_matches(&reference, &candidates, DEFAULT_LIMIT);
        assert_eq!(ids(&results), vec![2]);
    }

    #[test]
    fn test_recommend_matches_with_small_or_empty_pool() {
        let reference = item(1, "tops", "black", "casual", "casual");
        let empty: Vec<ClothingItem> = Vec::new();
        assert!(recommend_matches(&reference, &empty, DEFAULT_LIMIT).is_empty());

        let candidates = vec![item(2, "pants", "white", "casual", "casual")];
        assert_eq!(recommend_matches(&reference, &candidates, DEFAULT_LIMIT).len(), 1);
        assert!(recommend_matches(&reference, &candidates, 0).is_empty());
    }

    #[test]
    fn test_empty_selection_suggests_popular_items_in_catalog_order() {
        let catalog = vec![
            item(1, "shoes", "white", "casual", "casual"),
            popular(item(2, "shoes", "black", "formal", "formal")),
            item(3, "shoes", "brown", "formal", "business"),
            popular(item(4, "shoes", "blue", "sporty", "sport")),
            item(5, "shoes", "red", "party", "party"),
            popular(item(6, "tops", "white", "casual", "casual")),
        ];

        let results = complementary_items(&[], &catalog, "shoes", 10);
        assert_eq!(ids(&results), vec![2, 4]);
        for result in &results {
            assert_eq!(result.score, SUGGESTED_SCORE);
            assert_eq!(result.quality, MatchQuality::Suggested);
        }

        let limited = complementary_items(&[], &catalog, "shoes", 1);
        assert_eq!(ids(&limited), vec![2]);
    }

    #[test]
    fn test_complementary_items_average_across_selection() {
        let tee = item(1, "tops", "black", "casual", "casual");
        let blazer = item(2, "outerwear", "navy", "formal", "formal");
        let sneakers = item(3, "shoes", "white", "sporty", "casual");
        let catalog = vec![tee.clone(), blazer.clone(), sneakers.clone()];

        assert_eq!(match_score(&tee, &sneakers), 90);
        assert_eq!(match_score(&blazer, &sneakers), 40);

        let results = complementary_items(&[&tee, &blazer], &catalog, "shoes", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 65.0);
        assert_eq!(results[0].quality, MatchQuality::Great);
    }

    #[test]
    fn test_complementary_items_exclude_selected_and_other_categories() {
        let tee = item(1, "tops", "black", "casual", "casual");
        let polo = item(2, "tops", "red", "smart_casual", "casual");
        let jeans = item(3, "pants", "denim", "casual", "casual");
        let catalog = vec![tee.clone(), polo, jeans];

        let results = complementary_items(&[&tee], &catalog, "tops", 10);
        assert_eq!(ids(&results), vec![2]);
        assert_ne!(results[0].quality, MatchQuality::Suggested);
    }

    #[test]
    fn test_complementary_items_rank_and_truncate() {
        let tee = item(1, "tops", "black", "casual", "casual");
        let catalog = vec![
            tee.clone(),
            item(2, "pants", "green", "formal", "formal"),
            item(3, "pants", "white", "casual", "casual"),
            item(4, "pants", "gray", "casual", "casual"),
            item(5, "pants", "black", "casual", "formal"),
        ];

        let results = complementary_items(&[&tee], &catalog, "pants", 2);
        assert_eq!(ids(&results), vec![3, 4]);
        assert_eq!(results[0].score, 100.0);
    }

    #[test]
    fn test_match_result_converts_to_recommendation() {
        let tee = item(1, "tops", "black", "casual", "casual");
        let jeans = item(2, "pants", "denim", "casual", "casual");
        let candidates = vec![jeans.clone()];

        let results = recommend_matches(&tee, &candidates, 1);
        let recommendation = Recommendation::from(results[0]);
        assert_eq!(recommendation.item, jeans);
        assert_eq!(recommendation.score, 60.0);
        assert_eq!(recommendation.quality, MatchQuality::Great);
    }
}
