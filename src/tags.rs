use crate::catalog::{self, Subcategory, TagRecord, CATEGORIES};
use serde::Serialize;

/// Search filters for [`search`].
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub include_nsfw: bool,
    pub min_popularity: u8,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            include_nsfw: false,
            min_popularity: 1,
            limit: 50,
        }
    }
}

/// Where an exact lookup found its tag.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TagLocation {
    pub tag: &'static TagRecord,
    pub category: &'static str,
    pub subcategory: &'static str,
}

/// One entry of the flat selection-category mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatTag {
    pub name: &'static str,
    pub nsfw: bool,
}

/// Selection category → catalog subcategories it draws from.
pub const FLAT_SOURCES: &[(&str, &[(&str, &str)])] = &[
    ("gender", &[("character", "gender")]),
    ("bodyType", &[("character", "bodyType")]),
    ("species", &[("character", "species")]),
    ("hairColor", &[("hair", "color")]),
    ("hairLength", &[("hair", "length")]),
    ("hairStyle", &[("hair", "style")]),
    ("eyeColor", &[("eyes", "color")]),
    ("eyeStyle", &[("eyes", "style")]),
    ("skin", &[("skin", "tone"), ("skin", "details")]),
    (
        "clothingStyle",
        &[
            ("clothing", "tops"),
            ("clothing", "bottoms"),
            ("clothing", "dresses"),
            ("clothing", "uniforms"),
            ("clothing", "fantasy"),
            ("clothing", "swimwear"),
            ("clothing", "bodysuits"),
            ("clothing", "casual"),
        ],
    ),
    ("outfitDetail", &[("clothing", "details")]),
    (
        "accessory",
        &[
            ("accessories", "eyewear"),
            ("accessories", "headwear"),
            ("accessories", "jewelry"),
            ("accessories", "handwear"),
            ("accessories", "legwear"),
            ("accessories", "footwear"),
            ("accessories", "fantasy"),
        ],
    ),
    (
        "weapon",
        &[
            ("weapons", "melee"),
            ("weapons", "ranged"),
            ("weapons", "magical"),
            ("weapons", "defensive"),
            ("weapons", "actions"),
        ],
    ),
    ("standingPose", &[("pose", "standing")]),
    ("sittingPose", &[("pose", "sitting")]),
    ("lyingPose", &[("pose", "lying")]),
    (
        "expression",
        &[
            ("expression", "positive"),
            ("expression", "neutral"),
            ("expression", "negative"),
            ("expression", "special"),
            ("expression", "mouth"),
        ],
    ),
    ("looking", &[("expression", "looking")]),
    (
        "composition",
        &[
            ("composition", "framing"),
            ("composition", "angle"),
            ("composition", "focus"),
        ],
    ),
    ("indoorLocation", &[("background", "indoor")]),
    ("outdoorLocation", &[("background", "outdoor")]),
    ("time", &[("background", "time")]),
    ("weather", &[("background", "weather")]),
    ("lighting", &[("style", "lighting")]),
    ("effect", &[("style", "effects")]),
    ("artStyle", &[("style", "artStyle")]),
    ("year", &[("style", "year")]),
    ("quality", &[("style", "quality")]),
    ("nsfwBody", &[("nsfw", "body")]),
    ("nsfwClothing", &[("nsfw", "state"), ("clothing", "underwear")]),
    (
        "nsfwPose",
        &[("nsfw", "poses"), ("expression", "nsfw_expressions")],
    ),
    ("rating", &[("nsfw", "rating")]),
    ("hsrStyle", &[("style", "game")]),
];

/// All tags of a category, subcategories in declaration order.
pub fn category_tags(category_id: &str) -> Vec<&'static TagRecord> {
    catalog::category(category_id)
        .map(|category| {
            category
                .subcategories
                .iter()
                .flat_map(|sub| sub.tags.iter())
                .collect()
        })
        .unwrap_or_default()
}

/// Tags of a single subcategory; empty when either id is unknown.
pub fn subcategory_tags(category_id: &str, subcategory_id: &str) -> &'static [TagRecord] {
    catalog::subcategory(category_id, subcategory_id)
        .map(|sub| sub.tags)
        .unwrap_or(&[])
}

fn visible_tags(include_nsfw: bool) -> impl Iterator<Item = &'static TagRecord> {
    CATEGORIES
        .iter()
        .filter(move |category| include_nsfw || !category.nsfw_category)
        .flat_map(|category| category.subcategories.iter())
        .filter(move |sub: &&'static Subcategory| include_nsfw || !sub.nsfw_category)
        .flat_map(|sub| sub.tags.iter())
        .filter(move |tag| include_nsfw || !tag.nsfw)
}

/// Case-insensitive substring search over tag text and aliases.
///
/// Results are sorted by popularity, most popular first; ties keep catalog
/// order.
pub fn search(query: &str, options: SearchOptions) -> Vec<&'static TagRecord> {
    let query = query.to_lowercase();
    let mut results: Vec<&'static TagRecord> = visible_tags(options.include_nsfw)
        .filter(|tag| tag.popularity >= options.min_popularity)
        .filter(|tag| {
            tag.text.to_lowercase().contains(&query)
                || tag
                    .aliases
                    .iter()
                    .any(|alias| alias.to_lowercase().contains(&query))
        })
        .collect();

    results.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    results.truncate(options.limit);
    results
}

/// Tags with popularity 4 or higher, most popular first.
pub fn popular(include_nsfw: bool) -> Vec<&'static TagRecord> {
    let mut results: Vec<&'static TagRecord> = visible_tags(include_nsfw)
        .filter(|tag| tag.popularity >= 4)
        .collect();
    results.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    results
}

/// Exact, case-insensitive match on tag text or any alias. NSFW tags are
/// included.
pub fn lookup(name: &str) -> Option<TagLocation> {
    let name = name.to_lowercase();
    for category in CATEGORIES {
        for sub in category.subcategories {
            for tag in sub.tags {
                let hit = tag.text.to_lowercase() == name
                    || tag.aliases.iter().any(|alias| alias.to_lowercase() == name);
                if hit {
                    return Some(TagLocation {
                        tag,
                        category: category.id,
                        subcategory: sub.id,
                    });
                }
            }
        }
    }
    None
}

/// Suggests popular hair and eye colours when the selection has none yet.
pub fn suggested(selected: &[String], include_nsfw: bool) -> Vec<&'static TagRecord> {
    const HAIR_HUES: &[&str] = &[
        "blonde", "black", "brown", "red", "white", "silver", "blue", "pink", "purple", "green",
    ];
    const EYE_HUES: &[&str] = &["blue", "red", "green", "brown", "purple", "yellow", "amber"];

    let has_hair_color = selected
        .iter()
        .any(|tag| tag.contains("hair") && HAIR_HUES.iter().any(|hue| tag.contains(hue)));
    let has_eye_color = selected
        .iter()
        .any(|tag| tag.contains("eyes") && EYE_HUES.iter().any(|hue| tag.contains(hue)));

    let mut suggestions: Vec<&'static TagRecord> = Vec::new();
    if !has_hair_color {
        suggestions.extend(
            subcategory_tags("hair", "color")
                .iter()
                .filter(|tag| tag.popularity >= 4)
                .take(5),
        );
    }
    if !has_eye_color {
        suggestions.extend(
            subcategory_tags("eyes", "color")
                .iter()
                .filter(|tag| tag.popularity >= 4)
                .take(5),
        );
    }

    suggestions.retain(|tag| include_nsfw || !tag.nsfw);
    suggestions
}

/// The catalog flattened into per-selection-category tag lists.
pub fn all_flat(include_nsfw: bool) -> Vec<(&'static str, Vec<FlatTag>)> {
    FLAT_SOURCES
        .iter()
        .map(|(key, sources)| {
            let tags = sources
                .iter()
                .flat_map(|(category, sub)| subcategory_tags(category, sub).iter())
                .filter(|tag| include_nsfw || !tag.nsfw)
                .map(|tag| FlatTag {
                    name: tag.text,
                    nsfw: tag.nsfw,
                })
                .collect();
            (*key, tags)
        })
        .collect()
}

/// The flat tag list for one selection category.
pub fn flat_category(key: &str, include_nsfw: bool) -> Vec<FlatTag> {
    all_flat(include_nsfw)
        .into_iter()
        .find(|(name, _)| *name == key)
        .map(|(_, tags)| tags)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_aliases_and_sorts_by_popularity() {
        let results = search("nekomimi", SearchOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "cat ears");

        let hair = search("hair", SearchOptions::default());
        assert!(!hair.is_empty());
        assert!(hair
            .windows(2)
            .all(|pair| pair[0].popularity >= pair[1].popularity));
    }

    #[test]
    fn test_search_respects_limit_and_nsfw_filter() {
        let options = SearchOptions {
            limit: 3,
            ..SearchOptions::default()
        };
        assert_eq!(search("hair", options).len(), 3);

        assert!(search("breasts", SearchOptions::default()).is_empty());
        let nsfw = SearchOptions {
            include_nsfw: true,
            ..SearchOptions::default()
        };
        assert!(search("breasts", nsfw)
            .iter()
            .any(|tag| tag.text == "large breasts"));
    }

    #[test]
    fn test_popular_tags_are_popularity_four_or_more() {
        let popular = popular(false);
        assert!(popular.iter().all(|tag| tag.popularity >= 4 && !tag.nsfw));
        assert_eq!(popular[0].popularity, 5);
    }

    #[test]
    fn test_lookup_by_alias_is_case_insensitive() {
        let found = lookup("Qipao").expect("alias lookup");
        assert_eq!(found.tag.text, "chinese dress");
        assert_eq!(found.category, "clothing");
        assert_eq!(found.subcategory, "dresses");
        assert!(lookup("qipa").is_none());
    }

    #[test]
    fn test_suggested_skips_colors_already_selected() {
        let none_selected = suggested(&[], false);
        assert_eq!(none_selected.len(), 10);

        let selected = vec!["blonde hair".to_string(), "blue eyes".to_string()];
        assert!(suggested(&selected, false).is_empty());
    }

    #[test]
    fn test_flat_mapping_merges_sources() {
        let clothing = flat_category("nsfwClothing", true);
        assert!(clothing.iter().any(|tag| tag.name == "nude"));
        assert!(clothing.iter().any(|tag| tag.name == "lingerie"));
        assert!(flat_category("nsfwClothing", false).is_empty());

        let rating = flat_category("rating", false);
        assert_eq!(
            rating.iter().map(|tag| tag.name).collect::<Vec<_>>(),
            vec!["rating:general", "rating:sensitive"]
        );
    }
}
