use std::collections::HashSet;

/// Always-present undesired tags.
pub const BASE_NEGATIVES: &[&str] = &[
    "lowres",
    "bad anatomy",
    "bad hands",
    "text",
    "error",
    "missing fingers",
    "cropped",
    "worst quality",
    "jpeg artifacts",
    "signature",
    "watermark",
];

/// Prompt substring → tags that contradict it.
pub const CONDITIONAL_NEGATIVES: &[(&str, &[&str])] = &[
    ("large breasts", &["flat chest", "small breasts"]),
    ("small breasts", &["large breasts", "huge breasts"]),
    ("flat chest", &["breasts", "large breasts"]),
    ("long hair", &["short hair", "bob cut"]),
    ("short hair", &["long hair", "very long hair"]),
    ("standing", &["lying", "sitting"]),
    ("sitting", &["standing", "lying"]),
    ("lying", &["standing", "sitting"]),
    ("muscular", &["thin", "skinny"]),
    ("slender", &["fat", "overweight"]),
    ("young", &["old", "elderly"]),
    ("smile", &["crying", "sad"]),
    ("serious", &["smile", "happy"]),
];

pub const CHARACTER_NEGATIVES: &[&str] = &["deformed", "disfigured", "mutation", "mutated", "ugly"];

pub const ANATOMY_NEGATIVES: &[&str] = &[
    "extra limbs",
    "fused fingers",
    "long neck",
    "extra arms",
    "extra legs",
    "malformed limbs",
];

pub const QUALITY_NEGATIVES: &[&str] = &[
    "blurry",
    "sketch",
    "unfinished",
    "low quality",
    "normal quality",
];

pub const NSFW_NEGATIVES: &[&str] = &["censored", "mosaic censoring", "bar censor"];

/// Builds the undesired-content tag list for a prompt.
///
/// The result has no duplicates; each tag keeps the position of its first
/// occurrence.
pub fn generate_negatives(prompt: &str, is_nsfw: bool) -> Vec<String> {
    let lowered = prompt.to_lowercase();

    let conditional = CONDITIONAL_NEGATIVES
        .iter()
        .filter(|(trigger, _)| lowered.contains(trigger))
        .flat_map(|(_, additions)| additions.iter());
    let nsfw: &[&str] = if is_nsfw { NSFW_NEGATIVES } else { &[] };

    let mut seen = HashSet::new();
    BASE_NEGATIVES
        .iter()
        .chain(conditional)
        .chain(CHARACTER_NEGATIVES)
        .chain(ANATOMY_NEGATIVES)
        .chain(QUALITY_NEGATIVES)
        .chain(nsfw)
        .filter(|tag| seen.insert(**tag))
        .map(|tag| tag.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_lists_always_present() {
        let negatives = generate_negatives("", false);
        assert_eq!(
            negatives.len(),
            BASE_NEGATIVES.len()
                + CHARACTER_NEGATIVES.len()
                + ANATOMY_NEGATIVES.len()
                + QUALITY_NEGATIVES.len()
        );
        assert_eq!(negatives[0], "lowres");
        assert!(!negatives.iter().any(|tag| tag == "censored"));
    }

    #[test]
    fn test_conditional_triggers_are_substring_matches() {
        let negatives = generate_negatives("1girl, Very Long Hair, smile", false);
        assert!(negatives.contains(&"short hair".to_string()));
        assert!(negatives.contains(&"bob cut".to_string()));
        assert!(negatives.contains(&"crying".to_string()));
        assert!(!negatives.contains(&"happy".to_string()));
    }

    #[test]
    fn test_nsfw_adds_censorship_tags() {
        let negatives = generate_negatives("1girl", true);
        assert!(negatives.ends_with(&[
            "censored".to_string(),
            "mosaic censoring".to_string(),
            "bar censor".to_string(),
        ]));
    }

    #[test]
    fn test_negatives_are_deduplicated() {
        // "standing" and "sitting" both add each other plus "lying"
        let negatives = generate_negatives("standing, sitting, lying", false);
        let unique: HashSet<&String> = negatives.iter().collect();
        assert_eq!(unique.len(), negatives.len());
        assert_eq!(
            negatives.iter().filter(|tag| tag.as_str() == "lying").count(),
            1
        );
    }
}
