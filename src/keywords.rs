//! Category keyword sets shared by the parser, the weighting engine and the
//! repetition filters.
//!
//! Matching is plain substring containment against a lower-cased tag, so a
//! tag can hit several sets. Callers decide precedence by the order in which
//! they test the sets.

pub const SUBJECT: &[&str] = &[
    "1girl",
    "1boy",
    "2girls",
    "2boys",
    "multiple girls",
    "multiple boys",
    "solo",
    "couple",
    "group",
];

pub const BODY_TYPE: &[&str] = &[
    "petite", "mature", "muscular", "slender", "curvy", "tall", "short", "loli", "shota",
];

pub const SPECIES: &[&str] = &[
    "human",
    "elf",
    "demon",
    "angel",
    "fox girl",
    "cat girl",
    "dragon",
    "kemonomimi",
];

pub const HAIR_COLOR: &[&str] = &[
    "black hair",
    "blonde hair",
    "brown hair",
    "red hair",
    "blue hair",
    "pink hair",
    "white hair",
    "silver hair",
    "grey hair",
    "green hair",
    "purple hair",
    "orange hair",
    "multicolored hair",
];

pub const HAIR_LENGTH: &[&str] = &[
    "long hair",
    "short hair",
    "medium hair",
    "very long hair",
    "absurdly long hair",
];

pub const HAIR_STYLE: &[&str] = &[
    "ponytail",
    "twintails",
    "braid",
    "bun",
    "messy hair",
    "straight hair",
    "wavy hair",
    "curly hair",
    "bob cut",
    "pixie cut",
    "side ponytail",
    "drill hair",
];

pub const EYE_COLOR: &[&str] = &[
    "red eyes",
    "blue eyes",
    "green eyes",
    "purple eyes",
    "yellow eyes",
    "pink eyes",
    "brown eyes",
    "orange eyes",
    "heterochromia",
    "glowing eyes",
];

pub const BODY_FEATURES: &[&str] = &[
    "large breasts",
    "medium breasts",
    "small breasts",
    "flat chest",
    "thick thighs",
    "wide hips",
    "abs",
    "muscular",
];

pub const POSE: &[&str] = &[
    "standing",
    "sitting",
    "lying",
    "kneeling",
    "squatting",
    "walking",
    "running",
    "jumping",
    "fighting",
    "leaning",
    "crossed arms",
    "arms up",
    "hand on hip",
];

pub const EXPRESSION: &[&str] = &[
    "smile",
    "smiling",
    "serious",
    "angry",
    "sad",
    "crying",
    "blushing",
    "expressionless",
    "grin",
    "open mouth",
    "closed eyes",
];

pub const CLOTHING: &[&str] = &[
    "dress",
    "armor",
    "uniform",
    "casual",
    "swimsuit",
    "bikini",
    "lingerie",
    "nude",
    "school uniform",
    "maid",
    "kimono",
    "suit",
];

pub const SCENE: &[&str] = &[
    "indoors", "outdoors", "bedroom", "forest", "city", "beach", "night", "day", "sunset", "rain",
];

pub const COMPOSITION: &[&str] = &[
    "portrait",
    "full body",
    "upper body",
    "cowboy shot",
    "close-up",
    "from above",
    "from below",
    "from side",
    "from behind",
];

pub const LIGHTING: &[&str] = &[
    "dramatic lighting",
    "soft lighting",
    "backlighting",
    "rim lighting",
    "natural lighting",
    "studio lighting",
    "neon lighting",
];

pub const STYLE: &[&str] = &[
    "anime style",
    "realistic",
    "semi-realistic",
    "oil painting",
    "watercolor",
    "sketch",
    "official art",
    "honkai: star rail",
    "genshin impact",
];

pub const QUALITY: &[&str] = &[
    "masterpiece",
    "best quality",
    "highres",
    "absurdres",
    "very aesthetic",
    "detailed",
    "official art",
];

/// Returns true when `tag` contains any keyword of `set`.
///
/// `tag` is expected to be lower-cased already.
pub fn matches_any(tag: &str, set: &[&str]) -> bool {
    set.iter().any(|keyword| tag.contains(keyword))
}

/// Returns true when `tag` contains a keyword from any of the given sets.
pub fn matches_any_of(tag: &str, sets: &[&[&str]]) -> bool {
    sets.iter().any(|set| matches_any(tag, set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_uses_substring_containment() {
        assert!(matches_any("very long hair", HAIR_LENGTH));
        assert!(matches_any("birthday", SCENE));
        assert!(!matches_any("ponytail", HAIR_COLOR));
    }

    #[test]
    fn test_matches_any_of_checks_every_set() {
        assert!(matches_any_of("cat girl", &[SUBJECT, BODY_TYPE, SPECIES]));
        assert!(!matches_any_of("sword", &[SUBJECT, BODY_TYPE, SPECIES]));
    }
}
