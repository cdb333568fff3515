use crate::keywords::{matches_any, BODY_FEATURES, CLOTHING, HAIR_COLOR, HAIR_LENGTH, POSE};
use crate::normalizer::variations_of;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepetitionLevel {
    None,
    #[default]
    Light,
    Medium,
    Strong,
}

impl RepetitionLevel {
    /// Maximum variations emitted per tag.
    pub fn max_variations(self) -> usize {
        match self {
            RepetitionLevel::None => 0,
            RepetitionLevel::Light => 1,
            RepetitionLevel::Medium => 2,
            RepetitionLevel::Strong => 3,
        }
    }
}

/// Which tag families are eligible for repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionFlags {
    pub hair: bool,
    pub body: bool,
    pub clothing: bool,
    pub pose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepetitionSettings {
    pub level: RepetitionLevel,
    pub repeat_hair: bool,
    pub repeat_body: bool,
    pub repeat_clothing: bool,
    pub repeat_pose: bool,
}

impl Default for RepetitionSettings {
    fn default() -> Self {
        Self {
            level: RepetitionLevel::Light,
            repeat_hair: true,
            repeat_body: true,
            repeat_clothing: false,
            repeat_pose: false,
        }
    }
}

impl RepetitionSettings {
    pub fn flags(&self) -> RepetitionFlags {
        RepetitionFlags {
            hair: self.repeat_hair,
            body: self.repeat_body,
            clothing: self.repeat_clothing,
            pose: self.repeat_pose,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repetition {
    pub original: String,
    pub variations: Vec<&'static str>,
}

fn is_eligible(tag: &str, flags: RepetitionFlags) -> bool {
    (flags.hair && (matches_any(tag, HAIR_COLOR) || matches_any(tag, HAIR_LENGTH)))
        || (flags.body && matches_any(tag, BODY_FEATURES))
        || (flags.clothing && matches_any(tag, CLOTHING))
        || (flags.pose && matches_any(tag, POSE))
}

/// Picks semantic variations to reinforce eligible tags.
///
/// Tags without a variation group are skipped. Each emitted entry carries at
/// most `level.max_variations()` variations, in table order.
pub fn generate_repetitions(
    tags: &[String],
    level: RepetitionLevel,
    flags: RepetitionFlags,
) -> Vec<Repetition> {
    let max = level.max_variations();
    if max == 0 {
        return Vec::new();
    }

    tags.iter()
        .filter_map(|tag| {
            let lowered = tag.to_lowercase();
            let mut variations = variations_of(&lowered);
            if variations.is_empty() || !is_eligible(&lowered, flags) {
                return None;
            }
            variations.truncate(max);
            Some(Repetition {
                original: tag.clone(),
                variations,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flags() -> RepetitionFlags {
        RepetitionFlags {
            hair: true,
            body: true,
            clothing: true,
            pose: true,
        }
    }

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_none_level_yields_nothing() {
        let result = generate_repetitions(&tags(&["long hair"]), RepetitionLevel::None, all_flags());
        assert!(result.is_empty());
    }

    #[test]
    fn test_level_caps_variation_count() {
        let input = tags(&["silver hair"]);
        let light = generate_repetitions(&input, RepetitionLevel::Light, all_flags());
        assert_eq!(light[0].variations, vec!["grey hair"]);

        let strong = generate_repetitions(&input, RepetitionLevel::Strong, all_flags());
        assert_eq!(strong[0].variations, vec!["grey hair", "white hair"]);
    }

    #[test]
    fn test_flags_gate_categories() {
        let input = tags(&["long hair", "dress", "standing", "sword"]);
        let flags = RepetitionFlags {
            hair: true,
            body: false,
            clothing: false,
            pose: false,
        };
        let result = generate_repetitions(&input, RepetitionLevel::Medium, flags);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].original, "long hair");

        let result = generate_repetitions(&input, RepetitionLevel::Medium, all_flags());
        let originals: Vec<&str> = result.iter().map(|rep| rep.original.as_str()).collect();
        assert_eq!(originals, vec!["long hair", "dress", "standing"]);
    }

    #[test]
    fn test_variations_never_repeat_the_original() {
        let input = tags(&["very long hair"]);
        let result = generate_repetitions(&input, RepetitionLevel::Strong, all_flags());
        assert_eq!(result[0].variations, vec!["long hair", "flowing hair"]);
    }
}
