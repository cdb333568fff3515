use crate::keywords::{
    matches_any, BODY_FEATURES, BODY_TYPE, EYE_COLOR, HAIR_COLOR, LIGHTING, SUBJECT,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightLevel {
    Critical,
    Strong,
    Normal,
    Weak,
}

impl WeightLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            WeightLevel::Critical => "critical",
            WeightLevel::Strong => "strong",
            WeightLevel::Normal => "normal",
            WeightLevel::Weak => "weak",
        }
    }
}

impl fmt::Display for WeightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTag {
    pub tag: String,
    pub level: WeightLevel,
    /// Only set for levels that render emphasis.
    pub multiplier: Option<f64>,
}

/// Emphasis level for a tag, by category keyword.
///
/// Subject and body type are critical; hair colour, eye colour and body
/// features are strong; lighting is weak. Everything else is normal.
pub fn weight_level_of(tag: &str) -> WeightLevel {
    let lowered = tag.to_lowercase();
    if matches_any(&lowered, SUBJECT) || matches_any(&lowered, BODY_TYPE) {
        WeightLevel::Critical
    } else if matches_any(&lowered, HAIR_COLOR)
        || matches_any(&lowered, EYE_COLOR)
        || matches_any(&lowered, BODY_FEATURES)
    {
        WeightLevel::Strong
    } else if matches_any(&lowered, LIGHTING) {
        WeightLevel::Weak
    } else {
        WeightLevel::Normal
    }
}

/// True when the tag already carries brace, bracket or `::` emphasis.
pub fn is_emphasized(tag: &str) -> bool {
    tag.starts_with('{') || tag.starts_with('[') || tag.contains("::")
}

/// Renders a tag in NovelAI emphasis syntax.
///
/// Already-emphasized tags are returned unchanged.
pub fn apply_emphasis(tag: &str, level: WeightLevel, multiplier: f64) -> String {
    if is_emphasized(tag) {
        return tag.to_string();
    }

    match level {
        WeightLevel::Critical if multiplier >= 1.2 => format!("{{{{{tag}}}}}"),
        WeightLevel::Critical => format!("{{{tag}}}"),
        WeightLevel::Strong if multiplier != 1.0 => {
            format!("{:.1}::{}::", 1.2 * multiplier, tag)
        }
        WeightLevel::Strong => format!("{{{tag}}}"),
        WeightLevel::Weak => format!("[{tag}]"),
        WeightLevel::Normal => tag.to_string(),
    }
}

pub fn apply_auto_weighting(tags: &[String], multiplier: f64) -> Vec<WeightedTag> {
    tags.iter()
        .map(|tag| {
            let level = weight_level_of(tag);
            WeightedTag {
                tag: tag.clone(),
                level,
                multiplier: (level != WeightLevel::Normal).then_some(multiplier),
            }
        })
        .collect()
}

impl WeightedTag {
    /// The tag in emphasis syntax; normal tags render as-is.
    pub fn render(&self) -> String {
        match self.multiplier {
            Some(multiplier) => apply_emphasis(&self.tag, self.level, multiplier),
            None => self.tag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_levels_by_category() {
        assert_eq!(weight_level_of("1girl"), WeightLevel::Critical);
        assert_eq!(weight_level_of("Petite"), WeightLevel::Critical);
        assert_eq!(weight_level_of("silver hair"), WeightLevel::Strong);
        assert_eq!(weight_level_of("large breasts"), WeightLevel::Strong);
        assert_eq!(weight_level_of("rim lighting"), WeightLevel::Weak);
        assert_eq!(weight_level_of("forest"), WeightLevel::Normal);
        // species alone is not critical
        assert_eq!(weight_level_of("elf"), WeightLevel::Normal);
    }

    #[test]
    fn test_critical_emphasis_depends_on_multiplier() {
        assert_eq!(apply_emphasis("1girl", WeightLevel::Critical, 1.0), "{1girl}");
        assert_eq!(apply_emphasis("1girl", WeightLevel::Critical, 1.3), "{{1girl}}");
    }

    #[test]
    fn test_strong_emphasis_uses_numeric_weight() {
        assert_eq!(
            apply_emphasis("blue eyes", WeightLevel::Strong, 1.0),
            "{blue eyes}"
        );
        assert_eq!(
            apply_emphasis("blue eyes", WeightLevel::Strong, 1.25),
            "1.5::blue eyes::"
        );
        assert_eq!(
            apply_emphasis("blue eyes", WeightLevel::Strong, 0.8),
            "1.0::blue eyes::"
        );
    }

    #[test]
    fn test_weak_and_normal_emphasis() {
        assert_eq!(
            apply_emphasis("soft lighting", WeightLevel::Weak, 1.0),
            "[soft lighting]"
        );
        assert_eq!(apply_emphasis("forest", WeightLevel::Normal, 1.5), "forest");
    }

    #[test]
    fn test_apply_emphasis_is_idempotent() {
        for level in [
            WeightLevel::Critical,
            WeightLevel::Strong,
            WeightLevel::Weak,
        ] {
            let once = apply_emphasis("red eyes", level, 1.3);
            assert_eq!(apply_emphasis(&once, level, 1.3), once);
        }
        assert_eq!(
            apply_emphasis("1.2::tag::", WeightLevel::Critical, 1.0),
            "1.2::tag::"
        );
    }

    #[test]
    fn test_auto_weighting_attaches_multiplier_to_emphasized_levels() {
        let tags = vec!["1girl".to_string(), "forest".to_string()];
        let weighted = apply_auto_weighting(&tags, 1.2);
        assert_eq!(weighted[0].multiplier, Some(1.2));
        assert_eq!(weighted[0].render(), "{{1girl}}");
        assert_eq!(weighted[1].level, WeightLevel::Normal);
        assert_eq!(weighted[1].multiplier, None);
        assert_eq!(weighted[1].render(), "forest");
    }
}
