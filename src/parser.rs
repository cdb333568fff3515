use crate::keywords::{
    matches_any, matches_any_of, BODY_FEATURES, BODY_TYPE, CLOTHING, COMPOSITION, EXPRESSION,
    EYE_COLOR, HAIR_COLOR, HAIR_LENGTH, HAIR_STYLE, LIGHTING, POSE, QUALITY, SCENE, SPECIES,
    STYLE, SUBJECT,
};
use crate::tokens::estimate_tokens;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default token target used by [`truncate`].
pub const DEFAULT_TOKEN_TARGET: usize = 225;

/// The nine classification buckets, in output priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Quality,
    Subject,
    Features,
    Details,
    Pose,
    Scene,
    Composition,
    Style,
    Custom,
}

impl Bucket {
    pub const ALL: [Bucket; 9] = [
        Bucket::Quality,
        Bucket::Subject,
        Bucket::Features,
        Bucket::Details,
        Bucket::Pose,
        Bucket::Scene,
        Bucket::Composition,
        Bucket::Style,
        Bucket::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Quality => "quality",
            Bucket::Subject => "subject",
            Bucket::Features => "features",
            Bucket::Details => "details",
            Bucket::Pose => "pose",
            Bucket::Scene => "scene",
            Bucket::Composition => "composition",
            Bucket::Style => "style",
            Bucket::Custom => "custom",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prompt split into classification buckets.
///
/// Tags are lower-cased and keep their relative order within a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPrompt {
    pub quality: Vec<String>,
    pub subject: Vec<String>,
    pub features: Vec<String>,
    pub details: Vec<String>,
    pub pose: Vec<String>,
    pub scene: Vec<String>,
    pub composition: Vec<String>,
    pub style: Vec<String>,
    pub custom: Vec<String>,
}

impl ParsedPrompt {
    pub fn bucket(&self, bucket: Bucket) -> &Vec<String> {
        match bucket {
            Bucket::Quality => &self.quality,
            Bucket::Subject => &self.subject,
            Bucket::Features => &self.features,
            Bucket::Details => &self.details,
            Bucket::Pose => &self.pose,
            Bucket::Scene => &self.scene,
            Bucket::Composition => &self.composition,
            Bucket::Style => &self.style,
            Bucket::Custom => &self.custom,
        }
    }

    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Quality => &mut self.quality,
            Bucket::Subject => &mut self.subject,
            Bucket::Features => &mut self.features,
            Bucket::Details => &mut self.details,
            Bucket::Pose => &mut self.pose,
            Bucket::Scene => &mut self.scene,
            Bucket::Composition => &mut self.composition,
            Bucket::Style => &mut self.style,
            Bucket::Custom => &mut self.custom,
        }
    }

    /// Total number of tags across all buckets.
    pub fn len(&self) -> usize {
        Bucket::ALL
            .iter()
            .map(|bucket| self.bucket(*bucket).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tags in bucket priority order.
    pub fn ordered_tags(&self) -> Vec<&str> {
        Bucket::ALL
            .iter()
            .flat_map(|bucket| self.bucket(*bucket).iter().map(String::as_str))
            .collect()
    }

    /// Tags re-joined in bucket priority order.
    pub fn join(&self) -> String {
        self.ordered_tags().join(", ")
    }
}

/// Classifies a single lower-cased tag. First matching bucket wins.
pub fn classify(tag: &str) -> Bucket {
    if matches_any(tag, QUALITY) {
        Bucket::Quality
    } else if matches_any_of(tag, &[SUBJECT, BODY_TYPE, SPECIES]) {
        Bucket::Subject
    } else if matches_any_of(
        tag,
        &[HAIR_COLOR, HAIR_LENGTH, HAIR_STYLE, EYE_COLOR, BODY_FEATURES],
    ) {
        Bucket::Features
    } else if matches_any(tag, CLOTHING) {
        Bucket::Details
    } else if matches_any_of(tag, &[POSE, EXPRESSION]) {
        Bucket::Pose
    } else if matches_any_of(tag, &[SCENE, LIGHTING]) {
        Bucket::Scene
    } else if matches_any(tag, COMPOSITION) {
        Bucket::Composition
    } else if matches_any(tag, STYLE) {
        Bucket::Style
    } else {
        Bucket::Custom
    }
}

/// Splits a comma-separated prompt into trimmed, lower-cased, non-empty tags.
pub fn split_tags(prompt: &str) -> impl Iterator<Item = String> + '_ {
    prompt
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
}

/// Parses a prompt into buckets.
pub fn parse(prompt: &str) -> ParsedPrompt {
    let mut parsed = ParsedPrompt::default();
    for tag in split_tags(prompt) {
        parsed.bucket_mut(classify(&tag)).push(tag);
    }
    parsed
}

/// Drops low-priority tags until the prompt fits `target_tokens`.
///
/// Prompts already within budget come back untouched. Otherwise tags are
/// popped from the end of the custom, style, scene, composition, pose and
/// details buckets, in that order; quality, subject and features are kept.
pub fn truncate(prompt: &str, target_tokens: usize) -> String {
    const REMOVAL_ORDER: [Bucket; 6] = [
        Bucket::Custom,
        Bucket::Style,
        Bucket::Scene,
        Bucket::Composition,
        Bucket::Pose,
        Bucket::Details,
    ];

    let mut current = estimate_tokens(prompt);
    if current <= target_tokens {
        return prompt.to_string();
    }

    let mut parsed = parse(prompt);
    for bucket in REMOVAL_ORDER {
        while current > target_tokens && parsed.bucket_mut(bucket).pop().is_some() {
            current = estimate_tokens(&parsed.join());
        }
    }

    let truncated = parsed.join();
    log::debug!(
        "Truncated prompt from {} to {} tokens (target {})",
        estimate_tokens(prompt),
        estimate_tokens(&truncated),
        target_tokens
    );
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_known_tags() {
        let parsed = parse("1girl, blue eyes, smile, forest, masterpiece");
        assert_eq!(parsed.quality, vec!["masterpiece"]);
        assert_eq!(parsed.subject, vec!["1girl"]);
        assert_eq!(parsed.features, vec!["blue eyes"]);
        assert_eq!(parsed.pose, vec!["smile"]);
        assert_eq!(parsed.scene, vec!["forest"]);
        assert!(parsed.details.is_empty());
        assert!(parsed.custom.is_empty());
    }

    #[test]
    fn test_parse_lowercases_and_drops_empty_tags() {
        let parsed = parse(" Long Hair ,, ,Glowing Sword");
        assert_eq!(parsed.features, vec!["long hair"]);
        assert_eq!(parsed.custom, vec!["glowing sword"]);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_parse_is_a_partition() {
        let prompt = "masterpiece, 1girl, silver hair, school uniform, sitting, \
                      night, cowboy shot, watercolor, glowing sword, official art";
        let parsed = parse(prompt);
        let input: Vec<String> = split_tags(prompt).collect();
        assert_eq!(parsed.len(), input.len());

        let mut joined: Vec<&str> = parsed.ordered_tags();
        let mut expected: Vec<&str> = input.iter().map(String::as_str).collect();
        joined.sort_unstable();
        expected.sort_unstable();
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_first_match_wins() {
        // "official art" is both a quality and a style keyword
        assert_eq!(classify("official art"), Bucket::Quality);
        // "muscular" is a body type before it is a body feature
        assert_eq!(classify("muscular"), Bucket::Subject);
        // "sunset" hits scene before anything later
        assert_eq!(classify("sunset"), Bucket::Scene);
        assert_eq!(classify("sword"), Bucket::Custom);
    }

    #[test]
    fn test_truncate_keeps_prompt_within_budget() {
        let prompt = "masterpiece, 1girl, blue eyes, smile";
        assert_eq!(truncate(prompt, DEFAULT_TOKEN_TARGET), prompt);
    }

    #[test]
    fn test_truncate_removes_custom_before_style() {
        let prompt = "masterpiece, 1girl, watercolor, alpha, beta, gamma";
        assert_eq!(estimate_tokens(prompt), 13);
        let truncated = truncate(prompt, 10);
        assert_eq!(truncated, "masterpiece, 1girl, watercolor, alpha");

        let aggressive = truncate(prompt, 1);
        assert_eq!(aggressive, "masterpiece, 1girl");
    }
}
