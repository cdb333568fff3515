//! Token budget estimation.
//!
//! The generation service tokenizes with its own vocabulary; these are
//! character and word heuristics, not exact counts.

use crate::parser::{Bucket, ParsedPrompt};
use serde::{Deserialize, Serialize};

pub const OPTIMAL_MAX: usize = 150;
pub const GOOD_MAX: usize = 225;
pub const WARNING_MAX: usize = 350;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Optimal,
    Good,
    Warning,
    Danger,
}

impl TokenStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenStatus::Optimal => "optimal",
            TokenStatus::Good => "good",
            TokenStatus::Warning => "warning",
            TokenStatus::Danger => "danger",
        }
    }
}

/// Per-bucket estimates. `style` also covers custom tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBreakdown {
    pub quality: usize,
    pub subject: usize,
    pub features: usize,
    pub details: usize,
    pub pose: usize,
    pub scene: usize,
    pub composition: usize,
    pub style: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBudget {
    pub count: usize,
    pub status: TokenStatus,
    pub breakdown: TokenBreakdown,
}

/// Roughly four characters per token, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Word-based estimate: 1.3 tokens per whitespace- or comma-separated word.
pub fn estimate_tokens_by_words(text: &str) -> usize {
    let words = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .count();
    (words as f64 * 1.3).ceil() as usize
}

pub fn token_status(count: usize) -> TokenStatus {
    if count <= OPTIMAL_MAX {
        TokenStatus::Optimal
    } else if count <= GOOD_MAX {
        TokenStatus::Good
    } else if count <= WARNING_MAX {
        TokenStatus::Warning
    } else {
        TokenStatus::Danger
    }
}

/// Estimates each bucket independently.
///
/// Separators between buckets are not counted, and each bucket rounds up on
/// its own, so the parts do not sum to the whole-prompt estimate.
pub fn token_breakdown(parsed: &ParsedPrompt) -> TokenBreakdown {
    let estimate = |bucket: Bucket| estimate_tokens(&parsed.bucket(bucket).join(", "));
    let style_and_custom: Vec<&str> = parsed
        .style
        .iter()
        .chain(parsed.custom.iter())
        .map(String::as_str)
        .collect();

    TokenBreakdown {
        quality: estimate(Bucket::Quality),
        subject: estimate(Bucket::Subject),
        features: estimate(Bucket::Features),
        details: estimate(Bucket::Details),
        pose: estimate(Bucket::Pose),
        scene: estimate(Bucket::Scene),
        composition: estimate(Bucket::Composition),
        style: estimate_tokens(&style_and_custom.join(", ")),
    }
}

pub fn token_budget(text: &str, parsed: &ParsedPrompt) -> TokenBudget {
    let count = estimate_tokens(text);
    TokenBudget {
        count,
        status: token_status(count),
        breakdown: token_breakdown(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        // counts characters, not bytes
        assert_eq!(estimate_tokens("ééé"), 1);
    }

    #[test]
    fn test_estimate_tokens_is_monotonic() {
        let mut text = String::new();
        let mut previous = 0;
        for _ in 0..64 {
            text.push('x');
            let current = estimate_tokens(&text);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_estimate_tokens_by_words() {
        assert_eq!(estimate_tokens_by_words(""), 0);
        assert_eq!(estimate_tokens_by_words("1girl, long hair"), 4);
        assert_eq!(estimate_tokens_by_words("a b c d e"), 7);
    }

    #[test]
    fn test_token_status_thresholds() {
        assert_eq!(token_status(100), TokenStatus::Optimal);
        assert_eq!(token_status(150), TokenStatus::Optimal);
        assert_eq!(token_status(151), TokenStatus::Good);
        assert_eq!(token_status(225), TokenStatus::Good);
        assert_eq!(token_status(300), TokenStatus::Warning);
        assert_eq!(token_status(351), TokenStatus::Danger);
    }

    #[test]
    fn test_breakdown_folds_custom_into_style() {
        let parsed = parse("masterpiece, watercolor, glowing sword");
        let breakdown = token_breakdown(&parsed);
        assert_eq!(breakdown.quality, 3);
        // "watercolor, glowing sword" is 25 characters
        assert_eq!(breakdown.style, 7);
        assert_eq!(breakdown.subject, 0);
    }
}
