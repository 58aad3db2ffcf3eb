//! Rule/lexicon sentiment analyzer.
//!
//! Scores text by averaging the polarities of known words, with a simple
//! negation flip. Deliberately plain: no intensity boosting, no punctuation
//! handling. The valence analyzer covers those; keeping the two independent
//! is what makes their weighted combination worthwhile.

use async_trait::async_trait;

use super::traits::SentimentAnalyzer;
use crate::error::Result;

/// Factor applied to a word's polarity when a negation precedes it.
///
/// Negation weakens as well as flips: "not good" reads mildly negative,
/// not as the mirror image of "good".
const NEGATION_FACTOR: f32 = -0.5;

// ── Word polarity table ─────────────────────────────────────────────────

/// (word, polarity in [-1, 1])
const WORD_POLARITIES: &[(&str, f32)] = &[
    // Favorable
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("cheerful", 0.8),
    ("comfortable", 0.55),
    ("cool", 0.35),
    ("delighted", 1.0),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.9),
    ("fine", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("grateful", 0.45),
    ("great", 0.8),
    ("happy", 0.8),
    ("hopeful", 0.5),
    ("incredible", 0.9),
    ("joyful", 0.8),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.7),
    ("positive", 0.35),
    ("proud", 0.8),
    ("relaxed", 0.4),
    ("satisfied", 0.5),
    ("smile", 0.3),
    ("super", 0.35),
    ("sweet", 0.35),
    ("terrific", 1.0),
    ("thankful", 0.4),
    ("wonderful", 1.0),
    // Unfavorable
    ("angry", -0.5),
    ("annoyed", -0.6),
    ("anxious", -0.35),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -0.6),
    ("broken", -0.4),
    ("depressed", -0.75),
    ("disappointed", -0.75),
    ("disgusting", -1.0),
    ("down", -0.3),
    ("dreadful", -1.0),
    ("exhausted", -0.5),
    ("frustrated", -0.6),
    ("gloomy", -0.5),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("hurt", -0.6),
    ("lonely", -0.5),
    ("mad", -0.6),
    ("miserable", -1.0),
    ("nasty", -0.9),
    ("negative", -0.35),
    ("painful", -0.7),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scared", -0.6),
    ("sick", -0.7),
    ("sorry", -0.5),
    ("stressed", -0.4),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("tired", -0.4),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("upset", -0.45),
    ("worried", -0.3),
    ("worst", -1.0),
    ("worse", -0.5),
    ("wrong", -0.5),
];

/// Words that negate the polarity of the word right after them.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "cannot", "can't", "don't", "doesn't", "didn't", "isn't", "wasn't",
    "aren't", "weren't", "won't", "wouldn't", "couldn't", "shouldn't", "ain't",
];

/// Rule-based analyzer: the averaged polarity of every known word in the
/// text, with single-step negation handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    /// Create a lexicon analyzer.
    pub fn new() -> Self {
        Self
    }

    fn score(text: &str) -> f32 {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_ascii_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let mut total = 0.0_f32;
        let mut matched = 0u32;

        for (i, token) in tokens.iter().enumerate() {
            let Some(polarity) = word_polarity(token) else {
                continue;
            };

            let negated = i > 0 && NEGATIONS.contains(&tokens[i - 1].as_str());
            total += if negated {
                polarity * NEGATION_FACTOR
            } else {
                polarity
            };
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }
        (total / matched as f32).clamp(-1.0, 1.0)
    }
}

fn word_polarity(word: &str) -> Option<f32> {
    WORD_POLARITIES
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, p)| *p)
}

#[async_trait]
impl SentimentAnalyzer for LexiconAnalyzer {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn polarity(&self, text: &str) -> Result<f32> {
        Ok(Self::score(text))
    }
}
