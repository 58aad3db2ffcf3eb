//! Valence-aware sentiment analyzer tuned for short, informal text.
//!
//! Produces the "compound" score: a normalized sum of per-word valences with
//! the heuristics that matter in chat messages — intensity boosters with
//! distance decay, negation damping, ALL-CAPS emphasis, exclamation
//! emphasis, and emoticons looked up before punctuation stripping. The raw
//! sum is squashed into [-1, 1] by x / sqrt(x² + alpha).

use async_trait::async_trait;

use super::traits::SentimentAnalyzer;
use crate::error::Result;

/// Weight a booster word adds to (or a dampener removes from) a following
/// sentiment word.
const BOOSTER_WEIGHT: f32 = 0.293;

/// Multiplier applied to a valence in the scope of a negation. Flips the
/// sign and weakens the intensity.
const NEGATION_DAMP: f32 = -0.74;

/// Extra valence for an ALL-CAPS sentiment word in mixed-case text.
const CAPS_EMPHASIS: f32 = 0.733;

/// Extra raw score per exclamation mark.
const EXCLAIM_EMPHASIS: f32 = 0.292;

/// Exclamation marks counted beyond this add nothing.
const MAX_EXCLAIMS: usize = 4;

/// How many tokens back boosters and negations reach.
const MODIFIER_WINDOW: usize = 3;

/// Normalization constant for squashing raw sums into [-1, 1].
const NORMALIZATION_ALPHA: f32 = 15.0;

// ── Valence lexicon ─────────────────────────────────────────────────────

/// (token, raw valence in roughly [-4, 4])
///
/// Emoticon entries are matched against the whole whitespace-delimited
/// token before punctuation stripping.
const VALENCE_LEXICON: &[(&str, f32)] = &[
    // Favorable
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("cheerful", 2.5),
    ("confident", 2.2),
    ("cool", 1.3),
    ("delighted", 2.9),
    ("eager", 1.5),
    ("ecstatic", 3.3),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 2.2),
    ("exciting", 2.5),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("fun", 2.3),
    ("glad", 2.1),
    ("good", 1.9),
    ("grateful", 2.4),
    ("great", 3.1),
    ("happier", 2.8),
    ("happiness", 2.7),
    ("happy", 2.7),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("incredible", 2.8),
    ("inspired", 2.3),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("laugh", 2.6),
    ("like", 1.5),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("optimistic", 2.4),
    ("peaceful", 2.2),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 2.3),
    ("positive", 2.3),
    ("proud", 2.6),
    ("relaxed", 2.0),
    ("relieved", 2.1),
    ("satisfied", 2.0),
    ("smile", 2.1),
    ("success", 2.7),
    ("sweet", 2.0),
    ("terrific", 3.0),
    ("thankful", 2.7),
    ("thrilled", 3.0),
    ("wonderful", 2.7),
    ("wow", 2.8),
    ("yay", 2.4),
    // Unfavorable
    ("afraid", -2.2),
    ("alone", -1.0),
    ("angry", -2.7),
    ("annoyed", -1.8),
    ("anxious", -1.9),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bored", -1.3),
    ("broken", -1.6),
    ("cry", -2.2),
    ("crying", -2.3),
    ("depressed", -2.3),
    ("depressing", -2.2),
    ("devastated", -3.0),
    ("disappointed", -2.0),
    ("disappointing", -2.1),
    ("disaster", -3.1),
    ("down", -1.1),
    ("dreadful", -2.6),
    ("exhausted", -1.7),
    ("fail", -2.3),
    ("failed", -2.3),
    ("failure", -2.6),
    ("fear", -2.2),
    ("frustrated", -2.1),
    ("furious", -2.9),
    ("gloomy", -1.8),
    ("grief", -2.5),
    ("hate", -2.7),
    ("heartbroken", -3.0),
    ("helpless", -2.0),
    ("horrible", -2.5),
    ("hurt", -2.3),
    ("hurts", -2.2),
    ("lonely", -1.9),
    ("lost", -1.3),
    ("mad", -2.2),
    ("miserable", -2.3),
    ("nervous", -1.6),
    ("pain", -2.3),
    ("painful", -2.4),
    ("panic", -2.4),
    ("pathetic", -2.4),
    ("sad", -2.1),
    ("scared", -2.1),
    ("sick", -1.7),
    ("sorry", -0.5),
    ("stressed", -1.8),
    ("struggle", -1.7),
    ("stuck", -1.4),
    ("terrible", -2.1),
    ("tired", -1.2),
    ("ugly", -2.1),
    ("unhappy", -1.9),
    ("upset", -1.9),
    ("weak", -1.4),
    ("worried", -1.5),
    ("worry", -1.3),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -1.6),
    // Emoticons
    (":)", 2.0),
    (":-)", 2.2),
    (":d", 2.3),
    (";)", 1.1),
    ("<3", 3.0),
    (":(", -2.0),
    (":-(", -2.2),
    (":/", -1.4),
];

/// (booster, weight). Positive entries amplify, negative dampen.
const BOOSTERS: &[(&str, f32)] = &[
    ("absolutely", BOOSTER_WEIGHT),
    ("completely", BOOSTER_WEIGHT),
    ("deeply", BOOSTER_WEIGHT),
    ("especially", BOOSTER_WEIGHT),
    ("extremely", BOOSTER_WEIGHT),
    ("incredibly", BOOSTER_WEIGHT),
    ("really", BOOSTER_WEIGHT),
    ("remarkably", BOOSTER_WEIGHT),
    ("so", BOOSTER_WEIGHT),
    ("totally", BOOSTER_WEIGHT),
    ("truly", BOOSTER_WEIGHT),
    ("utterly", BOOSTER_WEIGHT),
    ("very", BOOSTER_WEIGHT),
    ("almost", -BOOSTER_WEIGHT),
    ("barely", -BOOSTER_WEIGHT),
    ("hardly", -BOOSTER_WEIGHT),
    ("kinda", -BOOSTER_WEIGHT),
    ("marginally", -BOOSTER_WEIGHT),
    ("partly", -BOOSTER_WEIGHT),
    ("slightly", -BOOSTER_WEIGHT),
    ("somewhat", -BOOSTER_WEIGHT),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "neither", "nor", "cannot", "can't", "cant",
    "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt",
    "aren't", "arent", "weren't", "werent", "won't", "wont", "wouldn't", "wouldnt", "couldn't",
    "couldnt", "shouldn't", "shouldnt", "ain't", "aint",
];

struct Token {
    /// Whole token, lowercased, punctuation intact (emoticon form).
    lower: String,
    /// Punctuation-stripped lowercase form.
    stripped: String,
    all_caps: bool,
}

/// Valence analyzer: produces the compound score the classifier blends
/// with the rule analyzer's polarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValenceAnalyzer;

impl ValenceAnalyzer {
    /// Create a valence analyzer.
    pub fn new() -> Self {
        Self
    }

    fn score(text: &str) -> f32 {
        let tokens = tokenize(text);

        let alpha_tokens = tokens
            .iter()
            .filter(|t| t.stripped.chars().any(|c| c.is_alphabetic()))
            .count();
        let caps_tokens = tokens.iter().filter(|t| t.all_caps).count();
        // Emphasis only means something when the writer mixes cases.
        let caps_differential = caps_tokens > 0 && caps_tokens < alpha_tokens;

        let mut sum = 0.0_f32;
        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = token_valence(token) else {
                continue;
            };

            if caps_differential && token.all_caps {
                valence += signed(CAPS_EMPHASIS, valence);
            }

            let mut negated = false;
            for dist in 1..=MODIFIER_WINDOW {
                if dist > i {
                    break;
                }
                let prev = &tokens[i - dist];
                if let Some(weight) = booster_weight(&prev.stripped) {
                    let decay = match dist {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += signed(weight * decay, valence);
                }
                if NEGATIONS.contains(&prev.stripped.as_str()) {
                    negated = true;
                }
            }
            if negated {
                valence *= NEGATION_DAMP;
            }

            sum += valence;
        }

        if sum != 0.0 {
            let exclaims = text.chars().filter(|&c| c == '!').count().min(MAX_EXCLAIMS);
            sum += signed(exclaims as f32 * EXCLAIM_EMPHASIS, sum);
        }

        normalize(sum)
    }
}

/// Align `amount` with the sign of `reference`: amplifiers push away from
/// zero, dampeners (negative amounts) pull toward it.
fn signed(amount: f32, reference: f32) -> f32 {
    if reference < 0.0 { -amount } else { amount }
}

fn normalize(sum: f32) -> f32 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|raw| {
            let stripped_raw = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            let mut alpha = stripped_raw.chars().filter(|c| c.is_alphabetic()).peekable();
            let all_caps = alpha.peek().is_some() && alpha.all(|c| c.is_uppercase());
            Token {
                lower: raw.to_lowercase(),
                stripped: stripped_raw.to_lowercase(),
                all_caps,
            }
        })
        .collect()
}

fn token_valence(token: &Token) -> Option<f32> {
    VALENCE_LEXICON
        .iter()
        .find(|(w, _)| *w == token.lower || *w == token.stripped)
        .map(|(_, v)| *v)
}

fn booster_weight(word: &str) -> Option<f32> {
    BOOSTERS.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

#[async_trait]
impl SentimentAnalyzer for ValenceAnalyzer {
    fn name(&self) -> &str {
        "valence"
    }

    async fn polarity(&self, text: &str) -> Result<f32> {
        Ok(Self::score(text))
    }
}
