//! Mood classification.
//!
//! Combines two independent sentiment scores — a rule/lexicon polarity and
//! a valence-aware compound score — into one verdict with a continuous
//! combined score.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::providers::{LexiconAnalyzer, SentimentAnalyzer, ValenceAnalyzer};
use crate::telemetry;
use crate::types::SentimentResult;

/// Weight of the valence analyzer's compound score in the combination.
pub const VALENCE_WEIGHT: f32 = 0.7;

/// Weight of the rule/lexicon analyzer's polarity in the combination.
pub const RULE_WEIGHT: f32 = 0.3;

/// Two-analyzer mood classifier.
///
/// `combined = 0.7 × compound + 0.3 × polarity`, classified against the
/// thresholds in [`crate::types::MoodLabel::from_score`].
pub struct MoodClassifier {
    rule: Arc<dyn SentimentAnalyzer>,
    valence: Arc<dyn SentimentAnalyzer>,
}

impl MoodClassifier {
    /// Classifier over the built-in analyzers.
    pub fn new() -> Self {
        Self::with_analyzers(
            Arc::new(LexiconAnalyzer::new()),
            Arc::new(ValenceAnalyzer::new()),
        )
    }

    /// Classifier over custom analyzers: `rule` supplies the lexicon
    /// polarity, `valence` the compound score.
    pub fn with_analyzers(
        rule: Arc<dyn SentimentAnalyzer>,
        valence: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        Self { rule, valence }
    }

    /// Classify one piece of text.
    ///
    /// A failure from either analyzer propagates; there is no silent default
    /// verdict.
    #[instrument(skip(self, text), fields(operation = "classify"))]
    pub async fn classify(&self, text: &str) -> Result<SentimentResult> {
        let started = Instant::now();
        let rule_result = self.rule.polarity(text).await;
        telemetry::record_service_call("sentiment", self.rule.name(), started, rule_result.is_ok());
        let polarity = rule_result?;

        let started = Instant::now();
        let valence_result = self.valence.polarity(text).await;
        telemetry::record_service_call(
            "sentiment",
            self.valence.name(),
            started,
            valence_result.is_ok(),
        );
        let compound = valence_result?;

        let combined = VALENCE_WEIGHT * compound + RULE_WEIGHT * polarity;
        let result = SentimentResult::from_score(combined);
        debug!(
            polarity,
            compound,
            combined,
            label = %result.label,
            "classified input"
        );
        Ok(result)
    }
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::MoodbotError;
    use crate::types::MoodLabel;

    struct FailingAnalyzer;

    #[async_trait]
    impl SentimentAnalyzer for FailingAnalyzer {
        fn name(&self) -> &str {
            "failing"
        }

        async fn polarity(&self, _text: &str) -> Result<f32> {
            Err(MoodbotError::Unexpected("analyzer offline".to_string()))
        }
    }

    #[tokio::test]
    async fn built_in_analyzers_classify_plain_feelings() {
        let classifier = MoodClassifier::new();

        let happy = classifier.classify("I am so happy today!").await.unwrap();
        assert_eq!(happy.label, MoodLabel::Positive);

        let sad = classifier.classify("I feel terrible and sad").await.unwrap();
        assert_eq!(sad.label, MoodLabel::Negative);

        let flat = classifier.classify("the meeting is at noon").await.unwrap();
        assert_eq!(flat.label, MoodLabel::Neutral);
    }

    #[tokio::test]
    async fn analyzer_failure_propagates() {
        let classifier = MoodClassifier::with_analyzers(
            Arc::new(FailingAnalyzer),
            Arc::new(ValenceAnalyzer::new()),
        );
        let err = classifier.classify("anything").await.unwrap_err();
        assert!(matches!(err, MoodbotError::Unexpected(_)));
    }
}
