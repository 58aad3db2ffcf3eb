//! Public types for the Moodbot API.

mod language;
mod listen;
mod mood;
mod turn;

pub use language::Language;
pub use listen::{
    BASE_ENERGY_THRESHOLD, ENERGY_PER_STEP, ListenOptions, MAX_NOISE_SENSITIVITY,
    MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};
pub use mood::{MoodLabel, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, SentimentResult};
pub use turn::{Reply, SpokenReply, Translation, TurnOutcome};
