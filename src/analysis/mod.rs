// Analysis stage: sentiment, topics, and the combined validation score.

pub mod score;
pub mod sentiment;
pub mod topics;
pub mod validator;

pub use validator::{ProblemValidator, SentimentCounts, ValidationResult};
