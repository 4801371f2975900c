// Validation score: one number in [0, 1] from sentiment counts and topic
// coverage. Higher means the problem looks more real.
//
// score = 0.7 × (negative share) + 0.3 × min(topics / 5, 1), rounded to
// two decimals. A batch with no scored sentiment always scores 0.0.

/// Weight of the negative-sentiment share.
pub const NEGATIVE_WEIGHT: f64 = 0.7;
/// Weight of topic coverage.
pub const TOPIC_WEIGHT: f64 = 0.3;
/// Topic count at which coverage saturates.
pub const TOPIC_SATURATION: usize = 5;

pub fn validation_score(positive: usize, negative: usize, nonempty_topics: usize) -> f64 {
    let total = positive + negative;
    if total == 0 {
        return 0.0;
    }

    let negative_share = negative as f64 / total as f64;
    let coverage = (nonempty_topics as f64 / TOPIC_SATURATION as f64).min(1.0);
    round2(NEGATIVE_WEIGHT * negative_share + TOPIC_WEIGHT * coverage)
}

/// Rounds the exact binary value, so 0.825 (stored just
/// below) rounds down.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
