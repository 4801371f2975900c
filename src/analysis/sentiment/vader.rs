// Rule-based polarity scoring over the sentiment lexicon.
//
// Each token gets a valence from the lexicon, adjusted by the up-to-three
// tokens before it (boosters, negations), by idioms around it, by ALL-CAPS
// emphasis, by a contrastive "but", and by trailing "!"/"?" runs. The summed valence is
// squashed into [-1, 1] as the compound score; pos/neu/neg are the
// proportions of the text falling in each bucket.

use anyhow::Result;

use super::lexicon::{is_negation, Lexicon};
use super::{PolarityScores, SentimentScorer};

/// Emphasis added to a rated word written in ALL CAPS among mixed-case text.
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
const N_SCALAR: f64 = -0.74;
/// Approximates the maximum expected compound sum.
const NORMALIZE_ALPHA: f64 = 15.0;

const EXCLAMATION_BOOST: f64 = 0.292;
const EXCLAMATION_MAX: usize = 4;
const QUESTION_BOOST: f64 = 0.18;
const QUESTION_BOOST_MAX: f64 = 0.96;

/// Punctuation stripped from token edges (ASCII punctuation).
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

pub struct VaderAnalyzer {
    lexicon: Lexicon,
}

impl VaderAnalyzer {
    /// Analyzer backed by the embedded English lexicon.
    pub fn new() -> Result<Self> {
        Ok(Self::with_lexicon(Lexicon::english()?))
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Score a text. Empty or token-free text scores all zeros.
    pub fn polarity(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_diff = allcap_differential(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            if self.lexicon.booster(&lower[i]).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if lower[i] == "kind" && lower.get(i + 1).map(String::as_str) == Some("of") {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.valence_at(&tokens, &lower, i, cap_diff));
        }

        but_check(&lower, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn valence_at(&self, tokens: &[&str], lower: &[String], i: usize, cap_diff: bool) -> f64 {
        let Some(base) = self.lexicon.valence(&lower[i]) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another rated word is a determiner, not a sentiment
        if lower[i] == "no"
            && lower
                .get(i + 1)
                .is_some_and(|next| self.lexicon.contains(next))
        {
            valence = 0.0;
        }
        let preceded_by_no = (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && matches!(lower[i - 1].as_str(), "or" | "nor"));
        if preceded_by_no {
            valence = base * N_SCALAR;
        }

        if cap_diff && is_upper(tokens[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let prev = i - (start + 1);
            if self.lexicon.contains(&lower[prev]) {
                continue;
            }
            let mut scalar = self.booster_scalar(tokens[prev], &lower[prev], valence, cap_diff);
            if start == 1 {
                scalar *= 0.95;
            } else if start == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lower, start, i);
            if start == 2 {
                valence = self.idiom_check(valence, lower, i);
            }
        }

        least_check(valence, lower, i, &self.lexicon)
    }

    /// Replace `valence` when token `i` sits inside a known idiom. Phrases
    /// ending before or at `i` are tried first; phrases starting at `i` win.
    /// Only called with `i >= 3`.
    fn idiom_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        let behind = [
            format!("{} {}", lower[i - 1], lower[i]),
            format!("{} {} {}", lower[i - 2], lower[i - 1], lower[i]),
            format!("{} {}", lower[i - 2], lower[i - 1]),
            format!("{} {} {}", lower[i - 3], lower[i - 2], lower[i - 1]),
            format!("{} {}", lower[i - 3], lower[i - 2]),
        ];
        let mut valence = behind
            .iter()
            .find_map(|phrase| self.lexicon.idiom(phrase))
            .unwrap_or(valence);

        if let Some(next) = lower.get(i + 1) {
            if let Some(v) = self.lexicon.idiom(&format!("{} {next}", lower[i])) {
                valence = v;
            }
            if let Some(after) = lower.get(i + 2) {
                if let Some(v) = self.lexicon.idiom(&format!("{} {next} {after}", lower[i])) {
                    valence = v;
                }
            }
        }
        valence
    }

    /// How much a preceding booster word shifts `valence`.
    fn booster_scalar(&self, token: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
        let Some(mut scalar) = self.lexicon.booster(lower) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if cap_diff && is_upper(token) {
            scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
        }
        scalar
    }
}

impl SentimentScorer for VaderAnalyzer {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        Ok(self.polarity(text))
    }
}

/// Split on whitespace and strip edge punctuation from word tokens. Tokens
/// that would shrink to two characters or fewer are kept as-is so emoticons
/// like ":)" survive.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| PUNCTUATION.contains(c));
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .collect()
}

/// True when the token has cased letters and none of them are lowercase.
fn is_upper(token: &str) -> bool {
    token.chars().any(char::is_uppercase) && !token.chars().any(char::is_lowercase)
}

/// True when some, but not all, tokens are ALL CAPS.
fn allcap_differential(tokens: &[&str]) -> bool {
    let upper = tokens.iter().filter(|t| is_upper(t)).count();
    upper > 0 && upper < tokens.len()
}

fn negation_check(valence: f64, lower: &[String], start: usize, i: usize) -> f64 {
    let so_or_this = |w: &str| w == "so" || w == "this";
    match start {
        0 => {
            if is_negation(&lower[i - 1]) {
                return valence * N_SCALAR;
            }
        }
        1 => {
            if lower[i - 2] == "never" && so_or_this(&lower[i - 1]) {
                return valence * 1.25;
            }
            if lower[i - 2] == "without" && lower[i - 1] == "doubt" {
                return valence;
            }
            if is_negation(&lower[i - 2]) {
                return valence * N_SCALAR;
            }
        }
        _ => {
            if lower[i - 3] == "never" && (so_or_this(&lower[i - 2]) || so_or_this(&lower[i - 1])) {
                return valence * 1.25;
            }
            if lower[i - 3] == "without" && (lower[i - 2] == "doubt" || lower[i - 1] == "doubt") {
                return valence;
            }
            if is_negation(&lower[i - 3]) {
                return valence * N_SCALAR;
            }
        }
    }
    valence
}

/// "least" flips a following rated word unless it reads "at least" or
/// "very least".
fn least_check(valence: f64, lower: &[String], i: usize, lexicon: &Lexicon) -> f64 {
    if i > 0 && lower[i - 1] == "least" && !lexicon.contains("least") {
        if i > 1 && (lower[i - 2] == "at" || lower[i - 2] == "very") {
            return valence;
        }
        return valence * N_SCALAR;
    }
    valence
}

/// Sentiment before "but" is halved; sentiment after it is boosted by half.
fn but_check(lower: &[String], sentiments: &mut [f64]) {
    let Some(but_index) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < but_index {
            *sentiment *= 0.5;
        } else if i > but_index {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(EXCLAMATION_MAX);
    let questions = text.matches('?').count();
    let question_boost = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_BOOST,
        _ => QUESTION_BOOST_MAX,
    };
    exclamations as f64 * EXCLAMATION_BOOST + question_boost
}

/// Squash an unbounded valence sum into [-1, 1].
pub fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    // Neutral tokens count 1 each; rated tokens are shifted by 1 so they
    // outweigh a single neutral word.
    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    PolarityScores {
        neg: round_to((neg_sum / total).abs(), 3),
        neu: round_to((neu_count / total).abs(), 3),
        pos: round_to((pos_sum / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> VaderAnalyzer {
        VaderAnalyzer::new().unwrap()
    }

    #[test]
    fn neutral_text_scores_zero() {
        let scores = analyzer().polarity("The table is made of wood.");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neu, 1.0);
    }

    #[test]
    fn empty_text_scores_all_zero() {
        assert_eq!(analyzer().polarity("   "), PolarityScores::default());
    }

    #[test]
    fn single_positive_word() {
        // "good" = 1.9 → 1.9 / sqrt(1.9² + 15)
        let scores = analyzer().polarity("good");
        let expected = round_to(1.9 / (1.9f64 * 1.9 + 15.0).sqrt(), 4);
        assert_eq!(scores.compound, expected);
        assert_eq!(scores.pos, 1.0);
    }

    #[test]
    fn negation_flips_polarity() {
        let a = analyzer();
        assert!(a.polarity("this is good").compound > 0.0);
        assert!(a.polarity("this is not good").compound < 0.0);
    }

    #[test]
    fn booster_intensifies() {
        let a = analyzer();
        assert!(a.polarity("very good").compound > a.polarity("good").compound);
        assert!(a.polarity("slightly good").compound < a.polarity("good").compound);
    }

    #[test]
    fn caps_emphasis_in_mixed_case() {
        let a = analyzer();
        assert!(a.polarity("this is GREAT").compound > a.polarity("this is great").compound);
    }

    #[test]
    fn exclamation_amplifies() {
        let a = analyzer();
        assert!(a.polarity("great!!!").compound > a.polarity("great").compound);
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        let scores = analyzer().polarity("the app is good but the service is terrible");
        assert!(scores.compound < 0.0, "got {}", scores.compound);
    }

    #[test]
    fn least_negates_unless_at_least() {
        let a = analyzer();
        assert!(a.polarity("at least good").compound > 0.0);
        assert!(a.polarity("least good").compound < 0.0);
    }

    #[test]
    fn idioms_override_the_word_inside_them() {
        let a = analyzer();
        assert!(a.polarity("honestly this app is the shit").compound > 0.0);
        assert!(a.polarity("honestly this app is shit").compound < 0.0);
        assert!(a.polarity("sure that will work yeah right").compound < 0.0);
    }

    #[test]
    fn idioms_need_three_tokens_of_context() {
        // Too close to the start of the text for the idiom window
        assert!(analyzer().polarity("the shit").compound < 0.0);
    }

    #[test]
    fn emoticons_survive_tokenization() {
        assert_eq!(tokenize("nice :) ok"), vec!["nice", ":)", "ok"]);
        assert_eq!(tokenize("\"hello,\" world!"), vec!["hello", "world"]);
    }

    #[test]
    fn normalize_is_bounded() {
        assert!(normalize(1e9) <= 1.0);
        assert!(normalize(-1e9) >= -1.0);
        assert_eq!(normalize(0.0), 0.0);
    }
}
