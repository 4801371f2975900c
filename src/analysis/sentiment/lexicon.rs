// Sentiment lexicon plus the modifier word lists the analyzer consults.
//
// Valences come from a human-rated lexicon on a -4..4 scale, shipped as a
// tab-separated file and embedded at compile time. Booster words scale the
// word they precede; negations flip it; idioms override the word they contain.

use std::collections::HashMap;

use anyhow::{Context, Result};

static EMBEDDED_LEXICON: &str = include_str!("../../../data/sentiment_lexicon.tsv");

/// Booster increment for intensifiers ("very", "extremely").
pub const B_INCR: f64 = 0.293;
/// Booster decrement for dampeners ("slightly", "barely").
pub const B_DECR: f64 = -0.293;

const BOOST_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
    "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
    "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping",
    "flippin", "frackin", "fracking", "fricking", "frickin", "frigging", "friggin", "fully",
    "fuckin", "fucking", "fuggin", "fugging", "greatly", "hella", "highly", "hugely",
    "incredible", "incredibly", "intensely", "major", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "total", "totally", "tremendous", "tremendously", "uber", "unbelievably",
    "unusually", "utter", "utterly", "very",
];

const BOOST_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "kindof", "kind-of", "less", "little",
    "marginal", "marginally", "occasional", "occasionally", "partly", "scarce", "scarcely",
    "slight", "slightly", "somewhat", "sorta", "sortof", "sort-of",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
    "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
    "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor",
    "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
    "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

/// Multi-word phrases whose valence replaces that of the rated word inside
/// them ("the shit" is praise, "yeah right" is sarcasm).
const IDIOMS: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("bus stop", 0.0),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
    ("broken heart", -2.9),
    ("cut the mustard", 2.0),
    ("hand to mouth", -2.0),
    ("back handed", -2.0),
    ("blow smoke", -2.0),
    ("blowing smoke", -2.0),
    ("upper hand", 1.0),
    ("break a leg", 2.0),
    ("cooking with gas", 2.0),
    ("in the black", 2.0),
    ("in the red", -2.0),
    ("on the ball", 2.0),
    ("under the weather", -2.0),
];

/// Word valences plus booster and idiom scalars, keyed by lowercase text.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<&'static str, f64>,
    idioms: HashMap<&'static str, f64>,
}

impl Lexicon {
    /// The embedded English lexicon.
    pub fn english() -> Result<Self> {
        Self::from_tsv(EMBEDDED_LEXICON).context("Embedded sentiment lexicon is malformed")
    }

    /// Parse `token<TAB>valence[<TAB>…]` lines. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_tsv(source: &str) -> Result<Self> {
        let mut valences = HashMap::new();

        for (line_no, line) in source.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default();
            let valence = fields
                .next()
                .with_context(|| format!("line {}: missing valence for {token:?}", line_no + 1))?
                .trim()
                .parse::<f64>()
                .with_context(|| format!("line {}: bad valence for {token:?}", line_no + 1))?;
            valences.insert(token.to_lowercase(), valence);
        }

        let boosters = BOOST_UP
            .iter()
            .map(|w| (*w, B_INCR))
            .chain(BOOST_DOWN.iter().map(|w| (*w, B_DECR)))
            .collect();

        Ok(Self {
            valences,
            boosters,
            idioms: IDIOMS.iter().copied().collect(),
        })
    }

    /// Valence of a lowercase token, if rated.
    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    /// Booster scalar of a lowercase token, if it is an intensifier or dampener.
    pub fn booster(&self, token: &str) -> Option<f64> {
        self.boosters.get(token).copied()
    }

    /// Valence of a space-joined lowercase phrase, if it is a known idiom.
    pub fn idiom(&self, phrase: &str) -> Option<f64> {
        self.idioms.get(phrase).copied()
    }
}

/// Whether a lowercase token negates what follows it.
pub fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.contains("n't")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lexicon_parses() {
        let lexicon = Lexicon::english().unwrap();
        assert!(lexicon.valences.len() > 700);
        assert_eq!(lexicon.valence("recommend"), Some(1.5));
        assert_eq!(lexicon.idiom("yeah right"), Some(-2.0));
        assert_eq!(lexicon.idiom("yeah"), None);
        assert_eq!(lexicon.valence("great"), Some(3.1));
        assert_eq!(lexicon.valence("problem"), Some(-1.7));
        assert_eq!(lexicon.valence("table"), None);
    }

    #[test]
    fn from_tsv_rejects_missing_valence() {
        assert!(Lexicon::from_tsv("good\t1.9\nbad\n").is_err());
    }

    #[test]
    fn from_tsv_skips_comments_and_extra_columns() {
        let lexicon = Lexicon::from_tsv("# header\ngood\t1.9\t0.9\t[2, 2]\n\n").unwrap();
        assert_eq!(lexicon.valences.len(), 1);
        assert_eq!(lexicon.valence("good"), Some(1.9));
    }

    #[test]
    fn boosters_have_direction() {
        let lexicon = Lexicon::english().unwrap();
        assert_eq!(lexicon.booster("very"), Some(B_INCR));
        assert_eq!(lexicon.booster("slightly"), Some(B_DECR));
        assert_eq!(lexicon.booster("table"), None);
    }

    #[test]
    fn negation_detection() {
        assert!(is_negation("not"));
        assert!(is_negation("isn't"));
        assert!(is_negation("shouldn't"));
        assert!(!is_negation("note"));
    }
}
