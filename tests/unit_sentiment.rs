// Sentiment labeling through the SentimentScorer trait.

use anyhow::{bail, Result};

use problem_validator::analysis::sentiment::vader::VaderAnalyzer;
use problem_validator::analysis::sentiment::{
    label_for, PolarityScores, SentimentLabel, SentimentScorer,
};

fn analyzer() -> VaderAnalyzer {
    VaderAnalyzer::new().unwrap()
}

#[test]
fn complaints_are_negative() {
    let a = analyzer();
    for text in [
        "Invoicing is a nightmare and the software is useless",
        "I hate reconciling payments, it is so frustrating",
        "This tool is broken and a complete waste of money",
    ] {
        let scores = a.polarity_scores(text).unwrap();
        assert_eq!(label_for(scores.compound), SentimentLabel::Negative, "{text}");
        assert!(scores.neg > scores.pos, "{text}");
    }
}

#[test]
fn praise_is_positive() {
    let a = analyzer();
    for text in [
        "I love how easy this makes payroll",
        "The support team was amazing and really helpful!",
    ] {
        let scores = a.polarity_scores(text).unwrap();
        assert_eq!(label_for(scores.compound), SentimentLabel::Positive, "{text}");
    }
}

#[test]
fn everyday_reddit_vocabulary_is_rated() {
    let a = analyzer();
    let recommend = a.polarity_scores("I would recommend this app").unwrap();
    assert_eq!(label_for(recommend.compound), SentimentLabel::Positive);

    for text in [
        "this is so stressful",
        "I struggle with invoices every week",
        "ugh wtf",
    ] {
        let scores = a.polarity_scores(text).unwrap();
        assert!(scores.compound < 0.0, "{text} scored {}", scores.compound);
    }
}

#[test]
fn sarcastic_idiom_turns_praise_negative() {
    let a = analyzer();
    let plain = a.polarity_scores("sure that will work yeah").unwrap();
    let sarcastic = a.polarity_scores("sure that will work yeah right").unwrap();
    assert_eq!(label_for(plain.compound), SentimentLabel::Positive);
    assert_eq!(label_for(sarcastic.compound), SentimentLabel::Negative);
}

#[test]
fn neutral_text_counts_as_negative() {
    let results = analyzer().analyze(&["We use a spreadsheet for inventory"]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].raw.compound, 0.0);
    assert_eq!(results[0].label, SentimentLabel::Negative);
    assert_eq!(results[0].score, 0.0);
}

#[test]
fn analyze_skips_blank_texts() {
    let results = analyzer()
        .analyze(&["", "   ", "awesome", "\n\t", "horrible"])
        .unwrap();
    let labels: Vec<SentimentLabel> = results.iter().map(|r| r.label).collect();
    assert_eq!(labels, vec![SentimentLabel::Positive, SentimentLabel::Negative]);
}

#[test]
fn scores_are_bounded() {
    let a = analyzer();
    let text = "AWESOME AWESOME AWESOME amazing love love love!!!!!!";
    let scores = a.polarity_scores(text).unwrap();
    assert!(scores.compound <= 1.0 && scores.compound > 0.9);
    let sum = scores.neg + scores.neu + scores.pos;
    assert!((sum - 1.0).abs() < 0.01, "proportions sum to {sum}");
}

#[test]
fn result_score_is_label_strength() {
    let results = analyzer().analyze(&["painful"]).unwrap();
    assert_eq!(results[0].score, results[0].raw.compound.abs());
    assert!(results[0].score > 0.0);
}

struct FailingScorer;

impl SentimentScorer for FailingScorer {
    fn polarity_scores(&self, _text: &str) -> Result<PolarityScores> {
        bail!("model unavailable")
    }
}

#[test]
fn scorer_errors_propagate() {
    assert!(FailingScorer.analyze(&["anything"]).is_err());
    // Blank input never reaches the scorer
    assert!(FailingScorer.analyze(&[" "]).unwrap().is_empty());
}
