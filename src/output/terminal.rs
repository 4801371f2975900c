// Colored terminal output for validation results and collection runs.
//
// main.rs delegates all terminal formatting here.

use std::path::Path;

use colored::Colorize;

use super::truncate_chars;
use crate::analysis::ValidationResult;
use crate::collector::Collection;

const BAR_WIDTH: usize = 30;

/// Display a validation result: score bar, sentiment split, topics.
pub fn display_validation(result: &ValidationResult) {
    println!(
        "\n{}",
        format!("=== Problem Validation ({} records) ===", result.volume).bold()
    );
    println!("  {}", truncate_chars(&result.statement, 100).italic());
    println!();

    println!(
        "  Score: {}  {}",
        colorize_score(result.score),
        score_bar(result.score)
    );
    println!();

    let counts = &result.sentiment_counts;
    println!("  {}", "Sentiment".bold());
    if counts.total() == 0 {
        println!("    {}", "No non-empty text to score".dimmed());
    } else {
        let share = |n: usize| n as f64 * 100.0 / counts.total() as f64;
        println!(
            "    {} {:>5} ({:.0}%)",
            "negative".red(),
            counts.negative,
            share(counts.negative)
        );
        println!(
            "    {} {:>5} ({:.0}%)",
            "positive".green(),
            counts.positive,
            share(counts.positive)
        );
    }
    println!();

    println!("  {}", "Topics".bold());
    if result.topics.is_empty() {
        println!(
            "    {}",
            "Not enough distinct text to discover topics".dimmed()
        );
    } else {
        for (name, terms) in &result.topics.topics {
            println!(
                "    {:<9} {}",
                name.cyan(),
                truncate_chars(&terms.join(", "), 90)
            );
        }
    }
    println!();
}

/// Display a one-paragraph summary of a collection run.
pub fn display_collection(collection: &Collection, groups: &[String], csv_path: Option<&Path>) {
    println!(
        "\n{} {} posts, {} comments from {} subreddits",
        "Collected".bold(),
        collection.item_count(),
        collection.reply_count(),
        groups.len()
    );
    if !groups.is_empty() {
        println!(
            "  {}",
            truncate_chars(
                &groups.iter().map(|g| format!("r/{g}")).collect::<Vec<_>>().join(" "),
                100
            )
            .dimmed()
        );
    }

    for failure in &collection.failures {
        println!("  {} {}", "!".yellow(), truncate_chars(&failure.to_string(), 120));
    }

    match csv_path {
        Some(path) => println!("  Saved to {}", path.display().to_string().bold()),
        None => println!("  {}", "Nothing to save".dimmed()),
    }
}

fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.2}");
    if score >= 0.6 {
        text.red().bold()
    } else if score >= 0.3 {
        text.yellow()
    } else {
        text.green()
    }
}

fn score_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled).dimmed()
    )
}
