use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use problem_validator::analysis::ProblemValidator;
use problem_validator::collector::source::{ReplyLimit, SourceConnector};
use problem_validator::collector::{Collection, Collector, CollectorConfig};
use problem_validator::config::Config;
use problem_validator::output::{export, terminal};
use problem_validator::reddit::RedditConnector;

/// Used when keyword discovery finds no subreddits at all.
const DEFAULT_SUBREDDITS: &[&str] = &[
    "smallbusiness",
    "Entrepreneur",
    "startups",
    "SaaS",
    "productivity",
];

/// Problem Validator: measure how real a problem is from Reddit discussion.
///
/// Collects posts and comments from relevant subreddits, then scores the
/// problem statement from their sentiment and topic structure.
#[derive(Parser)]
#[command(name = "problem-validator", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect posts and comments and save them as CSV
    Collect {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        limits: LimitArgs,

        /// Directory for the CSV export (default: VALIDATOR_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Collect, then score a problem statement
    Validate {
        /// The problem statement to validate
        statement: String,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        limits: LimitArgs,

        /// Print the result as JSON instead of the colored summary
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8080)
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Check configuration and Reddit connectivity
    Check,
}

#[derive(Args)]
struct TargetArgs {
    /// Keywords used to discover subreddits
    #[arg(short, long, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Subreddits to collect from directly (skips discovery)
    #[arg(short, long, value_delimiter = ',')]
    subreddits: Vec<String>,
}

#[derive(Args)]
struct LimitArgs {
    /// Hot posts to request per subreddit (default: 100)
    #[arg(long, default_value = "100")]
    post_limit: usize,

    /// Comments to keep per post (default: 50)
    #[arg(long, default_value = "50")]
    comment_limit: usize,

    /// Keep every comment in each thread
    #[arg(long, conflicts_with = "comment_limit")]
    all_comments: bool,

    /// Minimum post score (default: 10)
    #[arg(long, default_value = "10")]
    min_score: i64,

    /// Subreddits kept per keyword (default: 5)
    #[arg(long, default_value = "5")]
    subreddits_per_keyword: usize,
}

impl LimitArgs {
    fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            item_limit: self.post_limit,
            reply_limit: if self.all_comments {
                ReplyLimit::Unbounded
            } else {
                ReplyLimit::Limited(self.comment_limit)
            },
            min_weight: self.min_score,
            groups_per_keyword: self.subreddits_per_keyword,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("problem_validator=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Collect {
            target,
            limits,
            output_dir,
        } => {
            let config = Config::load()?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let source = RedditConnector::new(config).connect().await?;

            let collector = Collector::new(source.as_ref(), limits.collector_config());
            let (collection, groups) = collect_with_fallback(&collector, &target).await;

            let path = export::write_records(&collection.records, &output_dir)?;
            terminal::display_collection(&collection, &groups, path.as_deref());
        }

        Commands::Validate {
            statement,
            target,
            limits,
            json,
        } => {
            let config = Config::load()?;
            let validator = ProblemValidator::new()?;
            let source = RedditConnector::new(config).connect().await?;

            let collector = Collector::new(source.as_ref(), limits.collector_config());
            let (collection, groups) = collect_with_fallback(&collector, &target).await;
            if !json {
                terminal::display_collection(&collection, &groups, None);
            }

            let spinner = spinner("Analyzing sentiment and topics...");
            let outcome = validator.validate(&collection.records, &statement);
            spinner.finish_and_clear();

            match outcome {
                Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
                Ok(result) => terminal::display_validation(&result),
                Err(e) => {
                    warn!(error = %e, "Analysis failed");
                    if json {
                        println!("{{}}");
                    } else {
                        println!("{} {e}", "Analysis failed:".red().bold());
                    }
                }
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            config.require_reddit()?;
            problem_validator::web::run_server(config, port, &bind).await?;
        }

        Commands::Check => {
            let config = Config::load()?;
            println!("API:        {}", config.api_url);
            println!("Auth:       {}", config.auth_url);
            println!("Output dir: {}", config.output_dir.display());
            println!("Rate limit: {} req/s", config.requests_per_second);

            match RedditConnector::new(config).connect().await {
                Ok(_) => println!("\n{}", "Connected to Reddit".green().bold()),
                Err(e) => {
                    println!("\n{} {e}", "Connection failed:".red().bold());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Collect from explicit subreddits, else from keyword discovery, else from
/// DEFAULT_SUBREDDITS. Returns the groups actually collected from.
async fn collect_with_fallback(
    collector: &Collector<'_>,
    target: &TargetArgs,
) -> (Collection, Vec<String>) {
    let groups = if !target.subreddits.is_empty() {
        target.subreddits.clone()
    } else {
        let spinner = spinner("Searching for relevant subreddits...");
        let resolution = collector.resolve_groups(&target.keywords).await;
        spinner.finish_and_clear();
        for failure in &resolution.failures {
            println!("  {} {failure}", "!".yellow());
        }
        if resolution.groups.is_empty() {
            info!("No subreddits discovered, using defaults");
            println!(
                "{}",
                "No subreddits found for those keywords; using the default list".dimmed()
            );
            DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect()
        } else {
            resolution.groups
        }
    };

    let spinner = spinner(&format!("Collecting from {} subreddits...", groups.len()));
    let collection = collector.collect(&groups).await;
    spinner.finish_and_clear();

    (collection, groups)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
