//! Terminal client for the TinyLink short-link service.
//!
//! # Usage
//!
//! ```bash
//! # List links, optionally filtered
//! tinylink list --search docs
//!
//! # Create a link with a random or custom code
//! tinylink create https://example.com/some/long/path
//! tinylink create https://example.com --code promo24
//!
//! # Delete a link (asks for confirmation unless --yes)
//! tinylink delete promo24
//!
//! # Show click statistics
//! tinylink stats promo24
//!
//! # Resolve a short code and hand it off to the redirect endpoint
//! tinylink open promo24
//! ```
//!
//! # Environment Variables
//!
//! See [`tinylink::config`]. A `.env` file in the working directory is loaded
//! first.

use tinylink::application::sequencer::{
    ConfirmOutcome, Dashboard, SubmitOutcome, Toast, ToastKind,
};
use tinylink::application::services::{
    NOT_FOUND_ACTIONS, RedirectResolver, ResolveState, StatsOutcome, StatsService,
};
use tinylink::config::{self, Config};
use tinylink::domain::navigator::Navigator;
use tinylink::infrastructure::http::HttpLinkRepository;
use tinylink::utils::time_format::relative_time;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Manage TinyLink short links from the terminal.
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all links with click totals
    List {
        /// Only show links whose code or target contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a short link
    Create {
        /// Destination URL (must include http:// or https://)
        url: String,

        /// Custom code, 6-8 letters or digits (random if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a short link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics for a short link
    Stats { code: String },

    /// Resolve a short code and follow it
    Open { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config)?;
    config.print_summary();

    let repository = Arc::new(
        HttpLinkRepository::new(&config.api_url, config.http_timeout())
            .context("Failed to build HTTP client")?,
    );

    match cli.command {
        Commands::List { search } => list_links(repository, &config, search).await?,
        Commands::Create { url, code } => create_link(repository, &config, url, code).await?,
        Commands::Delete { code, yes } => delete_link(repository, &config, code, yes).await?,
        Commands::Stats { code } => show_stats(repository, &config, &code).await?,
        Commands::Open { code } => open_link(repository, &config, &code).await?,
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid RUST_LOG directive '{}'", config.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.is_json_logging() {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }

    Ok(())
}

fn dashboard(repository: Arc<HttpLinkRepository>, config: &Config) -> Dashboard<HttpLinkRepository> {
    Dashboard::new(repository, config.app_url.clone(), config.timings())
}

fn print_toast(toast: Option<Toast>) {
    let Some(toast) = toast else { return };
    let line = match toast.kind {
        ToastKind::Success => format!("✅ {}", toast.message).green().bold(),
        ToastKind::Error => format!("❌ {}", toast.message).red().bold(),
        ToastKind::Neutral => format!("ℹ️  {}", toast.message).yellow(),
    };
    println!("{line}");
}

/// Prints the collection as a table followed by totals.
///
/// ```text
/// 🔗 Short Links
///
///   Code       Target                                         Clicks  Last click
///   ───────────────────────────────────────────────────────────────────────────
///   promo24    https://example.com/some/long/path                 12  3 hours ago
/// ```
async fn list_links(
    repository: Arc<HttpLinkRepository>,
    config: &Config,
    search: Option<String>,
) -> Result<()> {
    let mut dashboard = dashboard(repository, config);

    println!("{}", "🔗 Short Links".bright_blue().bold());
    println!();

    if !dashboard.load().await {
        print_toast(dashboard.notifier().current().await);
        anyhow::bail!("Could not reach the link service at {}", config.api_url);
    }

    if let Some(search) = search {
        dashboard.set_query(search);
    }

    if let Some(empty) = dashboard.empty_state().await {
        println!("  {}", empty.title().yellow());
        println!("  {}", empty.hint().bright_black());
        println!();
        return Ok(());
    }

    println!(
        "  {:<10} {:<46} {:>6}  {}",
        "Code".bright_white().bold(),
        "Target".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last click".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    let now = Utc::now();
    for link in dashboard.visible_links().await {
        println!(
            "  {:<10} {:<46} {:>6}  {}",
            link.code.cyan(),
            link.truncated_target(43),
            link.total_clicks.to_string().bright_white(),
            relative_time(link.last_clicked_at, now).bright_black()
        );
    }

    let summary = dashboard.summary().await;
    println!();
    println!(
        "  Links: {}   Clicks: {}   Avg/link: {}",
        summary.count.to_string().bright_white().bold(),
        summary.total_clicks.to_string().bright_white().bold(),
        summary.avg_clicks.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn create_link(
    repository: Arc<HttpLinkRepository>,
    config: &Config,
    url: String,
    code: Option<String>,
) -> Result<()> {
    let dashboard = dashboard(repository, config);
    let form = dashboard.form();

    println!("{}", "✨ Create Short Link".bright_blue().bold());
    println!();

    form.open().await;
    form.set_target_url(url).await;
    if let Some(code) = code {
        form.set_code(code).await;
    }

    match form.submit().await {
        SubmitOutcome::Created(link) => {
            print_toast(dashboard.notifier().current().await);
            println!();
            println!("  Short URL: {}", dashboard.short_url(&link.code).to_string().bright_yellow().bold());
            println!("  Target:    {}", link.target_url.cyan());
            println!();
            Ok(())
        }
        SubmitOutcome::Conflict | SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) => {
            let message = form.state().await.error.unwrap_or_default();
            println!("{}", format!("❌ {message}").red());
            anyhow::bail!("Link was not created")
        }
        SubmitOutcome::Ignored => Ok(()),
    }
}

async fn delete_link(
    repository: Arc<HttpLinkRepository>,
    config: &Config,
    code: String,
    skip_confirm: bool,
) -> Result<()> {
    let dashboard = dashboard(repository, config);
    let deletion = dashboard.deletion();

    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    deletion.request(code.clone()).await;

    if !skip_confirm {
        let prompt = deletion
            .pending()
            .await
            .map(|p| p.prompt())
            .unwrap_or_default();

        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            deletion.cancel().await;
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let outcome = deletion.confirm(&code).await;
    print_toast(dashboard.notifier().current().await);

    match outcome {
        ConfirmOutcome::Failed(reason) => anyhow::bail!("Delete failed: {reason}"),
        _ => Ok(()),
    }
}

async fn show_stats(repository: Arc<HttpLinkRepository>, config: &Config, code: &str) -> Result<()> {
    let service = StatsService::new(repository, config.app_url.clone());

    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();

    let stats = match service.load(code).await.context("Failed to load statistics")? {
        StatsOutcome::Loaded(stats) => stats,
        StatsOutcome::NotFound => {
            println!("  {}", format!("Link \"{code}\" not found").yellow());
            println!();
            return Ok(());
        }
    };

    println!("  Short URL:    {}", stats.short_url.to_string().bright_yellow().bold());
    println!("  Target:       {}", stats.display_target().cyan());
    println!("  Total clicks: {}", stats.link.total_clicks.to_string().bright_white().bold());
    println!("  Created:      {}", stats.created());
    println!(
        "  Last click:   {} {}",
        stats.last_clicked(),
        format!("({})", stats.last_clicked_relative(Utc::now())).bright_black()
    );
    println!();

    Ok(())
}

/// Hands resolved links off by printing where the browser would go.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, target: &Url) {
        println!("  → {}", target.to_string().bright_yellow().bold());
    }
}

async fn open_link(repository: Arc<HttpLinkRepository>, config: &Config, code: &str) -> Result<()> {
    let resolver = RedirectResolver::new(
        repository,
        Arc::new(StdoutNavigator),
        config.redirect_base().clone(),
    )
    .with_grace_delay(config.redirect_delay());

    let resolution = resolver.resolve(code).await;

    match resolution.state().clone() {
        ResolveState::Resolving => {}
        ResolveState::Redirecting { .. } => {
            println!("{}", "Redirecting...".green());
            resolution.wait().await;
        }
        ResolveState::NotFound | ResolveState::Failed { .. } => {
            println!("{}", "Link not found".red().bold());
            println!(
                "  {}",
                "The short link you're looking for doesn't exist or has been removed.".bright_black()
            );
            for action in NOT_FOUND_ACTIONS {
                println!("  • {}", action.label());
            }
            println!();
        }
    }

    Ok(())
}
