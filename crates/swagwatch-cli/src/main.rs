mod cycle;
mod preview;
mod scheduler;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use swagwatch_core::{AppConfig, HttpSettings};
use swagwatch_notify::{render_email, DeliveryStatus, Notifier, SendGridClient};
use swagwatch_scraper::{PageScraper, PageSource};
use tracing_subscriber::EnvFilter;

use crate::cycle::{handle_invocation, LivePipeline};

#[derive(Debug, Parser)]
#[command(name = "swagwatch")]
#[command(about = "Watches for new swag code announcements and emails the code")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one fetch-to-notify cycle and print the invocation status (default)
    Run,
    /// Run a cycle on every tick of `SWAGWATCH_SCHEDULE` until interrupted
    Watch,
    /// Scrape one companion page and print its swag code as JSON
    Scrape {
        /// Companion page URL
        url: String,
    },
    /// Render the notification email with sample data
    Preview {
        /// Render a link-style code pointing at this URL
        #[arg(long, conflicts_with = "code")]
        link: Option<String>,
        /// Render this literal code
        #[arg(long)]
        code: Option<String>,
        /// Reward amount in SB
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        amount: u32,
        /// Also send the rendered email to the configured recipient
        #[arg(long)]
        send: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Credentials are only loaded by the commands that talk to the feed or
    // email APIs.
    let settings = swagwatch_core::load_http_settings()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        None | Some(Commands::Run) => run_once(&swagwatch_core::load_app_config()?).await,
        Some(Commands::Watch) => watch(&swagwatch_core::load_app_config()?).await,
        Some(Commands::Scrape { url }) => scrape(&settings, &url).await,
        Some(Commands::Preview {
            link,
            code,
            amount,
            send,
        }) => preview_email(link.as_deref(), code.as_deref(), amount, send).await,
    }
}

async fn run_once(config: &AppConfig) -> anyhow::Result<()> {
    let pipeline = LivePipeline::from_config(config)?;
    let status = handle_invocation(&pipeline).await;
    println!("{}", serde_json::to_string(&status)?);
    Ok(())
}

async fn watch(config: &AppConfig) -> anyhow::Result<()> {
    let pipeline = Arc::new(LivePipeline::from_config(config)?);
    let mut scheduler = scheduler::build_scheduler(pipeline, &config.schedule)
        .await
        .with_context(|| format!("failed to schedule '{}'", config.schedule))?;

    shutdown_signal().await?;
    scheduler.shutdown().await?;
    Ok(())
}

async fn scrape(settings: &HttpSettings, url: &str) -> anyhow::Result<()> {
    let scraper = PageScraper::new(settings.request_timeout_secs, &settings.user_agent)?;
    let code = scraper
        .fetch_swag_code(url)
        .await
        .with_context(|| format!("failed to scrape {url}"))?;
    println!("{}", serde_json::to_string_pretty(&code)?);
    Ok(())
}

async fn preview_email(
    link: Option<&str>,
    code: Option<&str>,
    amount: u32,
    send: bool,
) -> anyhow::Result<()> {
    let payload = preview::sample_payload(link, code, amount, chrono::Utc::now());
    println!("{}", render_email(&payload));

    if send {
        let config = swagwatch_core::load_app_config()?;
        let notifier = Notifier::from_config(SendGridClient::from_config(&config)?, &config);
        if notifier.notify(&payload).await == DeliveryStatus::Failed {
            anyhow::bail!("preview email was not delivered; see log for the provider error");
        }
        tracing::info!(to = %config.recipient_email, "preview email sent");
    }
    Ok(())
}

async fn shutdown_signal() -> std::io::Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?
            .recv()
            .await;
        Ok::<(), std::io::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<std::io::Result<()>>();

    let result = tokio::select! {
        r = ctrl_c => r,
        r = terminate => r,
    };

    tracing::info!("received shutdown signal, stopping scheduler");
    result
}
