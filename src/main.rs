//! oauthpost - publish to the Twitter/X v2 API with OAuth 1.0a user credentials

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use oauthpost::config::Config;
use oauthpost::error::{ConfigError, PublishError};
use oauthpost::logging::{LogFormat, LoggingConfig};
use oauthpost::publisher::{Announcement, Article, Publisher};
use oauthpost::ReqwestTransport;

#[derive(Parser, Debug)]
#[command(name = "oauthpost", version)]
#[command(about = "Publish posts with OAuth 1.0a signed requests", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "OAUTHPOST_CONFIG", default_value = "oauthpost.toml")]
    config: PathBuf,

    /// Log output format (text, json or pretty)
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the credentials without posting
    Verify,

    /// Post the given text (cut to 280 characters)
    Post { text: String },

    /// Send a timestamped test post
    TestPost,

    /// Announce a published article using the configured format
    Announce {
        #[arg(long)]
        id: u64,

        #[arg(long)]
        title: String,

        #[arg(long)]
        url: String,

        /// Article body; HTML is stripped for {excerpt}
        #[arg(long, default_value = "")]
        content: String,

        /// Print the composed text instead of posting it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let logging = LoggingConfig::new(cli.log_format, cli.log_level.clone(), cli.verbose);
    if let Err(e) = logging.init() {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ConfigError>().is_some() {
        3
    } else if let Some(e) = error.downcast_ref::<PublishError>() {
        e.exit_code()
    } else {
        1
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from_path(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let publisher = Publisher::new(config.api_client(transport), config.publish.clone());

    match cli.command {
        Command::Verify => {
            let username = publisher.test_connection()?;
            println!("Connected as @{}", username);
        }
        Command::Post { text } => {
            let created = publisher.post_text(&text)?;
            println!("{}", created.id);
        }
        Command::TestPost => {
            let created = publisher.send_test_post()?;
            println!("Test post sent: {}", created.id);
        }
        Command::Announce {
            id,
            title,
            url,
            content,
            dry_run,
        } => {
            let mut article = Article::new(id, title, url).with_content(content);
            article.publish();
            if dry_run {
                println!("{}", publisher.compose(&article));
                return Ok(());
            }
            match publisher.announce(&mut article)? {
                Announcement::Posted { id: Some(id) } => println!("{}", id),
                Announcement::Posted { id: None } => println!("Posted"),
                Announcement::Skipped(reason) => println!("Skipped: {}", reason),
            }
        }
    }
    Ok(())
}
