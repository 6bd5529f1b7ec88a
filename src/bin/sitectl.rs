//! Operator CLI for tr1p-site.
//!
//! Inspects the host table, checks Markdown content and runs one-off image
//! generations without starting the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Show which hostnames every site answers to
//! cargo run --bin sitectl -- hosts
//!
//! # Show the site and layout a Host header resolves to
//! cargo run --bin sitectl -- resolve gameraven.local:3000
//!
//! # Check post front matter before deploying
//! cargo run --bin sitectl -- content check
//!
//! # Generate one image (test mode needs no API key)
//! cargo run --bin sitectl -- generate "a lighthouse at dusk" --test
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (see `config.rs`), e.g.
//! `SITE_ENV`, `CONTENT_DIR`, `OPENAI_API_KEY`.

use tr1p_site::application::services::{
    ContentService, HostResolver, ImageGenerationService, ImageSettings, LayoutSelector,
};
use tr1p_site::config::{self, Config};
use tr1p_site::domain::entities::{Environment, route_content};
use tr1p_site::infrastructure::content::FsPostRepository;
use tr1p_site::infrastructure::openai::OpenAiImageProvider;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for operating tr1p-site.
#[derive(Parser)]
#[command(name = "sitectl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// List the host table for every environment
    Hosts,

    /// Resolve a Host header value to a site and layout
    Resolve {
        /// Host header value, port optional
        host: String,
    },

    /// Markdown content tools
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Generate a single image
    Generate {
        /// Prompt text
        prompt: String,

        /// Use the sample images instead of calling the provider
        #[arg(short, long)]
        test: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Content subcommands.
#[derive(Subcommand)]
enum ContentAction {
    /// Check every post's date and list the posts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let resolver = Arc::new(HostResolver::builtin().context("Invalid host table")?);

    match cli.command {
        Commands::Hosts => handle_hosts(&resolver, config.site_env),
        Commands::Resolve { host } => handle_resolve(resolver, &host),
        Commands::Content { action } => match action {
            ContentAction::Check => handle_content_check(&config).await?,
        },
        Commands::Generate { prompt, test, yes } => {
            handle_generate(&config, &prompt, test, yes).await?
        }
    }

    Ok(())
}

/// Prints the host table, marking the environment this deployment runs in.
///
/// # Output Format
///
/// ```text
/// Host table
///
///   Site             local                dev                  prod
///   tr1p.io          tr1p.local           tr1p.local           tr1p.io
/// ```
fn handle_hosts(resolver: &HostResolver, current: Environment) {
    println!("{}", "Host table".bright_blue().bold());
    println!();

    print!("  {:<16}", "Site".bright_white().bold());
    for env in Environment::ALL {
        let label = if env == current {
            format!("{}*", env)
        } else {
            env.to_string()
        };
        print!(" {:<20}", label.bright_white().bold());
    }
    println!();
    println!("  {}", "─".repeat(80).bright_black());

    for descriptor in resolver.descriptors() {
        let name = if descriptor.site == resolver.default_site() {
            format!("{} (default)", descriptor.canonical_name)
        } else {
            descriptor.canonical_name.clone()
        };
        print!("  {:<16}", name.cyan());
        for env in Environment::ALL {
            print!(" {:<20}", descriptor.hosts.for_env(env));
        }
        println!();
    }

    println!();
    println!(
        "  Distinct hostnames: {}",
        resolver.host_count().to_string().bright_white().bold()
    );
    println!("  {} marks SITE_ENV", "*".bright_white());
    println!();
}

/// Shows the site and layout for a host, and whether `/` renders its slot.
fn handle_resolve(resolver: Arc<HostResolver>, host: &str) {
    let site = resolver.resolve(host);
    let selector = LayoutSelector::new(resolver);
    let decision = selector.select(site, &route_content::HOME);

    println!("{}", "Host resolution".bright_blue().bold());
    println!();
    println!("  Host:     {}", host.cyan());
    println!("  Site:     {}", site.to_string().bright_white().bold());
    println!("  Renders:  {}", decision.site);
    println!("  Layout:   {:?}", decision.layout);
    println!(
        "  Slot:     {}",
        match decision.slot {
            Some(slot) => format!("{:?}", slot).green(),
            None => "none".yellow(),
        }
    );
    println!(
        "  Home:     {}",
        if decision.slot.is_some() {
            "site slot".green()
        } else {
            "default page".yellow()
        }
    );
    println!();
}

/// Checks post dates. Exits non-zero if any post would fail to render.
async fn handle_content_check(config: &Config) -> Result<()> {
    println!("{}", "Content check".bright_blue().bold());
    println!("  Directory: {}", config.content_dir.display());
    println!();

    let service = ContentService::new(Arc::new(FsPostRepository::new(
        config.content_dir.clone(),
    )));

    let issues = service
        .check_posts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read content: {}", e))?;

    let posts = service
        .list_posts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read content: {}", e))?;

    if posts.is_empty() {
        println!("{}", "  No posts found".yellow());
        println!();
        return Ok(());
    }

    for post in &posts {
        let status = if issues.iter().any(|i| i.post_id == post.id) {
            "INVALID".red()
        } else {
            "OK".green()
        };
        println!(
            "  {:<30} {:<24} {}",
            post.id.cyan(),
            post.meta.date.bright_black(),
            status
        );
    }

    println!();

    if issues.is_empty() {
        println!("{}", "✅ All posts have valid dates".green().bold());
        println!();
        return Ok(());
    }

    for issue in &issues {
        println!("  {} {}: {}", "✗".red(), issue.post_id, issue.error);
    }
    println!();

    anyhow::bail!("{} post(s) have invalid dates", issues.len())
}

/// Runs one generation. Live calls ask for confirmation unless `--yes`.
async fn handle_generate(config: &Config, prompt: &str, test: bool, yes: bool) -> Result<()> {
    println!("{}", "Generate image".bright_blue().bold());
    println!();
    println!("  Prompt: {}", prompt.cyan());
    println!(
        "  Mode:   {}",
        if test { "test".yellow() } else { "live".green() }
    );
    println!();

    let provider = OpenAiImageProvider::new(
        &config.openai_base_url,
        config.openai_api_key.clone(),
        config.provider_timeout(),
    )
    .context("Failed to build image provider")?;

    let service = ImageGenerationService::new(
        Arc::new(provider),
        ImageSettings {
            model: config.image_model.clone(),
            size: config.image_size.clone(),
            test_delay: config.test_image_delay(),
            allow_credential_override: false,
        },
    );

    if !test {
        if !service.live_ready() {
            anyhow::bail!("OPENAI_API_KEY must be set for live generation");
        }

        if !yes {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Call {} with model {}?",
                    config.openai_base_url, config.image_model
                ))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }
        }
    }

    let result = service.generate(prompt, test, None).await;

    if result.success {
        println!("{}", "✅ Image generated".green().bold());
        println!("  URL: {}", result.url.bright_yellow());
        println!();
        Ok(())
    } else {
        anyhow::bail!(result.message)
    }
}
