use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitmetrics::{AnalyticsPipeline, Config, GitHubClient, JsonStore, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "gitmetrics")]
#[command(version = "0.1.0")]
#[command(about = "Generate GitHub activity analytics for a profile dashboard")]
struct Args {
    /// GitHub username to analyze (prompted for when omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Personal access token (falls back to GITHUB_TOKEN, then a prompt)
    #[arg(short, long)]
    token: Option<String>,

    /// Output path for the analytics document
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum event feed pages to fetch
    #[arg(long)]
    max_event_pages: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitmetrics=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    println!("{}", "=".repeat(50));
    println!("GitHub Activity Analytics");
    println!("{}", "=".repeat(50));
    println!();

    let username = match args.username {
        Some(username) => username,
        None => prompt_username()?,
    };

    let token = match args.token.or_else(|| config.github_token.clone()) {
        Some(token) => Some(token),
        None => prompt_token()?,
    };

    let github = GitHubClient::new(token.as_deref())?;

    let mut pipeline_config = PipelineConfig::from(&config);
    if let Some(max_event_pages) = args.max_event_pages {
        pipeline_config.max_event_pages = max_event_pages;
    }

    let pipeline = AnalyticsPipeline::new(github, pipeline_config);

    tracing::info!("Starting analytics run for GitHub user: {}", username);
    match pipeline.run(&username).await {
        Ok(report) => {
            let output_path = args.output.unwrap_or(config.output_path);
            let store = JsonStore::new(&output_path);
            store.save_report(&report)?;

            println!();
            println!("✓ Success! Analytics written to {}", store.path().display());
            println!("  Open the dashboard to view the results.");
            Ok(())
        }
        Err(e) => {
            println!();
            println!("✗ Failed to fetch data: {}", e);
            println!("  Check the username and try again.");
            Err(e.into())
        }
    }
}

fn prompt_username() -> anyhow::Result<String> {
    loop {
        print!("Enter a GitHub username: ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let username = line.trim();
        if !username.is_empty() {
            return Ok(username.to_string());
        }
    }
}

fn prompt_token() -> anyhow::Result<Option<String>> {
    println!("Optional: enter a GitHub personal access token");
    println!("(raises the API rate limit from 60 to 5,000 requests/hour)");
    print!("Leave empty to skip: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let token = line.trim();

    Ok(if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    })
}
