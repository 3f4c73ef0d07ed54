use anyhow::Context;
use clap::{Parser, Subcommand};
use intake_server::search::{load_corpus, FaqSearchConfig, FaqSearchService};
use reqwest::{Client, Url};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "intake-cli")]
#[command(about = "Intake server CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "INTAKE_ENDPOINT", default_value = "http://localhost:5000")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,

    /// Submit the contact form
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        subject: String,

        #[arg(short, long)]
        message: String,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        urgency: Option<String>,
    },

    /// Submit a service request
    Service {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Requested service, e.g. web-development
        #[arg(short, long)]
        service: String,

        #[arg(short = 'd', long)]
        project_details: String,

        #[arg(short, long)]
        company: Option<String>,

        #[arg(short, long)]
        budget: Option<String>,

        #[arg(short, long)]
        timeline: Option<String>,
    },

    /// Submit an internship application
    Training {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: String,

        #[arg(short, long)]
        area: String,

        #[arg(short, long)]
        skills: String,

        #[arg(short, long)]
        duration: String,

        #[arg(short, long)]
        motivation: String,

        #[arg(long)]
        college: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        start_date: Option<String>,
    },

    /// List all stored submissions
    Submissions,

    /// Show store-wide statistics
    Stats,

    /// FAQ search commands
    Faq {
        #[command(subcommand)]
        command: FaqCommands,
    },
}

#[derive(Subcommand)]
enum FaqCommands {
    /// Search the FAQ
    Search {
        #[arg(value_name = "QUERY")]
        query: String,

        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        #[arg(short, long)]
        threshold: Option<f64>,

        /// Search a local corpus file instead of the server
        #[arg(short, long, value_name = "FILE")]
        corpus: Option<PathBuf>,
    },

    /// List every FAQ record
    All,

    /// List FAQ records in a category
    Category {
        #[arg(value_name = "CATEGORY")]
        name: String,
    },

    /// List FAQ categories
    Categories,

    /// Reload the FAQ corpus on the server
    Reload,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    let body: serde_json::Value = match cli.command {
        Commands::Health => {
            client
                .get(format!("{}/api/health", cli.endpoint))
                .send()
                .await?
                .json()
                .await?
        }

        Commands::Contact {
            name,
            email,
            subject,
            message,
            phone,
            urgency,
        } => {
            client
                .post(format!("{}/api/contact", cli.endpoint))
                .json(&json!({
                    "name": name,
                    "email": email,
                    "subject": subject,
                    "message": message,
                    "phone": phone,
                    "urgency": urgency,
                }))
                .send()
                .await?
                .json()
                .await?
        }

        Commands::Service {
            name,
            email,
            service,
            project_details,
            company,
            budget,
            timeline,
        } => {
            client
                .post(format!("{}/api/services", cli.endpoint))
                .json(&json!({
                    "name": name,
                    "email": email,
                    "service": service,
                    "project-details": project_details,
                    "company": company,
                    "budget": budget,
                    "timeline": timeline,
                }))
                .send()
                .await?
                .json()
                .await?
        }

        Commands::Training {
            name,
            email,
            phone,
            area,
            skills,
            duration,
            motivation,
            college,
            year,
            start_date,
        } => {
            client
                .post(format!("{}/api/training", cli.endpoint))
                .json(&json!({
                    "name": name,
                    "email": email,
                    "phone": phone,
                    "area": area,
                    "skills": skills,
                    "duration": duration,
                    "motivation": motivation,
                    "college": college,
                    "year": year,
                    "start-date": start_date,
                }))
                .send()
                .await?
                .json()
                .await?
        }

        Commands::Submissions => {
            client
                .get(format!("{}/api/submissions", cli.endpoint))
                .send()
                .await?
                .json()
                .await?
        }

        Commands::Stats => {
            client
                .get(format!("{}/api/stats", cli.endpoint))
                .send()
                .await?
                .json()
                .await?
        }

        Commands::Faq { command } => faq_command(&client, &cli.endpoint, command).await?,
    };

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn faq_command(
    client: &Client,
    endpoint: &str,
    command: FaqCommands,
) -> anyhow::Result<serde_json::Value> {
    let body = match command {
        FaqCommands::Search {
            query,
            top_k,
            threshold,
            corpus: Some(path),
        } => {
            let records = load_corpus(&path)
                .await
                .with_context(|| format!("failed to load FAQ corpus from {}", path.display()))?;
            let service = FaqSearchService::from_records(records, FaqSearchConfig::default());
            let results = service.search(&query, top_k, threshold);
            json!({
                "query": query,
                "results": results,
                "total_results": results.len(),
            })
        }

        FaqCommands::Search {
            query,
            top_k,
            threshold,
            corpus: None,
        } => {
            client
                .post(format!("{}/api/faq/search", endpoint))
                .json(&json!({
                    "query": query,
                    "top_k": top_k,
                    "threshold": threshold,
                }))
                .send()
                .await?
                .json()
                .await?
        }

        FaqCommands::All => {
            client
                .get(format!("{}/api/faq/all", endpoint))
                .send()
                .await?
                .json()
                .await?
        }

        FaqCommands::Category { name } => {
            client
                .get(category_url(endpoint, &name)?)
                .send()
                .await?
                .json()
                .await?
        }

        FaqCommands::Categories => {
            client
                .get(format!("{}/api/faq/categories", endpoint))
                .send()
                .await?
                .json()
                .await?
        }

        FaqCommands::Reload => {
            client
                .post(format!("{}/api/faq/reload", endpoint))
                .send()
                .await?
                .json()
                .await?
        }
    };

    Ok(body)
}

/// Category names go into one percent-encoded path segment
fn category_url(endpoint: &str, name: &str) -> anyhow::Result<Url> {
    let mut url =
        Url::parse(endpoint).with_context(|| format!("invalid endpoint URL: {}", endpoint))?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("endpoint cannot be a base URL: {}", endpoint))?
        .pop_if_empty()
        .extend(["api", "faq", "category", name]);
    Ok(url)
}
