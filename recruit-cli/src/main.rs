//! Recruit CLI - candidate search from the command line

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use recruit::mcp::{http, McpServer};
use recruit::scraper::ApifyClient;
use recruit::{
    CandidateQuery, CandidateSearch, CandidateSource, CandidateStore, Config, WidgetRegistry,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "recruit")]
#[command(author, version, about = "Recruit - candidate search for recruiting pipelines")]
#[command(propagate_version = true)]
struct Cli {
    /// YAML configuration file
    #[arg(long, short = 'c', env = "RECRUIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// JSON file with the existing candidate pipeline
    #[arg(long, env = "RECRUIT_CANDIDATES", global = true)]
    candidates: Option<PathBuf>,

    /// Directory of widget templates (*.html)
    #[arg(long, env = "RECRUIT_ASSETS_DIR", global = true)]
    assets_dir: Option<PathBuf>,

    /// Apify API token
    #[arg(long, env = "APIFY_TOKEN", hide_env_values = true, global = true)]
    apify_token: Option<String>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for candidates (new prospects by default)
    Search {
        #[command(flatten)]
        filters: SearchFilters,

        /// List the existing pipeline instead of searching for new prospects
        #[arg(long)]
        existing: bool,

        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// List bundled widget resources
    Widgets {
        /// Output format (text, json)
        #[arg(long, short = 'o', default_value = "text")]
        format: String,
    },

    /// Print a widget's HTML
    Widget {
        /// Resource URI (e.g. ui://widget/recruiting.html)
        uri: String,
    },

    /// Start the MCP server
    Serve {
        /// HTTP listen address
        #[arg(long, short = 'b', env = "RECRUIT_BIND")]
        bind: Option<String>,

        /// Serve over stdio instead of HTTP
        #[arg(long)]
        stdio: bool,
    },
}

/// Lead search filters, named after the tool arguments
#[derive(ClapArgs, Debug, Default)]
struct SearchFilters {
    /// Job title (repeatable)
    #[arg(long = "title")]
    person_title: Vec<String>,

    /// Seniority: C-Suite, VP, Director, Manager, Senior, Entry (repeatable)
    #[arg(long)]
    seniority: Vec<String>,

    /// Functional area, e.g. Engineering (repeatable)
    #[arg(long)]
    functional: Vec<String>,

    /// Person country (repeatable)
    #[arg(long = "country")]
    person_country: Vec<String>,

    /// Person state (repeatable)
    #[arg(long = "state")]
    person_state: Vec<String>,

    /// Person city (repeatable)
    #[arg(long = "city")]
    person_city: Vec<String>,

    /// Company keyword (repeatable)
    #[arg(long = "company-keyword")]
    company_keyword: Vec<String>,

    /// Company industry (repeatable)
    #[arg(long = "industry")]
    company_industry: Vec<String>,

    /// Company employee size, e.g. "51 - 200" (repeatable)
    #[arg(long = "employees")]
    company_employee_size: Vec<String>,

    /// Company domain (repeatable)
    #[arg(long = "domain")]
    company_domain: Vec<String>,

    /// Company country (repeatable)
    #[arg(long = "company-country")]
    company_country: Vec<String>,

    /// Company state (repeatable)
    #[arg(long = "company-state")]
    company_state: Vec<String>,

    /// Company city (repeatable)
    #[arg(long = "company-city")]
    company_city: Vec<String>,

    /// Email status: Verified, Unverified (repeatable)
    #[arg(long = "email-status")]
    contact_email_status: Vec<String>,

    /// Only leads with an email address
    #[arg(long)]
    has_email: bool,

    /// Only leads with a phone number
    #[arg(long)]
    has_phone: bool,

    /// Maximum number of results (1-50000)
    #[arg(long, short = 'n')]
    total: Option<u64>,
}

impl SearchFilters {
    /// Build tool arguments, leaving out every filter that was not given
    fn to_arguments(&self, existing: bool) -> Value {
        let mut args = Map::new();

        let lists = [
            ("personTitle", &self.person_title),
            ("seniority", &self.seniority),
            ("functional", &self.functional),
            ("personCountry", &self.person_country),
            ("personState", &self.person_state),
            ("personCity", &self.person_city),
            ("companyKeyword", &self.company_keyword),
            ("companyIndustry", &self.company_industry),
            ("companyEmployeeSize", &self.company_employee_size),
            ("companyDomain", &self.company_domain),
            ("companyCountry", &self.company_country),
            ("companyState", &self.company_state),
            ("companyCity", &self.company_city),
            ("contactEmailStatus", &self.contact_email_status),
        ];
        for (key, values) in lists {
            if !values.is_empty() {
                args.insert(key.to_string(), Value::from(values.clone()));
            }
        }

        if self.has_email {
            args.insert("hasEmail".to_string(), Value::Bool(true));
        }
        if self.has_phone {
            args.insert("hasPhone".to_string(), Value::Bool(true));
        }
        if let Some(total) = self.total {
            args.insert("totalResults".to_string(), Value::from(total));
        }
        if existing {
            args.insert("useExistingCandidates".to_string(), Value::Bool(true));
        }

        Value::Object(args)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchReport<'a> {
    source: CandidateSource,
    count: usize,
    candidates: &'a [Value],
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Search {
            filters,
            existing,
            format,
        } => cmd_search(&config, &filters, existing, &format).await,
        Commands::Widgets { format } => cmd_widgets(&config, &format),
        Commands::Widget { uri } => cmd_widget(&config, &uri),
        Commands::Serve { bind, stdio } => cmd_serve(config, bind.as_deref(), stdio).await,
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    if let Some(path) = &cli.candidates {
        config.candidates_path = path.clone();
    }
    if let Some(dir) = &cli.assets_dir {
        config.assets_dir = dir.clone();
    }
    if let Some(token) = &cli.apify_token {
        config.apify.token = Some(token.clone());
    }

    config.validate()?;
    Ok(config)
}

async fn cmd_search(
    config: &Config,
    filters: &SearchFilters,
    existing: bool,
    format: &str,
) -> Result<()> {
    let arguments = filters.to_arguments(existing);
    tracing::debug!("search arguments: {}", arguments);
    let query = CandidateQuery::from_arguments(&arguments)?;

    let client = ApifyClient::new(config.apify.clone())?;
    let search = CandidateSearch::new(
        CandidateStore::new(&config.candidates_path),
        Arc::new(client),
    );

    let outcome = search.run(&query).await?;

    if format == "json" {
        let report = SearchReport {
            source: outcome.source,
            count: outcome.candidates.len(),
            candidates: &outcome.candidates,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}\n", outcome.summary());
    if outcome.candidates.is_empty() {
        return Ok(());
    }
    print_table(&outcome.candidates);
    Ok(())
}

/// Table cell for `key`; missing fields render empty
fn cell(candidate: &Value, key: &str) -> String {
    match candidate.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Print candidates as an aligned table
fn print_table(candidates: &[Value]) {
    let headers = ["Name", "Title", "Email", "Stage", "Location", "Years"];
    let keys = ["name", "title", "email", "stage", "location", "yearsOfExperience"];
    let rows: Vec<[String; 6]> = candidates
        .iter()
        .map(|c| keys.map(|key| cell(c, key)))
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(&headers));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", render(&cells));
    }
}

fn cmd_widgets(config: &Config, format: &str) -> Result<()> {
    let registry = WidgetRegistry::load(&config.assets_dir)?;

    if format == "json" {
        let data: Vec<Value> = registry
            .iter()
            .map(|w| {
                serde_json::json!({
                    "uri": w.uri,
                    "name": w.display_name(),
                    "title": w.title,
                    "bytes": w.html.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!(
            "No widgets found in {}. Add *.html files to serve them.",
            config.assets_dir.display()
        );
        return Ok(());
    }

    println!("Widgets:");
    for widget in registry.iter() {
        println!("  {}  ({}, {} bytes)", widget.uri, widget.title, widget.html.len());
    }
    Ok(())
}

fn cmd_widget(config: &Config, uri: &str) -> Result<()> {
    let registry = WidgetRegistry::load(&config.assets_dir)?;
    let widget = registry.get(uri)?;
    print!("{}", widget.html);
    Ok(())
}

async fn cmd_serve(mut config: Config, bind: Option<&str>, stdio: bool) -> Result<()> {
    if let Some(bind) = bind {
        config.bind = Config::parse_bind(bind)?;
    }

    let server = Arc::new(McpServer::from_config(&config)?);
    if stdio {
        server.run_stdio().await?;
    } else {
        http::serve(server, config.bind).await?;
    }
    Ok(())
}
