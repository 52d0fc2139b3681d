// Main entry point
mod interfaces;

use clap::Parser;
use colored::Colorize;
use interfaces::cli::Cli;
use wolfram::application::answer::first_answer;
use wolfram::infrastructure::config::{generate_config_sample, load_config, Logging};
use wolfram::presentation::{format::format_result, theme::Theme};
use wolfram::WolframClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        generate_config_sample()?;
        return Ok(());
    }

    if cli.query.is_empty() {
        eprintln!("{}", "Please provide a query".red());
        std::process::exit(1);
    }

    if let Some(app_id) = cli.app_id.clone() {
        config.app_id = Some(app_id);
    }
    let client = match WolframClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            eprintln!("Set `app_id` in the config file or pass --app-id");
            std::process::exit(1);
        }
    };

    let query = cli.query.join(" ");

    // Stop waiting on Ctrl-C; dropping the request future cancels it
    tokio::select! {
        result = run(&cli, &client, &query, &config.theme) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted");
            Ok(())
        }
    }
}

async fn run(cli: &Cli, client: &WolframClient, query: &str, theme: &str) -> anyhow::Result<()> {
    let params: Vec<(&str, &str)> = cli
        .params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    if cli.raw {
        print!("{}", client.query_raw(query, &params).await?);
        return Ok(());
    }

    if cli.short && params.is_empty() {
        match first_answer(client, query).await? {
            Some(answer) => println!("{}", answer),
            None => eprintln!("{}", "No answer found".yellow()),
        }
        return Ok(());
    }

    let result = client.query(query, &params).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(result.tree())?);
    } else if cli.short {
        match result.answer() {
            Some(answer) => println!("{}", answer),
            None => eprintln!("{}", "No answer found".yellow()),
        }
    } else {
        let theme_name = cli.theme.as_deref().unwrap_or(theme);
        let theme = Theme::from_name(theme_name);
        print!("{}", format_result(query, &result, &theme));
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
