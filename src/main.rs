use anyhow::Context;
use clap::{Parser, Subcommand};
use repo_analyzer::{Analyzer, Config, DiffRequest, OllamaClient};
use std::path::PathBuf;
use std::sync::Arc;

/// One-shot repository analysis against a local model backend
#[derive(Parser)]
#[command(name = "repo-analyzer", version, about)]
struct Cli {
    /// Base URL of the Ollama-compatible backend
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name to request completions from
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone a repository, derive its health report, and print the analysis
    Analyze {
        /// URL of the repository to analyze
        repo_url: String,
    },
    /// Analyze a git diff against a prior project summary
    Diff {
        /// Path to a file containing the diff text
        #[arg(long)]
        file: PathBuf,
        /// Prior project summary the diff builds on
        #[arg(long, default_value = "")]
        previous_summary: String,
        /// Display name of the project
        #[arg(long, default_value = "Project")]
        title: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.model.base_url = base_url;
    }
    if let Some(model) = cli.model {
        config.model.model_name = model;
    }
    config.validate()?;

    let config = Arc::new(config);
    let gateway = Arc::new(OllamaClient::new(&config.model)?);
    let analyzer = Analyzer::new(gateway, config);

    let output = match cli.command {
        Commands::Analyze { repo_url } => {
            let analysis = analyzer.analyze_repository(&repo_url).await?;
            serde_json::to_string_pretty(&analysis)?
        }
        Commands::Diff {
            file,
            previous_summary,
            title,
        } => {
            let diff = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read diff file {}", file.display()))?;
            let request = DiffRequest {
                diff,
                previous_summary,
                project_title: title,
            };
            let result = analyzer.analyze_diff(&request).await?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{}", output);
    Ok(())
}
