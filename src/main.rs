// Strata CLI - analyze one file and print the result as JSON.
//
// Thin consumer of the library: flags become an AnalysisRequest, the engine
// does the work, serde_json renders the result. No formatting of its own.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use strata::manager;
use strata::model::AnalysisRequest;

#[derive(Parser)]
#[command(name = "strata", about = "Multi-language code structure analysis")]
struct Cli {
    /// File to analyze (absolute, or relative to --project-root)
    file: PathBuf,

    /// Language id override; detected from the file when omitted
    #[arg(long)]
    language: Option<String>,

    /// Project root every analyzed path must resolve within
    #[arg(long)]
    project_root: Option<String>,

    /// Named query to run against the parse tree (repeatable)
    #[arg(long = "query")]
    queries: Vec<String>,

    /// Annotate functions with a branch-count complexity score
    #[arg(long)]
    complexity: bool,

    /// Trim element raw text to its first line
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("strata=info"))
        .expect("default env filter");
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut request = AnalysisRequest::new(cli.file)
        .with_complexity(cli.complexity)
        .with_details(!cli.summary)
        .with_queries(cli.queries);
    if let Some(language) = cli.language {
        request = request.with_language(language);
    }

    let engine = manager::get_instance(cli.project_root.as_deref());
    let result = engine.analyze(request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
