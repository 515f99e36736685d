// hedgertronic entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, not terminal)
// 4. Run the subcommand: build the page, or process a stats export

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use hedgertronic_core::config::{self, LoggingConfig};
use hedgertronic_core::source::DataSource;
use hedgertronic_site::page;
use hedgertronic_site::sections::RenderOptions;
use hedgertronic_stats::category::Category;
use hedgertronic_stats::ingest;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "hedgertronic")]
#[command(about = "Build the hedgertronic site from its content files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the site to a single HTML page
    Build {
        /// Stats category selected on load (College, Summer, Independent, Minors)
        #[arg(long)]
        category: Option<String>,

        /// Output HTML path (overrides output.path)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Convert a per-team pitching export into the career stats table
    ProcessStats {
        /// Input CSV export path
        #[arg(long)]
        input: PathBuf,

        /// Output stats table path
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse the command line
    let cli = Cli::parse();

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(&config.logging)?;
    info!("hedgertronic starting up");

    // 4. Run the subcommand
    let result = match cli.command {
        Commands::Build { category, output } => build(&config, category, output).await,
        Commands::ProcessStats { input, output } => process_stats(&input, &output),
    };
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn build(
    config: &config::Config,
    category: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let category: Category = category
        .as_deref()
        .unwrap_or(&config.output.default_category)
        .parse()
        .context("invalid stats category")?;
    let output = output.unwrap_or_else(|| PathBuf::from(&config.output.path));

    let cwd = std::env::current_dir()?;
    let source = DataSource::from_config(&config.source, &cwd)
        .context("failed to set up data source")?;
    info!("Reading content from {}", source.location(""));

    let options = RenderOptions {
        category,
        today: chrono::Local::now().date_naive(),
    };
    let html = page::build_page(&source, &config.site_config, &options).await?;

    write_output(&output, &html)?;
    info!("Wrote {} ({} bytes)", output.display(), html.len());
    println!("Wrote {}", output.display());
    Ok(())
}

fn process_stats(input: &Path, output: &Path) -> anyhow::Result<()> {
    let summary = ingest::process_file(input, output)
        .with_context(|| format!("failed to process {}", input.display()))?;
    println!(
        "Wrote {} rows from {} team seasons to {}",
        summary.table_rows,
        summary.team_lines,
        output.display()
    );
    Ok(())
}

fn write_output(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(&logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("hedgertronic.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
