use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "scopewise", version, about = "Scopewise CLI")]
struct Cli {
    /// Configuration file. Missing files fall back to the defaults.
    #[arg(
        long,
        global = true,
        env = "SCOPEWISE_CONFIG",
        default_value = "scopewise.yaml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a requirements record (YAML or JSON).
    Estimate {
        file: PathBuf,

        /// Also print every multiplier that went into the price
        #[arg(long, default_value_t = false)]
        explain: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Render the PDF requirements report for a record.
    Report {
        file: PathBuf,

        /// Output path. Defaults to `<company>-requirements-report.pdf`
        #[arg(long)]
        out: Option<PathBuf>,

        /// Date printed on the cover (YYYY-MM-DD). Defaults to today
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Print the email and social share texts for a record.
    Share {
        file: PathBuf,

        /// Recipient of the mailto link
        #[arg(long, default_value = "")]
        to: String,
    },

    /// Rank the partners in a YAML file against preferences.
    Partners {
        file: PathBuf,

        /// Wanted feature, e.g. lakehouse. Repeatable
        #[arg(long = "feature")]
        features: Vec<String>,

        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        language: Option<String>,
    },

    /// Start the HTTP API.
    Serve {
        /// Keep everything in memory instead of connecting to Postgres
        #[arg(long, default_value_t = false)]
        memory: bool,
    },

    /// Create the backend tables if they do not exist.
    InitDb,

    /// Validate the configuration file.
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Estimate {
            file,
            explain,
            format,
        } => {
            let config = commands::load_config(&cli.config)?;
            commands::estimate::run(&file, explain, format, &config)?
        }

        Command::Report { file, out, date } => {
            let config = commands::load_config(&cli.config)?;
            commands::report::run(&file, out.as_deref(), date, &config)?
        }

        Command::Share { file, to } => {
            let config = commands::load_config(&cli.config)?;
            commands::share::run(&file, &to, &config)?
        }

        Command::Partners {
            file,
            features,
            industry,
            language,
        } => commands::partners::run(&file, &features, industry, language).await?,

        Command::Serve { memory } => {
            let config = commands::load_config(&cli.config)?;
            commands::serve::run(config, memory).await?
        }

        Command::InitDb => {
            let config = commands::load_config(&cli.config)?;
            commands::db::init(&config).await?
        }

        Command::CheckConfig => commands::check::run(&cli.config)?,
    }

    Ok(())
}
