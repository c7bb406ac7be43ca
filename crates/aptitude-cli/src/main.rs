//! aptitude CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "aptitude",
    version,
    about = "Self-assessment questionnaire with scored certificates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the questionnaire interactively
    Take {
        /// Question bank TOML file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output directory for results and certificate
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip writing the PDF certificate
        #[arg(long)]
        no_certificate: bool,

        /// Also write an HTML results page
        #[arg(long)]
        html: bool,
    },

    /// Score a saved answer sheet
    Score {
        /// Answer sheet JSON (object keyed by question position)
        #[arg(long)]
        answers: PathBuf,

        /// Question bank TOML file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Rescale each category to the 0-5 display range
        #[arg(long)]
        scaled: bool,
    },

    /// Render a PDF certificate
    Certificate {
        /// Name printed on the certificate
        #[arg(long)]
        name: Option<String>,

        /// Score map JSON
        #[arg(long, conflicts_with = "report", required_unless_present = "report")]
        scores: Option<PathBuf>,

        /// Saved result report JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("aptitude=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            bank,
            output,
            config,
            no_certificate,
            html,
        } => commands::take::execute(bank, output, config, !no_certificate, html),
        Commands::Score {
            answers,
            bank,
            format,
            scaled,
        } => commands::score::execute(answers, bank, format, scaled),
        Commands::Certificate {
            name,
            scores,
            report,
            output,
        } => commands::certificate::execute(name, scores, report, output),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
