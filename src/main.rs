//! Crunch CLI - Document summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use notes_crunch::document::format_size;
use notes_crunch::{
    logging, ui, Config, Controller, Document, FileExporter, HttpService, SummaryStyle,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crunch")]
#[command(author, version, about = "TUI for summarising documents into notes and quizzes", long_about = None)]
struct Cli {
    /// Path to crunch.toml (defaults to ./crunch.toml, then ~/.config/crunch/crunch.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a document without the TUI
    Summarise {
        /// Document to upload
        file: PathBuf,
        /// Summary style
        #[arg(long, value_enum, default_value_t = SummaryStyle::Normal)]
        style: SummaryStyle,
        /// Also print the quiz
        #[arg(long)]
        quiz: bool,
        /// Save the summary as summary.txt in the export directory
        #[arg(long)]
        export: bool,
        /// Override the export directory
        #[arg(long, requires = "export")]
        out_dir: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Summarise {
            file,
            style,
            quiz,
            export,
            out_dir,
        }) => {
            logging::init_stderr();
            let config = load_config(cli.config.as_ref())?;
            let service = HttpService::new(config.service.clone())?;

            let document = Document::from_path(&file)?;
            println!(
                "Summarising {} ({}) as {}...\n",
                document.name(),
                format_size(document.size()),
                style
            );

            let mut controller = Controller::new();
            controller.select_document(document);
            controller.select_style(style);
            controller.submit(&service).await;

            if let Some(error) = controller.last_error() {
                eprintln!("{} {}", "Error:".red().bold(), error);
                bail!("summarisation failed");
            }

            if let Some(summary) = controller.summary_text() {
                println!("{}\n", "=== Summary ===".bold());
                println!("{}\n", summary);
            }

            if quiz {
                controller.toggle_view();
                if let Some(text) = controller.displayed_text() {
                    println!("{}\n", "=== Quiz ===".bold());
                    println!("{}\n", text);
                }
            }

            if export {
                let dir = out_dir.unwrap_or_else(|| config.export.dir.clone());
                if let Some(artifact) = controller.export_summary() {
                    let path = FileExporter::new(&dir).save(&artifact)?;
                    println!("{} {}", "Saved".green(), path.display());
                }
            }
        }
        Some(Commands::Config) => {
            let config = load_config(cli.config.as_ref())?;
            print!("{}", config.to_toml()?);
        }
        None => {
            // Default: Launch the TUI
            let config = load_config(cli.config.as_ref())?;
            logging::init_file(&config.log.resolved_path());
            ui::run(&config).await?;
        }
    }

    Ok(())
}
