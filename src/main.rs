use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use stego_scan_rs::logger;
use stego_scan_rs::server::{self, ServerConfig, DEFAULT_LISTEN_ADDR};
use stego_scan_rs::steganalysis::{
    render_json, render_text, write_text_report, BatchScanner, ScanConfig,
};

use tracing::info;

/// Flags images whose channel statistics suggest LSB steganography.
#[derive(Parser, Debug)]
#[command(name = "stego_scan_rs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze every image under a directory
    Scan {
        /// Directory containing images to analyze
        directory: PathBuf,

        /// Also write the text report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Rendering printed to stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only match lower-case extensions (skips PHOTO.JPG)
        #[arg(long)]
        case_sensitive: bool,

        /// Follow symbolic links while walking the directory
        #[arg(long)]
        follow_links: bool,
    },

    /// Run the HTTP upload endpoint
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        listen: SocketAddr,

        /// Parent directory for per-request scratch directories
        #[arg(long)]
        scratch_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn run_scan(
    directory: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: ScanConfig,
) -> anyhow::Result<()> {
    if !directory.is_dir() {
        bail!("{} is not a valid directory", directory.display());
    }

    let report = BatchScanner::new(config).scan(&directory);

    match format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    if let Some(output) = output {
        write_text_report(&report, &output)?;
        info!("Report written to {}", output.display());
    }

    Ok(())
}

fn run_serve(listen: SocketAddr, scratch_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::builder()
        .listen_addr(listen)
        .scratch_parent(scratch_dir)
        .build();

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(server::serve(config))
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            directory,
            output,
            format,
            case_sensitive,
            follow_links,
        } => {
            let config = ScanConfig::builder()
                .case_sensitive_extensions(case_sensitive)
                .follow_links(follow_links)
                .build();
            run_scan(directory, output, format, config)
        }
        Commands::Serve {
            listen,
            scratch_dir,
        } => run_serve(listen, scratch_dir),
    }
}
