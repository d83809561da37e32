mod cli;
mod commands;
mod convert;
mod error;
mod export;
mod mcp;
mod page_range;
mod pdf;
mod selection;
mod session;
mod thumbnails;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::convert::ConverterOptions;
use crate::export::ExportOptions;

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // stdout carries command output and the MCP transport
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let converter = ConverterOptions {
        program: cli.soffice,
    };

    match cli.command {
        Commands::Mcp => {
            mcp::run_server(converter).await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path, &converter)?;
        }
        Commands::Select { path, pages } => {
            commands::select::run(&path, &pages, &converter)?;
        }
        Commands::Images {
            path,
            pages,
            output_dir,
            separate,
            scale,
        } => {
            let options = ExportOptions { scale };
            commands::images::run(
                &path,
                &pages,
                output_dir.as_deref(),
                separate,
                &options,
                &converter,
            )?;
        }
        Commands::Pdf {
            path,
            pages,
            output,
        } => {
            commands::extract::run(&path, &pages, &output, &converter)?;
        }
        Commands::Thumbnails {
            path,
            output_dir,
            zoom,
        } => {
            commands::thumbnails::run(&path, output_dir.as_deref(), zoom, &converter)?;
        }
        Commands::Convert { path } => {
            commands::convert::run(&path, &converter)?;
        }
    }

    Ok(())
}
