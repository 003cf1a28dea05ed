mod cli;
mod content;
mod input;
mod logging;
mod model;
mod orchestrator;
mod screen;
mod stages;
mod text_mode;
mod text_render;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_line_mode = args.line_mode();

    match cli::run(args).await {
        Ok(()) => {
            // Explicitly exit on success in line mode; stdin may still be held by a reader.
            if is_line_mode {
                std::process::exit(0);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("{e:#}");
            Err(e)
        }
    }
}
