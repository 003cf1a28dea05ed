use crate::model::{PacingConfig, SessionConfig};
use anyhow::Result;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "sysverify",
    version,
    about = "System verification walkthrough with optional TUI"
)]
pub struct Cli {
    /// Run in line mode on stdin/stdout (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Line mode that prints every session event as JSON
    #[arg(long)]
    pub json: bool,

    /// Seed for the arithmetic check (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between hosts during the connectivity scan
    #[arg(long, default_value = "800ms")]
    pub scan_step: humantime::Duration,

    /// How long the scan's closing frame stays up
    #[arg(long, default_value = "1s")]
    pub scan_settle: humantime::Duration,

    /// Delay between chunks during the message decryption
    #[arg(long, default_value = "1s")]
    pub reveal_step: humantime::Duration,

    /// Pause after a correct arithmetic answer
    #[arg(long, default_value = "1s")]
    pub confirm_delay: humantime::Duration,

    /// Pause after solving the riddle
    #[arg(long, default_value = "2s")]
    pub unlock_delay: humantime::Duration,

    /// Skip every animation delay and settle pause
    #[arg(long)]
    pub no_pacing: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file (the TUI only logs when this is set)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    pub fn line_mode(&self) -> bool {
        self.text || self.json
    }
}

pub async fn run(args: Cli) -> Result<()> {
    crate::logging::init_logging(&args)?;
    tracing::info!(line_mode = args.line_mode(), seed = ?args.seed, "starting session");

    if !args.line_mode() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return crate::text_mode::run_text(args).await;
        }
    }

    crate::text_mode::run_text(args).await
}

/// Build a `SessionConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> SessionConfig {
    let pacing = if args.no_pacing {
        PacingConfig::instant()
    } else {
        PacingConfig {
            scan_step: Duration::from(args.scan_step),
            scan_settle: Duration::from(args.scan_settle),
            reveal_step: Duration::from(args.reveal_step),
            confirm_delay: Duration::from(args.confirm_delay),
            unlock_delay: Duration::from(args.unlock_delay),
        }
    };
    SessionConfig {
        pacing,
        seed: args.seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_pacing() {
        let args = Cli::parse_from(["sysverify"]);
        assert!(!args.line_mode());
        let cfg = build_config(&args);
        assert_eq!(cfg.pacing, PacingConfig::default());
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn flags_override_pacing() {
        let args = Cli::parse_from([
            "sysverify",
            "--json",
            "--seed",
            "7",
            "--scan-step",
            "0s",
            "--unlock-delay",
            "250ms",
            "-vv",
        ]);
        assert!(args.line_mode());
        assert_eq!(args.verbose, 2);
        let cfg = build_config(&args);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.pacing.scan_step, Duration::ZERO);
        assert_eq!(cfg.pacing.unlock_delay, Duration::from_millis(250));
        assert_eq!(cfg.pacing.reveal_step, Duration::from_secs(1));
    }

    #[test]
    fn no_pacing_wins_over_durations() {
        let args = Cli::parse_from(["sysverify", "--text", "--no-pacing", "--reveal-step", "5s"]);
        assert_eq!(build_config(&args).pacing, PacingConfig::instant());
    }
}
