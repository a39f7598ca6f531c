//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for boardroom
#[derive(Parser, Debug)]
#[command(name = "boardroom")]
#[command(author, version, about = "A virtual executive board of LLM personas")]
#[command(long_about = r#"
Boardroom answers your messages as one of eight executive personas (CEO, CMO,
CTO, CFO, CISO, CDO, CLO, CRO), each bound to its own LLM provider, and runs
round-robin discussions between them.

Type /start for the command list. Choice prompts are answered with :1, :2, ...
or :<data>. Exit with Ctrl-D or :quit.

Configuration files are loaded from (in priority order):
1. BOARDROOM_* environment variables (BOARDROOM_DISCUSSION__PACING_MS=500)
2. --config <path>     Explicit config file
3. ./boardroom.toml    Project-level config
4. ~/.config/boardroom/config.toml   Global config

Example:
  boardroom
  boardroom -v --log-dir ./logs
  boardroom --config ./boardroom.toml --conversation 42
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write daily-rotated log files into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Conversation id used for this console session (overrides [repl].conversation_id)
    #[arg(long, value_name = "ID")]
    pub conversation: Option<i64>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["boardroom"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.conversation.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "boardroom",
            "-vv",
            "--quiet",
            "--log-dir",
            "logs",
            "--conversation",
            "42",
            "--no-config",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
        assert_eq!(cli.conversation, Some(42));
        assert!(cli.no_config);
    }
}
