use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "daily-tui")]
#[command(about = "Terminal client for daily todos and personal OKRs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a real task backend (default)
    Run {
        /// Backend base URL, overrides config and DAILY_API_URL
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["daily-tui"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_accepts_api_url() {
        let cli = Cli::try_parse_from(["daily-tui", "run", "--api-url", "http://x:1"]).unwrap();
        match cli.command {
            Some(Commands::Run { api_url }) => assert_eq!(api_url.as_deref(), Some("http://x:1")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_path_is_kebab_case() {
        let cli = Cli::try_parse_from(["daily-tui", "config-path"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ConfigPath)));
    }
}
