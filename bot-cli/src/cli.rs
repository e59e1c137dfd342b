//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "namebot")]
#[command(about = "Demo bot that asks for your name", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Chat with the bot in this terminal.
    Console {
        /// Display name the console channel reports for you.
        #[arg(short, long, default_value = "Console User")]
        name: String,
        #[arg(long, default_value_t = 1)]
        user_id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["namebot", "run", "--token", "abc"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                token: Some("abc".to_string())
            }
        );
    }

    #[test]
    fn test_parse_console_defaults() {
        let cli = Cli::try_parse_from(["namebot", "console"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Console {
                name: "Console User".to_string(),
                user_id: 1
            }
        );
    }

    #[test]
    fn test_parse_console_name() {
        let cli = Cli::try_parse_from(["namebot", "console", "-n", "Alice Smith"]).unwrap();
        assert!(matches!(cli.command, Commands::Console { ref name, .. } if name == "Alice Smith"));
    }
}
