//! Command parsing for the dashboard prompt
//!
//! Every control of the dashboard maps to one slash command. A line without
//! a leading `/` is a ticker submission.

use crate::error::{DashboardError, Result};
use crate::models::{Horizon, Strategy};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Load a ticker and rebuild every panel
    Ticker { symbol: String },
    /// Change the forecast horizon
    Horizon { horizon: Horizon },
    /// Change the forecast strategy
    Strategy { strategy: Strategy },
    /// Set the report recipient
    Email { address: String },
    /// Send the report for the current snapshot
    Send,
    /// Redraw the current view
    Show,
    /// Show help
    Help,
    /// Exit the dashboard
    Exit,
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(DashboardError::CommandError("Empty input".to_string()));
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Ticker {
                symbol: input.to_string(),
            });
        };

        let (cmd, args) = match rest.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd.to_lowercase(), args.trim()),
            None => (rest.to_lowercase(), ""),
        };

        if cmd.is_empty() {
            return Err(DashboardError::CommandError("Empty command".to_string()));
        }

        match cmd.as_str() {
            "ticker" | "symbol" | "t" => {
                if args.is_empty() {
                    return Err(DashboardError::CommandError(
                        "Missing symbol for ticker command".to_string(),
                    ));
                }
                Ok(Command::Ticker {
                    symbol: args.to_string(),
                })
            }
            "horizon" | "days" | "d" => {
                if args.is_empty() {
                    return Err(DashboardError::CommandError(format!(
                        "Missing number of days for horizon command ({}-{})",
                        Horizon::MIN,
                        Horizon::MAX
                    )));
                }
                Ok(Command::Horizon {
                    horizon: args.parse()?,
                })
            }
            "strategy" | "method" | "s" => {
                if args.is_empty() {
                    return Err(DashboardError::CommandError(
                        "Missing name for strategy command".to_string(),
                    ));
                }
                Ok(Command::Strategy {
                    strategy: args.parse()?,
                })
            }
            "email" | "to" | "e" => {
                if args.is_empty() {
                    return Err(DashboardError::CommandError(
                        "Missing address for email command".to_string(),
                    ));
                }
                Ok(Command::Email {
                    address: args.to_string(),
                })
            }
            "send" => Ok(Command::Send),
            "show" | "view" | "v" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(DashboardError::CommandError(format!("Unknown command: {cmd}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Stock Dashboard Commands
========================

Data:
  /ticker <symbol>       Load six months of daily prices (or type the symbol)
  /show                  Redraw the current view

Forecast:
  /horizon <5-30>        Business days to predict (default 15)
  /strategy <name>       Moving Average | ARIMA | Exponential Smoothing

Report:
  /email <address>       Recipient for the emailed report
  /send                  Send the report for the current ticker

Other Commands:
  /help                  Show help
  /exit                  Exit

Command Aliases:
  /t = /ticker      /d = /horizon     /s = /strategy
  /e = /email       /v = /show        /q = /exit

Strategy names:
  ma, sma            Moving Average
  arima              ARIMA(5,1,0)
  es, ets, holt      Exponential Smoothing
"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Ticker { .. } => "Load ticker",
            Command::Horizon { .. } => "Set forecast horizon",
            Command::Strategy { .. } => "Set forecast strategy",
            Command::Email { .. } => "Set report recipient",
            Command::Send => "Send email report",
            Command::Show => "Show dashboard",
            Command::Help => "Show help",
            Command::Exit => "Exit the dashboard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ticker() {
        let cmd = Command::parse("/ticker msft").unwrap();
        assert_eq!(
            cmd,
            Command::Ticker {
                symbol: "msft".to_string()
            }
        );

        let cmd = Command::parse("  TSLA ").unwrap();
        assert_eq!(
            cmd,
            Command::Ticker {
                symbol: "TSLA".to_string()
            }
        );

        assert!(Command::parse("/t").is_err());
    }

    #[test]
    fn test_parse_horizon() {
        let cmd = Command::parse("/horizon 30").unwrap();
        assert_eq!(
            cmd,
            Command::Horizon {
                horizon: Horizon::new(30).unwrap()
            }
        );

        let cmd = Command::parse("/d 5").unwrap();
        assert_eq!(
            cmd,
            Command::Horizon {
                horizon: Horizon::new(5).unwrap()
            }
        );
    }

    #[test]
    fn test_parse_horizon_out_of_range() {
        assert!(matches!(
            Command::parse("/horizon 4"),
            Err(DashboardError::InvalidHorizon { value: 4, .. })
        ));
        assert!(matches!(
            Command::parse("/horizon 31"),
            Err(DashboardError::InvalidHorizon { value: 31, .. })
        ));
        assert!(matches!(
            Command::parse("/horizon ten"),
            Err(DashboardError::CommandError(_))
        ));
        assert!(Command::parse("/horizon").is_err());
    }

    #[test]
    fn test_parse_strategy() {
        let cmd = Command::parse("/strategy Exponential Smoothing").unwrap();
        assert_eq!(
            cmd,
            Command::Strategy {
                strategy: Strategy::ExponentialSmoothing
            }
        );

        let cmd = Command::parse("/s arima").unwrap();
        assert_eq!(
            cmd,
            Command::Strategy {
                strategy: Strategy::Arima
            }
        );

        let cmd = Command::parse("/method moving-average").unwrap();
        assert_eq!(
            cmd,
            Command::Strategy {
                strategy: Strategy::MovingAverage
            }
        );

        assert!(matches!(
            Command::parse("/strategy lstm"),
            Err(DashboardError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_parse_email() {
        let cmd = Command::parse("/email someone@example.com").unwrap();
        assert_eq!(
            cmd,
            Command::Email {
                address: "someone@example.com".to_string()
            }
        );
        assert!(Command::parse("/email").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/send").unwrap(), Command::Send);
        assert_eq!(Command::parse("/SHOW").unwrap(), Command::Show);
        assert_eq!(Command::parse("/v").unwrap(), Command::Show);
        assert_eq!(Command::parse("/help").unwrap(), Command::Help);
        assert_eq!(Command::parse("/?").unwrap(), Command::Help);
        assert_eq!(Command::parse("/quit").unwrap(), Command::Exit);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
        assert!(matches!(
            Command::parse("/backtest AAPL"),
            Err(DashboardError::CommandError(_))
        ));
    }
}
