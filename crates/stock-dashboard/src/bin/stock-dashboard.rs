//! Stock Dashboard CLI
//!
//! An interactive terminal dashboard for one ticker at a time.
//!
//! # Usage
//!
//! ```bash
//! # Optional: enable emailed reports
//! export DASHBOARD_SMTP_USER="you@gmail.com"
//! export DASHBOARD_SMTP_PASSWORD="app-password"
//!
//! # Run the dashboard
//! cargo run --bin stock-dashboard -p stock-dashboard
//! ```

use dashboard_utils::{Config, init_tracing};
use std::io::{self, BufRead, Write};
use stock_dashboard::{Dashboard, DashboardConfig, Reply};
use tracing::info;

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                      Stock Dashboard                         ║
║                                                              ║
║  Commands:                                                   ║
║    <symbol> or /ticker <symbol>  - Load six months of prices ║
║    /horizon <5-30>               - Forecast horizon          ║
║    /strategy <ma|arima|es>       - Prediction method         ║
║    /email <address>, /send       - Email the report          ║
║    /help                         - Help                      ║
║    /exit                         - Exit                      ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("warn,stock_dashboard=info");

    print_banner();

    let app = Config::from_env();
    let config = DashboardConfig::from_env()?;
    info!(app = %app.app_name, environment = %app.environment, "starting");

    println!("Configuration:");
    println!("  Environment: {}", app.environment);
    println!("  Strategy: {}", config.default_strategy);
    println!("  Horizon: {} business days", config.default_horizon);
    println!(
        "  Email: {}",
        match &config.smtp_credentials {
            Some(credentials) => format!("enabled ({})", credentials.username),
            None => "disabled (set DASHBOARD_SMTP_USER and DASHBOARD_SMTP_PASSWORD)".to_string(),
        }
    );
    println!();

    let default_ticker = config.default_ticker.clone();
    let mut dashboard = Dashboard::from_config(config);

    println!("Loading {default_ticker}...");
    println!("{}\n", dashboard.on_ticker(&default_ticker).await);

    // Run REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", dashboard.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let reply = dashboard.process_input(input).await;
        println!("{reply}\n");
        if reply == Reply::Exit {
            break;
        }
    }

    Ok(())
}
