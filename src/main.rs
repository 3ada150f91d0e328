use clap::Parser;
use fedibubble::utils::logger;
use fedibubble::{make_valid_url, CliConfig, CompareOutcome, Comparer, ProgressSink, RemoteAccount};
use std::time::Duration;
use url::Url;

struct TerminalSink;

impl ProgressSink for TerminalSink {
    fn progress(&self, text: &str) {
        println!("{text}");
    }

    fn error(&self, text: &str) {
        eprintln!("❌ {text}");
    }
}

/// Local-form accts from a remote server lack the `@host` part; qualify
/// them with the host of the account URL.
fn qualified_acct(account: &RemoteAccount) -> String {
    if account.acct.contains('@') {
        return account.acct.clone();
    }
    Url::parse(&make_valid_url(&account.url))
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map_or_else(
            || account.acct.clone(),
            |host| format!("{}@{}", account.acct, host),
        )
}

fn render(outcome: &CompareOutcome) {
    match outcome {
        CompareOutcome::Matches(records) => {
            println!();
            for record in records {
                let acct = qualified_acct(&record.account);
                let name = if record.account.display_name.is_empty() {
                    acct.clone()
                } else {
                    record.account.display_name.clone()
                };
                println!("[{}] {name} <{acct}>", record.score);
                println!("    {}", record.note);
                println!("    {}", make_valid_url(&record.account.url));
            }
            println!();
            println!("✅ Found {} bubble intersections.", records.len());
        }
        CompareOutcome::Empty => {
            println!("No bubble intersections found.");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting fedibubble");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let comparer = match Comparer::new(Duration::from_secs(config.timeout_secs)) {
        Ok(comparer) => comparer,
        Err(err) => {
            tracing::error!("failed to set up HTTP client: {err}");
            eprintln!("❌ {err}");
            std::process::exit(3);
        }
    };

    match comparer
        .compare(&config.account_a, &config.account_b, &TerminalSink)
        .await
    {
        Ok(Some(outcome)) => render(&outcome),
        // Unreachable with a freshly created comparer, nothing else holds it.
        Ok(None) => {}
        Err(err) => {
            // The sink already reported the message; pick the exit code.
            let exit_code = if err.is_expected() { 1 } else { 2 };
            std::process::exit(exit_code);
        }
    }
}
