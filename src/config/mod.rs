use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "fedibubble")]
#[command(about = "Compare the follow bubbles of two fediverse accounts")]
pub struct CliConfig {
    /// First account, e.g. @alice@mastodon.example
    pub account_a: String,

    /// Second account, e.g. bob@social.example
    pub account_b: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
