use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::browser::BrowserKind;
use crate::config::Config;
use crate::orchestrator::RunOptions;

/// Fetch a LeetCode submission and upload it to GitHub.
///
/// URL is the URL of a LeetCode problem or submission. If a problem URL is
/// provided, the last accepted submission is fetched.
#[derive(Debug, Parser)]
#[command(name = "leetcode_uploader", version)]
pub struct Cli {
    /// Problem or submission URL
    pub url: String,

    /// Web browser to be used
    #[arg(long, value_enum, default_value_t = BrowserKind::Chrome)]
    pub browser: BrowserKind,

    /// Show the browser window and the actions taken by the driver
    #[arg(long)]
    pub show: bool,

    /// Seconds to wait for a web element before timing out (at most one day)
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(..=86400))]
    pub timeout: u64,

    /// Path of the configuration file
    #[arg(long, default_value = Config::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Accept the default file name and commit message without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            url: self.url.clone(),
            browser: self.browser,
            headless: !self.show,
            timeout: Duration::from_secs(self.timeout),
            assume_defaults: self.yes,
        }
    }
}
