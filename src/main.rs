use anyhow::Result;
use clap::Parser;
use leetcode_uploader::cli::Cli;
use leetcode_uploader::utils::logging;
use leetcode_uploader::{App, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    logging::init(cli.verbose);

    // 加载配置
    let config = Config::load(&cli.config)?;

    // 初始化并运行应用
    let commit_url = App::initialize(config, cli.run_options())?.run().await?;
    println!("{}", commit_url);

    Ok(())
}
