use std::time::Duration;

use tracing::{info, warn};

use crate::browser::{launch_browser, BrowserKind, Waiter};
use crate::clients::GithubClient;
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::infrastructure::JsExecutor;
use crate::services::{validate_url, AcceptDefaults, InquirePrompter, Prompter, UrlParser};
use crate::utils::logging::log_startup;
use crate::workflow::{SolutionFlow, UploadOutcome};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// 一次运行的参数
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub url: String,
    pub browser: BrowserKind,
    pub headless: bool,
    /// 所有等待共用的超时
    pub timeout: Duration,
    /// 不询问，直接使用默认文件名与提交信息
    pub assume_defaults: bool,
}

/// 应用主结构
pub struct App {
    config: Config,
    options: RunOptions,
    http: reqwest::Client,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, options: RunOptions) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            config,
            options,
            http,
        })
    }

    /// 运行应用主逻辑，返回新提交的网页地址
    pub async fn run(&self) -> AppResult<String> {
        log_startup(&self.options.url, self.options.timeout.as_secs());

        // 浏览器启动前完成校验
        info!("🔗 正在解析并校验链接...");
        let target = UrlParser::new(&self.config.site.base_url)?.parse(&self.options.url)?;
        validate_url(&self.http, &target.problem_url).await?;
        if let Some(submission_url) = &target.submission_url {
            info!("提交链接: {}", submission_url);
        }
        self.config.site.ensure_credentials()?;
        let github = GithubClient::new(&self.config.github)?;

        let (mut browser, page) = launch_browser(
            self.options.browser,
            self.options.headless,
            &self.config.browser,
        )
        .await?;
        let executor = JsExecutor::new(page);

        let prompter: &dyn Prompter = if self.options.assume_defaults {
            &AcceptDefaults
        } else {
            &InquirePrompter
        };
        let flow = SolutionFlow::new(
            &self.config,
            &executor,
            &github,
            prompter,
            Waiter::new(self.options.timeout),
        );
        let result = flow.run(target).await;

        // 无论成功与否都关闭浏览器
        if let Err(e) = browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }

        let outcome: UploadOutcome = result?;
        Ok(outcome.commit_url)
    }
}
