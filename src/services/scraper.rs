//! 抓取服务 - 业务能力层
//!
//! 单向流程：登录 → 题目标题 → 定位提交 → 题解代码与语言。
//! 每一步只在 `Waiter` 上挂起，不重试。

use tracing::{info, warn};
use url::Url;

use crate::browser::{Locator, PageDriver, Waiter};
use crate::config::SiteConfig;
use crate::error::{BrowserError, ScrapeError, WaitTimeout};
use crate::services::url_parser::ProblemTarget;

/// 题解详情
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionDetails {
    pub code: String,
    /// 未识别到语言时为空字符串
    pub language: String,
}

pub struct Scraper<'a, D: PageDriver + ?Sized> {
    driver: &'a D,
    site: &'a SiteConfig,
    waiter: Waiter,
    target: ProblemTarget,
    visited: Vec<String>,
}

impl<'a, D: PageDriver + ?Sized> Scraper<'a, D> {
    pub fn new(driver: &'a D, site: &'a SiteConfig, waiter: Waiter, target: ProblemTarget) -> Self {
        Self {
            driver,
            site,
            waiter,
            target,
            visited: Vec::new(),
        }
    }

    /// 每次导航后实际所在的 URL
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub async fn login(&mut self) -> Result<(), ScrapeError> {
        self.site.ensure_credentials()?;

        let login_page = self.site.login_page.clone();
        self.navigate(&login_page).await?;

        let site = self.site;
        let selectors = &site.selectors;
        self.wait_present(&selectors.username)
            .await
            .map_err(ScrapeError::LoginTimeout)?;
        self.wait_present(&selectors.password)
            .await
            .map_err(ScrapeError::LoginTimeout)?;
        self.wait_clickable(&selectors.submit)
            .await
            .map_err(ScrapeError::LoginTimeout)?;

        self.driver
            .type_text(&selectors.username, &site.user)
            .await?;
        self.driver
            .type_text(&selectors.password, &site.password)
            .await?;
        self.click_with_fallback(&selectors.submit).await?;

        let current = self
            .wait_url_change(&login_page)
            .await
            .map_err(ScrapeError::LoginRejected)?;
        info!("✓ 登录成功，当前页面: {}", current);
        Ok(())
    }

    /// 找不到标题时用 URL 最后一段代替
    pub async fn fetch_problem_title(&mut self) -> Result<String, ScrapeError> {
        let problem_url = self.target.problem_url.clone();
        self.navigate(&problem_url).await?;

        match self.wait_text(&self.site.selectors.problem_title).await {
            Ok(title) => Ok(title.trim().to_string()),
            Err(e) => {
                let slug = problem_slug(&problem_url);
                warn!("⚠️ 无法获取题目标题 ({})，使用 '{}' 代替", e, slug);
                Ok(slug)
            }
        }
    }

    pub async fn fetch_solution_details(&mut self) -> Result<SolutionDetails, ScrapeError> {
        self.go_to_submission_page().await?;

        let selectors = &self.site.selectors;
        let code = self
            .wait_text(&selectors.solution_code)
            .await
            .map_err(ScrapeError::SolutionTimeout)?;

        let language = match self.wait_text(&selectors.solution_language).await {
            Ok(language) => language.trim().to_string(),
            Err(e) => {
                warn!("⚠️ 无法识别题解语言: {}", e);
                String::new()
            }
        };

        Ok(SolutionDetails { code, language })
    }

    async fn go_to_submission_page(&mut self) -> Result<(), ScrapeError> {
        if let Some(submission_url) = self.target.submission_url.clone() {
            self.navigate(&submission_url).await?;
            return Ok(());
        }

        let submissions_url = submissions_listing(&self.target.problem_url);
        self.navigate(&submissions_url).await?;

        let site = self.site;
        let accepted = &site.selectors.accepted_submission;
        self.wait_clickable(accepted)
            .await
            .map_err(ScrapeError::NoAcceptedSubmission)?;
        self.click_with_fallback(accepted)
            .await
            .map_err(ScrapeError::AcceptedSubmissionUnclickable)?;

        let current = self
            .wait_url_change(&submissions_url)
            .await
            .map_err(ScrapeError::SubmissionPageTimeout)?;
        info!("当前页面: {}", current);
        self.visited.push(current);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.driver.goto(url).await?;
        let current = self
            .driver
            .current_url()
            .await?
            .unwrap_or_else(|| url.to_string());
        info!("当前页面: {}", current);
        self.visited.push(current);
        Ok(())
    }

    /// 点击被遮挡时改用脚本点击
    async fn click_with_fallback(&self, locator: &Locator) -> Result<(), BrowserError> {
        match self.driver.click(locator).await {
            Err(BrowserError::ClickIntercepted(what)) => {
                warn!("点击 {} 被拦截，改用脚本点击", what);
                self.driver.script_click(locator).await
            }
            other => other,
        }
    }

    async fn wait_present(&self, locator: &Locator) -> Result<(), WaitTimeout> {
        let driver = self.driver;
        self.waiter
            .until(&locator.to_string(), move || async move {
                Ok::<_, BrowserError>(driver.is_present(locator).await?.then_some(()))
            })
            .await
    }

    async fn wait_clickable(&self, locator: &Locator) -> Result<(), WaitTimeout> {
        let driver = self.driver;
        self.waiter
            .until(&format!("{} to be clickable", locator), move || async move {
                Ok::<_, BrowserError>(driver.is_clickable(locator).await?.then_some(()))
            })
            .await
    }

    async fn wait_text(&self, locator: &Locator) -> Result<String, WaitTimeout> {
        let driver = self.driver;
        self.waiter
            .until(&locator.to_string(), move || async move { driver.text(locator).await })
            .await
    }

    /// 返回变化后的 URL
    async fn wait_url_change(&self, from: &str) -> Result<String, WaitTimeout> {
        let driver = self.driver;
        self.waiter
            .until(&format!("url to change from {}", from), move || async move {
                Ok::<_, BrowserError>(driver.current_url().await?.filter(|url| url != from))
            })
            .await
    }
}

/// 题目 URL 最后一段，例如 `two-sum`
fn problem_slug(problem_url: &str) -> String {
    problem_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// 与题目 URL 相对拼接，`.../two-sum/` → `.../two-sum/submissions`
fn submissions_listing(problem_url: &str) -> String {
    Url::parse(problem_url)
        .and_then(|url| url.join("submissions"))
        .map(String::from)
        .unwrap_or_else(|_| format!("{}submissions", problem_url))
}
