//! 题解上传流程 - 流程层
//!
//! 流程顺序：
//! 1. 登录
//! 2. 获取题目标题
//! 3. 获取题解代码与语言
//! 4. 询问文件名与提交信息
//! 5. 提交到 GitHub

use tracing::info;

use crate::browser::{PageDriver, Waiter};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::ProblemRecord;
use crate::services::{upload_solution, GitDataApi, ProblemTarget, Prompter, Scraper};
use crate::utils::logging::truncate_text;

/// 流程结果
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub problem: ProblemRecord,
    pub filename: String,
    pub commit_message: String,
    /// 新提交的网页地址
    pub commit_url: String,
    /// 抓取过程中到过的页面
    pub visited: Vec<String>,
}

/// 题解上传流程
///
/// - 编排抓取、询问、上传三个阶段
/// - 不持有浏览器或 HTTP 资源，只借用能力
pub struct SolutionFlow<'a, D: ?Sized, A: ?Sized, P: ?Sized> {
    config: &'a Config,
    driver: &'a D,
    api: &'a A,
    prompter: &'a P,
    waiter: Waiter,
}

impl<'a, D, A, P> SolutionFlow<'a, D, A, P>
where
    D: PageDriver + ?Sized,
    A: GitDataApi + ?Sized,
    P: Prompter + ?Sized,
{
    pub fn new(config: &'a Config, driver: &'a D, api: &'a A, prompter: &'a P, waiter: Waiter) -> Self {
        Self {
            config,
            driver,
            api,
            prompter,
            waiter,
        }
    }

    pub async fn run(&self, target: ProblemTarget) -> AppResult<UploadOutcome> {
        let mut problem = ProblemRecord::new(target.problem_url.clone());
        let mut scraper = Scraper::new(self.driver, &self.config.site, self.waiter, target);

        // ========== 阶段 1: 抓取 ==========
        info!("🔐 正在登录...");
        scraper.login().await?;

        info!("🔍 正在获取题目标题...");
        problem.title = scraper.fetch_problem_title().await?;
        info!("题目: {}", problem.title);

        info!("🔍 正在获取题解...");
        let details = scraper.fetch_solution_details().await?;
        problem.solution_code = details.code;
        problem.solution_language = details.language;
        self.log_solution(&problem);

        // ========== 阶段 2: 询问 ==========
        let filename = self
            .prompter
            .input("Solution file name:", &problem.solution_filename())?;
        let commit_message = self.prompter.input(
            "Commit message:",
            &format!("add LeetCode {}", problem.identifier()),
        )?;

        // ========== 阶段 3: 上传 ==========
        info!("📤 正在上传到 GitHub...");
        let commit = upload_solution(self.api, &problem.file_content(), &filename, &commit_message).await?;
        info!("✅ 上传成功: {}", commit.html_url);

        Ok(UploadOutcome {
            problem,
            filename,
            commit_message,
            commit_url: commit.html_url,
            visited: scraper.visited().to_vec(),
        })
    }

    // ========== 日志辅助方法 ==========

    fn log_solution(&self, problem: &ProblemRecord) {
        info!("语言: {}", problem.solution_language);
        info!("代码预览: {}", truncate_text(&problem.solution_code, 120));
    }
}
