//! # LeetCode Uploader
//!
//! 抓取 LeetCode 上已通过的题解，并通过 GitHub Git Data API 提交到仓库
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有浏览器 Page，实现 `PageDriver`
//! - `clients/` - `GithubClient`，实现 `GitDataApi`
//!
//! ### ② 业务能力层（Services）
//! - `UrlParser` - 解析并校验题目 / 提交链接
//! - `Scraper` - 登录并抓取标题、代码与语言
//! - `upload_solution` - 四步提交流水线
//! - `Prompter` - 询问文件名与提交信息
//!
//! ### ③ 流程层（Workflow）
//! - `SolutionFlow` - 一次完整的抓取与上传
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 校验输入、启动浏览器、运行流程
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::{Locator, PageDriver, Waiter};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::ProblemRecord;
pub use orchestrator::{App, RunOptions};
pub use services::{GitDataApi, ProblemTarget};
pub use workflow::{SolutionFlow, UploadOutcome};
