//! 编排层（Orchestration Layer）
//!
//! 持有浏览器与 HTTP 客户端，按顺序驱动一次完整运行：
//!
//! ```text
//! app (解析参数、校验链接、启动浏览器)
//!     ↓
//! workflow::SolutionFlow (登录 → 抓取 → 询问 → 上传)
//!     ↓
//! services (能力层：scraper / commit_pipeline / prompt)
//!     ↓
//! infrastructure / clients (JsExecutor、GithubClient)
//! ```

pub mod app;

pub use app::{App, RunOptions};
