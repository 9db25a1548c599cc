use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::models::Sha;

/// 应用程序错误类型
///
/// Display 只给出面向用户的粗粒度信息，底层原因通过 `source()` 保留。
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入的 URL 无法匹配或无法访问
    #[error("Invalid problem url.")]
    InvalidUrl {
        url: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 浏览器启动或交互错误
    #[error(transparent)]
    Browser(#[from] BrowserError),
    /// 抓取流程错误
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    /// GitHub API 客户端错误（构造阶段）
    #[error(transparent)]
    Api(#[from] ApiError),
    /// 提交流水线错误
    #[error(transparent)]
    Commit(#[from] CommitError),
    /// 交互式输入错误
    #[error("prompt failed")]
    Prompt(#[from] inquire::InquireError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 必填字段为空
    #[error("missing required setting `{0}`")]
    MissingField(&'static str),
    /// 站点账号密码未配置
    #[error("Please provide your LeetCode credentials.")]
    MissingCredentials,
    #[error("invalid site base url {url}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid url pattern")]
    Pattern(#[from] regex::Error),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("failed to launch browser: {0}")]
    Launch(String),
    /// CDP 协议错误
    #[error("browser protocol error")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    /// 脚本返回值无法解析
    #[error("unexpected script result")]
    Decode(#[from] serde_json::Error),
    #[error("element not found: {0}")]
    ElementNotFound(String),
    /// 点击被其他元素（遮罩层等）拦截
    #[error("click on {0} was intercepted by another element")]
    ClickIntercepted(String),
}

/// 等待超时
#[derive(Debug, Error)]
#[error("timed out after {timeout:?} waiting for {what}")]
pub struct WaitTimeout {
    pub what: String,
    pub timeout: Duration,
}

/// 抓取流程错误
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 登录表单在超时时间内未出现
    #[error("[TIMEOUT] Login failed.")]
    LoginTimeout(#[source] WaitTimeout),
    /// 提交登录表单后 URL 未变化
    #[error("[TIMEOUT] Login failed. Make sure you provided the correct credentials.")]
    LoginRejected(#[source] WaitTimeout),
    #[error("Couldn't detect any accepted submissions, please provide a valid submission URL.")]
    NoAcceptedSubmission(#[source] WaitTimeout),
    /// "Accepted" 条目出现了但点击失败（遮挡以外的原因）
    #[error("Couldn't detect any accepted submissions, please provide a valid submission URL.")]
    AcceptedSubmissionUnclickable(#[source] BrowserError),
    #[error("[TIMEOUT] Couldn't load submission page.")]
    SubmissionPageTimeout(#[source] WaitTimeout),
    #[error("[TIMEOUT] Couldn't extract the solution.")]
    SolutionTimeout(#[source] WaitTimeout),
    #[error("browser interaction failed")]
    Browser(#[from] BrowserError),
}

/// GitHub API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("request to {endpoint} failed")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误状态码
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    #[error("malformed response from {endpoint}")]
    Malformed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("access token is not a valid header value")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// 提交流水线错误，每一步对应一个变体
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("Couldn't fetch the head reference of the specified branch.")]
    HeadRef(#[source] ApiError),
    #[error("Error while creating the Git tree.")]
    Tree(#[source] ApiError),
    #[error("Error while creating the new commit.")]
    Commit(#[source] ApiError),
    /// 新提交已创建但分支未更新，`orphaned` 为悬空提交
    #[error("Couldn't update the head reference.")]
    UpdateRef {
        orphaned: Sha,
        #[source]
        source: ApiError,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建 URL 无效错误
    pub fn invalid_url(url: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        AppError::InvalidUrl {
            url: url.into(),
            source,
        }
    }
}

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::Request {
            endpoint: endpoint.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_commit_error_keeps_cause() {
        let err = CommitError::Tree(ApiError::Status {
            endpoint: "git/trees".to_string(),
            status: 422,
            body: "bad".to_string(),
        });
        assert_eq!(err.to_string(), "Error while creating the Git tree.");
        let source = err.source().expect("cause should be preserved");
        assert!(source.to_string().contains("422"));
    }

    #[test]
    fn test_scrape_error_message() {
        let err = ScrapeError::LoginTimeout(WaitTimeout {
            what: "login form".to_string(),
            timeout: Duration::from_secs(15),
        });
        assert!(err.to_string().starts_with("[TIMEOUT] Login failed"));
        let app: AppError = err.into();
        assert_eq!(app.to_string(), "[TIMEOUT] Login failed.");
    }
}
