use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::browser::Locator;
use crate::error::ConfigError;

/// 程序配置文件
///
/// 启动时从 TOML 读取一次，之后只读，按引用传给各组件。
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// GitHub 仓库配置
    pub github: GithubConfig,
    /// 刷题站点配置
    #[serde(rename = "leetcode")]
    pub site: SiteConfig,
    /// 浏览器可执行文件配置
    #[serde(default)]
    pub browser: BrowserSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// 题解存放的目录，为空时放在仓库根目录
    #[serde(default)]
    pub directory: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_page")]
    pub login_page: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub selectors: SiteSelectors,
}

/// 页面元素定位器，站点改版时可在配置里覆盖
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub username: Locator,
    pub password: Locator,
    pub submit: Locator,
    pub problem_title: Locator,
    pub accepted_submission: Locator,
    pub solution_code: Locator,
    pub solution_language: Locator,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BrowserSettings {
    pub chrome_executable: Option<PathBuf>,
    pub edge_executable: Option<PathBuf>,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            username: Locator::Id("id_login".to_string()),
            password: Locator::Id("id_password".to_string()),
            submit: Locator::Id("signin_btn".to_string()),
            problem_title: Locator::Css("div[class='flex-1']".to_string()),
            accepted_submission: Locator::XPath("//span[text()='Accepted']".to_string()),
            solution_code: Locator::Css("code".to_string()),
            solution_language: Locator::Css("div[class='mb-4']".to_string()),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.github.com/repos".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_site_base_url() -> String {
    "https://leetcode.com/".to_string()
}

fn default_login_page() -> String {
    "https://leetcode.com/accounts/login/".to_string()
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "config/config.toml";

    /// 读取配置文件，应用环境变量覆盖并校验
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 敏感字段允许通过环境变量覆盖
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("GITHUB_ACCESS_TOKEN") {
            self.github.access_token = token;
        }
        if let Some(user) = lookup("LEETCODE_USER") {
            self.site.user = user;
        }
        if let Some(password) = lookup("LEETCODE_PASSWORD") {
            self.site.password = password;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("github.access_token", &self.github.access_token),
            ("github.owner", &self.github.owner),
            ("github.repo", &self.github.repo),
            ("github.branch", &self.github.branch),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name));
            }
        }
        Ok(())
    }
}

impl SiteConfig {
    pub fn ensure_credentials(&self) -> Result<(), ConfigError> {
        if self.user.is_empty() || self.password.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(())
    }
}
