#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use leetcode_uploader::browser::DriverResult;
use leetcode_uploader::config::Config;
use leetcode_uploader::error::{ApiError, BrowserError};
use leetcode_uploader::models::{CreatedCommit, Sha};
use leetcode_uploader::{GitDataApi, Locator, PageDriver, Waiter};

pub const LOGIN_PAGE: &str = "https://leetcode.com/accounts/login/";
pub const HOME_PAGE: &str = "https://leetcode.com/";
pub const PROBLEM_URL: &str = "https://leetcode.com/problems/two-sum/";
pub const SUBMISSIONS_URL: &str = "https://leetcode.com/problems/two-sum/submissions";
pub const SUBMISSION_URL: &str = "https://leetcode.com/problems/two-sum/submissions/1234567/";
pub const CODE: &str = "class Solution:\n    def twoSum(self, nums, target): ...";

pub fn config() -> Config {
    Config::from_toml_str(
        r#"
        [github]
        access_token = "ghp_token"
        owner = "octocat"
        repo = "solutions"
        directory = "leetcode"

        [leetcode]
        user = "alice"
        password = "secret"
        "#,
    )
    .unwrap()
}

pub fn fast_waiter() -> Waiter {
    Waiter::new(Duration::from_millis(40)).with_interval(Duration::from_millis(2))
}

/// 假页面元素
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub text: String,
    pub clickable: bool,
    /// 真实点击会被遮挡
    pub intercepted: bool,
    /// 点击后跳转到的 URL
    pub navigates_to: Option<String>,
    /// 可见但已从文档中移除，任何点击都失败
    pub detached: bool,
}

impl FakeElement {
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            clickable: true,
            ..Default::default()
        }
    }

    pub fn button(navigates_to: Option<&str>) -> Self {
        Self {
            clickable: true,
            navigates_to: navigates_to.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn intercepted(mut self) -> Self {
        self.intercepted = true;
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }
}

#[derive(Default)]
struct FakeState {
    current_url: String,
    /// 按页面 URL 存放元素
    pages: HashMap<String, HashMap<Locator, FakeElement>>,
    gotos: Vec<String>,
    typed: Vec<(Locator, String)>,
    clicks: Vec<String>,
}

/// 内存中的假浏览器页面
#[derive(Default)]
pub struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, page_url: &str, locator: Locator, element: FakeElement) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .entry(page_url.to_string())
            .or_default()
            .insert(locator, element);
        self
    }

    /// 一个可以完整走通的站点
    pub fn leetcode() -> Self {
        let selectors = config().site.selectors;
        Self::new()
            .with(LOGIN_PAGE, selectors.username.clone(), FakeElement::text(""))
            .with(LOGIN_PAGE, selectors.password.clone(), FakeElement::text(""))
            .with(LOGIN_PAGE, selectors.submit.clone(), FakeElement::button(Some(HOME_PAGE)))
            .with(PROBLEM_URL, selectors.problem_title.clone(), FakeElement::text("1. Two Sum"))
            .with(
                SUBMISSIONS_URL,
                selectors.accepted_submission.clone(),
                FakeElement::button(Some(SUBMISSION_URL)),
            )
            .with(SUBMISSION_URL, selectors.solution_code.clone(), FakeElement::text(CODE))
            .with(SUBMISSION_URL, selectors.solution_language.clone(), FakeElement::text("Python3"))
    }

    pub fn without(self, page_url: &str, locator: &Locator) -> Self {
        if let Some(elements) = self.state.lock().unwrap().pages.get_mut(page_url) {
            elements.remove(locator);
        }
        self
    }

    pub fn gotos(&self) -> Vec<String> {
        self.state.lock().unwrap().gotos.clone()
    }

    pub fn typed(&self) -> Vec<(Locator, String)> {
        self.state.lock().unwrap().typed.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    fn element(&self, locator: &Locator) -> Option<FakeElement> {
        let state = self.state.lock().unwrap();
        state
            .pages
            .get(&state.current_url)
            .and_then(|elements| elements.get(locator))
            .cloned()
    }

    fn ensure_attached(element: &FakeElement, locator: &Locator) -> DriverResult<()> {
        if element.detached {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        Ok(())
    }

    fn follow(&self, element: &FakeElement) {
        if let Some(url) = &element.navigates_to {
            self.state.lock().unwrap().current_url = url.clone();
        }
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> DriverResult<()> {
        let mut state = self.state.lock().unwrap();
        state.current_url = url.to_string();
        state.gotos.push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> DriverResult<Option<String>> {
        Ok(Some(self.state.lock().unwrap().current_url.clone()))
    }

    async fn is_present(&self, locator: &Locator) -> DriverResult<bool> {
        Ok(self.element(locator).is_some())
    }

    async fn is_clickable(&self, locator: &Locator) -> DriverResult<bool> {
        Ok(self.element(locator).map_or(false, |e| e.clickable))
    }

    async fn text(&self, locator: &Locator) -> DriverResult<Option<String>> {
        Ok(self.element(locator).map(|e| e.text))
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> DriverResult<()> {
        self.element(locator)
            .ok_or_else(|| BrowserError::ElementNotFound(locator.to_string()))?;
        self.state
            .lock()
            .unwrap()
            .typed
            .push((locator.clone(), text.to_string()));
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> DriverResult<()> {
        let element = self
            .element(locator)
            .ok_or_else(|| BrowserError::ElementNotFound(locator.to_string()))?;
        Self::ensure_attached(&element, locator)?;
        if element.intercepted {
            return Err(BrowserError::ClickIntercepted(locator.to_string()));
        }
        self.state.lock().unwrap().clicks.push(format!("click {}", locator));
        self.follow(&element);
        Ok(())
    }

    async fn script_click(&self, locator: &Locator) -> DriverResult<()> {
        let element = self
            .element(locator)
            .ok_or_else(|| BrowserError::ElementNotFound(locator.to_string()))?;
        Self::ensure_attached(&element, locator)?;
        self.state
            .lock()
            .unwrap()
            .clicks
            .push(format!("script_click {}", locator));
        self.follow(&element);
        Ok(())
    }
}

/// 记录调用的假 Git Data API
#[derive(Default)]
pub struct FakeGitApi {
    calls: Mutex<Vec<String>>,
    contents: Mutex<Vec<(String, String)>>,
}

impl FakeGitApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// (文件名, 内容)
    pub fn uploaded(&self) -> Vec<(String, String)> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitDataApi for FakeGitApi {
    async fn get_head_ref(&self) -> Result<Sha, ApiError> {
        self.calls.lock().unwrap().push("get_head_ref".to_string());
        Ok(Sha::new("abc123"))
    }

    async fn create_tree(
        &self,
        content: &str,
        filename: &str,
        base_tree: &Sha,
    ) -> Result<Sha, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create_tree base={}", base_tree));
        self.contents
            .lock()
            .unwrap()
            .push((filename.to_string(), content.to_string()));
        Ok(Sha::new("tree456"))
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &Sha,
        parent: &Sha,
    ) -> Result<CreatedCommit, ApiError> {
        self.calls.lock().unwrap().push(format!(
            "create_commit message={} tree={} parent={}",
            message, tree, parent
        ));
        Ok(CreatedCommit {
            sha: Sha::new("commit789"),
            html_url: "https://github.com/octocat/solutions/commit/commit789".to_string(),
        })
    }

    async fn update_head_ref(&self, sha: &Sha) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("update_head_ref sha={}", sha));
        Ok(())
    }
}
