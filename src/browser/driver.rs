//! 页面操作抽象
//!
//! 抓取流程只依赖 `PageDriver`，真实实现见 `infrastructure::JsExecutor`。

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::BrowserError;

pub type DriverResult<T> = Result<T, BrowserError>;

/// 元素定位方式
///
/// 配置中写作 `{ css = "..." }`、`{ id = "..." }` 或 `{ xpath = "..." }`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    Css(String),
    Id(String),
    XPath(String),
}

impl Locator {
    /// 返回查找该元素的 JS 表达式，找不到时为 `null`
    pub fn js_lookup(&self) -> String {
        match self {
            Locator::Css(selector) => {
                format!("document.querySelector({})", js_string(selector))
            }
            Locator::Id(id) => format!("document.getElementById({})", js_string(id)),
            Locator::XPath(xpath) => format!(
                "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                js_string(xpath)
            ),
        }
    }
}

impl Locator {
    /// 对应的 CSS 选择器，XPath 没有
    pub fn css_selector(&self) -> Option<String> {
        match self {
            Locator::Css(selector) => Some(selector.clone()),
            Locator::Id(id) => Some(format!("[id={}]", css_string(id))),
            Locator::XPath(_) => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css `{}`", selector),
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::XPath(xpath) => write!(f, "xpath `{}`", xpath),
        }
    }
}

/// 转成 JS 字符串字面量
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// 转成 CSS 字符串，转义引号与反斜杠
fn css_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            // 换行等控制字符用十六进制转义
            c if c.is_control() => out.push_str(&format!("\\{:x} ", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// 浏览器页面能力
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 导航到 URL 并等待加载
    async fn goto(&self, url: &str) -> DriverResult<()>;

    async fn current_url(&self) -> DriverResult<Option<String>>;

    async fn is_present(&self, locator: &Locator) -> DriverResult<bool>;

    /// 元素存在、可见且未禁用
    async fn is_clickable(&self, locator: &Locator) -> DriverResult<bool>;

    /// 元素的可见文本，元素不存在时为 `None`
    async fn text(&self, locator: &Locator) -> DriverResult<Option<String>>;

    async fn type_text(&self, locator: &Locator, text: &str) -> DriverResult<()>;

    /// 模拟真实点击，被遮挡时返回 `BrowserError::ClickIntercepted`
    async fn click(&self, locator: &Locator) -> DriverResult<()>;

    /// 通过脚本触发点击，不受遮挡影响
    async fn script_click(&self, locator: &Locator) -> DriverResult<()>;
}
