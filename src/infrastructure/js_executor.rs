//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，对外实现 `PageDriver`

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::browser::{DriverResult, Locator, PageDriver};
use crate::error::BrowserError;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识题目 / 提交
pub struct JsExecutor {
    page: Page,
}

/// 元素探测结果
#[derive(Debug, Deserialize)]
struct ElementProbe {
    present: bool,
    clickable: bool,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ClickCheck {
    found: bool,
    intercepted: bool,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> DriverResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> DriverResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 脚本总是返回对象，避免 null 无法取值
    async fn probe(&self, locator: &Locator) -> DriverResult<ElementProbe> {
        let script = format!(
            r#"
            (() => {{
                const el = {};
                if (!el) return {{ present: false, clickable: false, text: "" }};
                const style = window.getComputedStyle(el);
                const visible = el.getClientRects().length > 0 && style.visibility !== "hidden";
                return {{
                    present: true,
                    clickable: visible && !el.disabled,
                    text: el.innerText ?? el.textContent ?? ""
                }};
            }})()
            "#,
            locator.js_lookup()
        );
        self.eval_as(script).await
    }

    async fn element(&self, locator: &Locator) -> DriverResult<Element> {
        let element = match locator {
            Locator::XPath(xpath) => self.page.find_xpath(xpath.as_str()).await,
            _ => {
                let selector = locator.css_selector().unwrap_or_default();
                self.page.find_element(selector).await
            }
        };
        element.map_err(|_| BrowserError::ElementNotFound(locator.to_string()))
    }
}

#[async_trait]
impl PageDriver for JsExecutor {
    async fn goto(&self, url: &str) -> DriverResult<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> DriverResult<Option<String>> {
        Ok(self.page.url().await?)
    }

    async fn is_present(&self, locator: &Locator) -> DriverResult<bool> {
        Ok(self.probe(locator).await?.present)
    }

    async fn is_clickable(&self, locator: &Locator) -> DriverResult<bool> {
        Ok(self.probe(locator).await?.clickable)
    }

    async fn text(&self, locator: &Locator) -> DriverResult<Option<String>> {
        let probe = self.probe(locator).await?;
        Ok(probe.present.then_some(probe.text))
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> DriverResult<()> {
        let element = self.element(locator).await?;
        element.focus().await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> DriverResult<()> {
        // 检查元素中心点最上层的节点是否为目标本身
        let script = format!(
            r#"
            (() => {{
                const el = {};
                if (!el) return {{ found: false, intercepted: false }};
                el.scrollIntoView({{ block: "center", inline: "center" }});
                const r = el.getBoundingClientRect();
                const top = document.elementFromPoint(r.left + r.width / 2, r.top + r.height / 2);
                return {{ found: true, intercepted: !!top && top !== el && !el.contains(top) }};
            }})()
            "#,
            locator.js_lookup()
        );
        let check: ClickCheck = self.eval_as(script).await?;
        if !check.found {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        if check.intercepted {
            return Err(BrowserError::ClickIntercepted(locator.to_string()));
        }

        self.element(locator).await?.click().await?;
        Ok(())
    }

    async fn script_click(&self, locator: &Locator) -> DriverResult<()> {
        let script = format!(
            r#"
            (() => {{
                const el = {};
                if (!el) return false;
                el.click();
                return true;
            }})()
            "#,
            locator.js_lookup()
        );
        let clicked: bool = self.eval_as(script).await?;
        if !clicked {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        Ok(())
    }
}
