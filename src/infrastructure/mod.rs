//! 基础设施层：持有浏览器页面等稀缺资源

pub mod js_executor;

pub use js_executor::JsExecutor;
