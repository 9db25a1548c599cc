use std::path::PathBuf;

use chromiumoxide::{Browser, BrowserConfig, Page};
use clap::ValueEnum;
use futures::StreamExt;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::config::BrowserSettings;
use crate::error::BrowserError;

/// 支持的浏览器，均通过 DevTools 协议驱动
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BrowserKind {
    #[default]
    Chrome,
    Edge,
}

impl BrowserKind {
    /// 可执行文件路径，`None` 表示交给 chromiumoxide 自动探测
    pub fn executable(self, settings: &BrowserSettings) -> Option<PathBuf> {
        match self {
            BrowserKind::Chrome => settings.chrome_executable.clone(),
            BrowserKind::Edge => Some(
                settings
                    .edge_executable
                    .clone()
                    .unwrap_or_else(default_edge_executable),
            ),
        }
    }
}

fn default_edge_executable() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge")
    } else {
        PathBuf::from("/usr/bin/microsoft-edge")
    }
}

/// 启动浏览器并打开一个空白页面
pub async fn launch_browser(
    kind: BrowserKind,
    headless: bool,
    settings: &BrowserSettings,
) -> Result<(Browser, Page), BrowserError> {
    info!("🚀 启动浏览器 ({:?}, headless: {})...", kind, headless);

    let mut builder = BrowserConfig::builder();
    builder = if headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(path) = kind.executable(settings) {
        debug!("浏览器路径: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let config = builder
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
        ])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            BrowserError::Launch(e)
        })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        BrowserError::Launch(e.to_string())
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await?;
    info!("✅ 浏览器已就绪");

    Ok((browser, page))
}
