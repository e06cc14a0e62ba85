// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::utils::errors::ServiceError;

/// 关闭命令与等待退出各自的上限，超过后强制结束进程
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// 启动浏览器的参数
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// 自定义可执行文件，缺省时由 chromiumoxide 自动探测
    pub chrome_executable: Option<String>,
    /// 单条 CDP 命令的超时
    pub request_timeout: Option<Duration>,
    /// 临时用户目录的父目录，缺省为系统临时目录
    pub profile_root: Option<PathBuf>,
}

/// 单次请求独占的无头浏览器
///
/// 正常路径调用 [`BrowserSession::close`] 异步关闭；请求被取消或 panic 时
/// 由 `Drop` 终止子进程、中止 CDP 事件任务并删除临时用户目录。
pub struct BrowserSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
    profile_dir: PathBuf,
}

impl BrowserSession {
    pub async fn launch(options: &LaunchOptions) -> Result<Self, ServiceError> {
        let profile_dir = options
            .profile_root
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join(format!("marketscrape-chrome-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&profile_dir).map_err(|e| {
            ServiceError::Upstream {
                status: None,
                message: format!("failed to create browser profile directory: {}", e),
            }
        })?;

        match Self::spawn(options, &profile_dir).await {
            Ok((browser, handler)) => {
                info!("Launched headless browser with profile {}", profile_dir.display());
                Ok(Self {
                    browser: Some(browser),
                    handler: Some(handler),
                    profile_dir,
                })
            }
            Err(e) => {
                remove_profile(&profile_dir);
                Err(e)
            }
        }
    }

    async fn spawn(
        options: &LaunchOptions,
        profile_dir: &Path,
    ) -> Result<(Browser, JoinHandle<()>), ServiceError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(profile_dir)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if let Some(path) = &options.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if let Some(timeout) = options.request_timeout {
            builder = builder.request_timeout(timeout);
        }
        let config = builder.build().map_err(|e| ServiceError::Upstream {
            status: None,
            message: format!("invalid browser configuration: {}", e),
        })?;

        let (browser, mut handler) =
            Browser::launch(config)
                .await
                .map_err(|e| ServiceError::Upstream {
                    status: None,
                    message: format!("failed to launch browser: {}", e),
                })?;

        let handler = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handler))
    }

    pub async fn new_page(&self, url: &str) -> Result<Page, ServiceError> {
        let browser = self.browser.as_ref().ok_or_else(|| ServiceError::Upstream {
            status: None,
            message: "browser already closed".to_string(),
        })?;
        browser.new_page(url).await.map_err(|e| ServiceError::Upstream {
            status: None,
            message: format!("navigation to {} failed: {}", url, e),
        })
    }

    /// 关闭浏览器并等待子进程退出，其余清理交给 `Drop`
    ///
    /// 总耗时有上限：浏览器不响应关闭命令或迟迟不退出时直接结束进程。
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            shut_down(&mut browser, SHUTDOWN_GRACE).await;
        }
    }
}

/// 关闭流程用到的子进程操作
#[async_trait]
trait BrowserProcess: Send {
    async fn request_close(&mut self) -> Result<(), String>;
    async fn wait_exit(&mut self) -> Result<(), String>;
    async fn force_kill(&mut self) -> Result<(), String>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> Result<(), String> {
        self.close().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn wait_exit(&mut self) -> Result<(), String> {
        self.wait().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn force_kill(&mut self) -> Result<(), String> {
        match self.kill().await {
            Some(Err(e)) => Err(e.to_string()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Shutdown {
    Graceful,
    Killed,
}

async fn shut_down<P: BrowserProcess>(process: &mut P, grace: Duration) -> Shutdown {
    let closed = tokio::time::timeout(grace, process.request_close()).await;
    let graceful = match closed {
        Ok(Ok(())) => match tokio::time::timeout(grace, process.wait_exit()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!("Waiting for browser exit failed: {}", e);
                false
            }
            Err(_) => {
                warn!("Browser did not exit within {:?}", grace);
                false
            }
        },
        Ok(Err(e)) => {
            warn!("Browser close command failed: {}", e);
            false
        }
        Err(_) => {
            warn!("Browser close command timed out after {:?}", grace);
            false
        }
    };
    if graceful {
        return Shutdown::Graceful;
    }

    let killed = tokio::time::timeout(grace, process.force_kill()).await;
    match killed {
        Ok(Ok(())) => info!("Browser process killed"),
        Ok(Err(e)) => warn!("Failed to kill browser process: {}", e),
        // Browser 的 Drop 仍会再次尝试结束子进程
        Err(_) => warn!("Killing browser process did not finish within {:?}", grace),
    }
    Shutdown::Killed
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        // Browser 的 Drop 会结束仍在运行的子进程
        if self.browser.take().is_some() {
            debug!("Browser dropped without close, killing child process");
        }
        remove_profile(&self.profile_dir);
    }
}

fn remove_profile(dir: &Path) {
    if let Err(e) = std::fs::remove_dir_all(dir) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove browser profile {}: {}", dir.display(), e);
        }
    }
}
