// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use marketscrape::config::settings::Settings;
use marketscrape::presentation::routes::{build_router, AppComponents};
use marketscrape::utils::telemetry;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting marketscrape...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");
    if settings.marketplace.api_key.is_none() {
        warn!("Marketplace API key is not configured; detail lookups will be rejected");
    }
    if settings.shopping.client_id.is_none() || settings.shopping.client_secret.is_none() {
        warn!("Shopping search credentials are not configured");
    }

    // 3. Initialize components
    let components = AppComponents::from_settings(&settings).await?;
    info!("Storing scrape results in {}", settings.storage.data_dir);

    // 4. Start HTTP server
    let app = build_router(components, &settings.cors);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
