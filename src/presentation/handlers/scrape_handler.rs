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

use axum::{
    extract::{Extension, Json, Path},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::info;

use crate::{
    application::dto::{
        requests::UrlRequestDto,
        responses::{ExportResponse, SuccessResponse},
    },
    domain::models::scrape_result::{HistoryEntry, ScrapeResult},
    engines::page_scraper::PageScraper,
    infrastructure::repositories::result_store::ResultStore,
    presentation::{errors::AppError, extractors::validated::ValidatedJson},
    utils::errors::ServiceError,
};

/// 抓取页面并保存结果
///
/// 任何失败（未登录、上游错误、写盘失败）都以 400 返回
pub async fn scrape(
    Extension(scraper): Extension<Arc<PageScraper>>,
    Extension(store): Extension<Arc<ResultStore>>,
    ValidatedJson(request): ValidatedJson<UrlRequestDto>,
) -> Result<Json<SuccessResponse<ScrapeResult>>, AppError> {
    let as_bad_request = |e: ServiceError| AppError::from(e).with_status(StatusCode::BAD_REQUEST);

    let result = scraper.scrape(&request.url).await.map_err(as_bad_request)?;
    let filename = store.save(&result).await.map_err(as_bad_request)?;

    info!("Scrape of {} stored as {}", result.url, filename);
    Ok(Json(SuccessResponse::new(result).with_filename(filename)))
}

/// 历史记录，按时间戳降序
pub async fn history(
    Extension(store): Extension<Arc<ResultStore>>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    Ok(Json(store.list_history().await?))
}

/// 以附件形式下载已保存的文件
pub async fn download(
    Extension(store): Extension<Arc<ResultStore>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = store.read(&filename).await?;
    let content_type = if filename.ends_with(".csv") {
        "text/csv; charset=utf-8"
    } else {
        "application/json"
    };
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// 把已保存的抓取结果导出为 CSV
pub async fn export_csv(
    Extension(store): Extension<Arc<ResultStore>>,
    Path(filename): Path<String>,
) -> Result<Json<ExportResponse>, AppError> {
    let result = store.load(&filename).await?;
    let exported = store.export_csv(&result).await?;
    Ok(Json(ExportResponse {
        status: "success",
        filename: exported,
    }))
}
