// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Local};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::scrape_result::{HistoryEntry, ScrapeResult};
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use crate::utils::errors::ServiceError;

const KEY_PREFIX: &str = "scraped_";

/// 历史记录只需要的两个字段
#[derive(Deserialize)]
struct StoredHeader {
    url: String,
    timestamp: String,
}

/// 抓取结果的平面文件仓库
///
/// 每个结果一个 JSON 文件，文件名嵌入秒级时间戳。没有索引也没有缓存，
/// 同一秒内的并发写入会互相覆盖（后写者胜出）。
pub struct ResultStore {
    storage: Arc<dyn StorageRepository>,
}

impl ResultStore {
    pub fn new(storage: Arc<dyn StorageRepository>) -> Self {
        Self { storage }
    }

    /// 保存结果，返回存储键
    pub async fn save(&self, result: &ScrapeResult) -> Result<String, ServiceError> {
        self.save_at(result, Local::now()).await
    }

    pub async fn save_at(
        &self,
        result: &ScrapeResult,
        at: DateTime<Local>,
    ) -> Result<String, ServiceError> {
        let key = storage_key(at, "json");
        let persisted = result.persisted_copy();
        let body = serde_json::to_vec_pretty(&persisted)
            .map_err(|e| ServiceError::Storage(StorageError::Other(e.to_string())))?;

        self.storage.save(&key, &body).await?;
        info!("Saved scrape result for {} as {}", result.url, key);
        Ok(key)
    }

    /// 重新读取全部结果文件并按时间戳降序排列
    ///
    /// 任何一个 JSON 文件损坏都会让整个列表失败，而不是跳过它。
    pub async fn list_history(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        let mut entries = Vec::new();

        for key in self.storage.list_keys().await? {
            if !key.ends_with(".json") {
                continue;
            }
            let bytes = self
                .storage
                .get(&key)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("{} disappeared while listing", key)))?;
            let header: StoredHeader = serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Parse(format!("history file {} is not a valid scrape result: {}", key, e))
            })?;
            entries.push(HistoryEntry {
                filename: key,
                url: header.url,
                timestamp: header.timestamp,
            });
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!("Listed {} history entries", entries.len());
        Ok(entries)
    }

    /// 把每个 (表单, 字段) 对展开为一行写成 CSV，返回存储键
    pub async fn export_csv(&self, result: &ScrapeResult) -> Result<String, ServiceError> {
        self.export_csv_at(result, Local::now()).await
    }

    pub async fn export_csv_at(
        &self,
        result: &ScrapeResult,
        at: DateTime<Local>,
    ) -> Result<String, ServiceError> {
        let key = storage_key(at, "csv");
        let body = forms_to_csv(result)?;
        self.storage.save(&key, &body).await?;
        info!("Exported {} forms of {} to {}", result.forms.len(), result.url, key);
        Ok(key)
    }

    /// 读取已保存的结果
    pub async fn load(&self, filename: &str) -> Result<ScrapeResult, ServiceError> {
        let bytes = self.read(filename).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Parse(format!("{} is not a valid scrape result: {}", filename, e)))
    }

    /// 读取原始文件内容
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, ServiceError> {
        match self.storage.get(filename).await {
            Ok(Some(bytes)) => Ok(bytes),
            Ok(None) | Err(StorageError::InvalidKey(_)) => {
                Err(ServiceError::NotFound(format!("file not found: {}", filename)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// `scraped_<YYYYMMDDHHMMSS>.<ext>`
pub fn storage_key(at: DateTime<Local>, extension: &str) -> String {
    format!("{}{}.{}", KEY_PREFIX, at.format("%Y%m%d%H%M%S"), extension)
}

fn forms_to_csv(result: &ScrapeResult) -> Result<Vec<u8>, ServiceError> {
    let to_storage = |e: csv::Error| ServiceError::Storage(StorageError::Other(e.to_string()));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Form", "Action", "Method", "Field Name", "Field Type", "Required"])
        .map_err(to_storage)?;

    for (i, form) in result.forms.iter().enumerate() {
        let label = format!("Form {}", i + 1);
        for field in &form.fields {
            writer
                .write_record([
                    label.as_str(),
                    form.action.as_str(),
                    form.method.as_str(),
                    field.display_name(),
                    field.field_type.as_str(),
                    if field.required { "Yes" } else { "No" },
                ])
                .map_err(to_storage)?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| ServiceError::Storage(StorageError::Other(e.to_string())))
}

#[cfg(test)]
#[path = "result_store_test.rs"]
mod tests;
