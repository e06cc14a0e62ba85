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
    extract::{Extension, Json},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    application::dto::{
        requests::KeywordRequestDto,
        responses::{ProductsData, SuccessResponse},
    },
    engines::headless_search::CoupangSearchEngine,
    infrastructure::search::shopping::ShoppingSearchClient,
    presentation::{errors::AppError, extractors::validated::ValidatedJson},
    utils::errors::ServiceError,
};

/// 购物搜索开放接口透传
pub async fn shopping(
    Extension(client): Extension<Arc<ShoppingSearchClient>>,
    ValidatedJson(request): ValidatedJson<KeywordRequestDto>,
) -> Result<Json<SuccessResponse<Value>>, AppError> {
    let data = client.search(&request.keyword).await?;
    Ok(Json(SuccessResponse::new(data)))
}

/// 无头浏览器商品搜索；校验以外的失败统一为 500
pub async fn coupang(
    Extension(engine): Extension<Arc<CoupangSearchEngine>>,
    ValidatedJson(request): ValidatedJson<KeywordRequestDto>,
) -> Result<Json<SuccessResponse<ProductsData>>, AppError> {
    let products = engine.search(&request.keyword).await.map_err(|e| match e {
        ServiceError::Validation(_) => AppError::from(e),
        other => AppError::from(other).with_status(StatusCode::INTERNAL_SERVER_ERROR),
    })?;
    Ok(Json(SuccessResponse::new(ProductsData { products })))
}
