// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use std::sync::Arc;

use crate::{
    application::dto::{requests::GgookRequestDto, responses::SuccessResponse},
    domain::models::marketplace::MarketplaceDetail,
    infrastructure::marketplace::domeggook::DomeggookClient,
    presentation::{errors::AppError, extractors::validated::ValidatedJson},
    utils::errors::ServiceError,
};

/// 商品详情；校验以外的失败统一为 500
pub async fn fetch_detail(
    Extension(client): Extension<Arc<DomeggookClient>>,
    ValidatedJson(request): ValidatedJson<GgookRequestDto>,
) -> Result<Json<SuccessResponse<MarketplaceDetail>>, AppError> {
    let detail = client
        .fetch_detail(&request.product_no)
        .await
        .map_err(|e| match e {
            ServiceError::Validation(_) => AppError::from(e),
            other => AppError::from(other).with_status(StatusCode::INTERNAL_SERVER_ERROR),
        })?;

    let message = format!(
        "Fetched product {} with {} detail images",
        request.product_no.trim(),
        detail.detail_images.len()
    );
    Ok(Json(SuccessResponse::new(detail).with_message(message)))
}
