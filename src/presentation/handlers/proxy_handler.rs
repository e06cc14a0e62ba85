// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    application::dto::requests::ProxyImageQuery,
    engines::image_relay::ImageRelay,
    presentation::{errors::AppError, extractors::validated::ValidatedQuery},
};

/// 流式转发第三方图片
pub async fn proxy_image(
    Extension(relay): Extension<Arc<ImageRelay>>,
    ValidatedQuery(query): ValidatedQuery<ProxyImageQuery>,
) -> Result<Response, AppError> {
    let timeout = query.timeout.map(Duration::from_secs);
    let image = relay.relay(&query.url, timeout).await?;

    let disposition = format!("inline; filename=\"{}\"", image.filename);
    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(image.body),
    )
        .into_response())
}
