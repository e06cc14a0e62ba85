// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json};
use std::sync::Arc;

use crate::{
    application::dto::{requests::LoginRequestDto, responses::MessageResponse},
    engines::session::SessionManager,
    presentation::{errors::AppError, extractors::validated::ValidatedJson},
    utils::errors::ServiceError,
};

pub async fn login(
    Extension(sessions): Extension<Arc<SessionManager>>,
    ValidatedJson(request): ValidatedJson<LoginRequestDto>,
) -> Result<Json<MessageResponse>, AppError> {
    if sessions.login(&request.username, &request.password).await {
        Ok(Json(MessageResponse {
            message: "Login successful".to_string(),
        }))
    } else {
        Err(ServiceError::Auth("Login failed".to_string()).into())
    }
}
