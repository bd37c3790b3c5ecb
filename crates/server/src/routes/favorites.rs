use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE, VARY},
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;
use service::model::FileRefList;
use tracing::debug;

use super::ServerState;
use crate::errors::{ApiError, JsonApiError};

/// Body of the add/remove endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FavoriteRequest {
    #[serde(rename = "fileId", default)]
    pub file_id: Option<String>,
}

/// `fileId` taken from a JSON or `application/x-www-form-urlencoded` body.
///
/// A missing or unparseable body yields an empty id, which the service
/// rejects as a validation error.
#[derive(Debug, Default)]
pub struct FileIdBody(pub String);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for FileIdBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = if is_form(&req) {
            Form::<FavoriteRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| e.to_string())
        } else {
            Json::<FavoriteRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| e.to_string())
        };
        match parsed {
            Ok(body) => Ok(Self(body.file_id.unwrap_or_default())),
            Err(error) => {
                debug!(%error, "favorites body rejected");
                Ok(Self::default())
            }
        }
    }
}

fn no_cache(list: FileRefList) -> impl IntoResponse {
    ([(CACHE_CONTROL, "no-cache")], Json(list))
}

pub async fn list_favorites(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let list = state.favorites.list(&user_id).await?;
    Ok(([(CACHE_CONTROL, "private, max-age=300"), (VARY, "Cookie")], Json(list)))
}

pub async fn add_favorite(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    FileIdBody(file_id): FileIdBody,
) -> Result<impl IntoResponse, JsonApiError> {
    let list = state.favorites.add(&user_id, &file_id).await?;
    Ok(no_cache(list))
}

pub async fn remove_favorite(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    FileIdBody(file_id): FileIdBody,
) -> Result<impl IntoResponse, JsonApiError> {
    let list = state.favorites.remove(&user_id, &file_id).await?;
    Ok(no_cache(list))
}
