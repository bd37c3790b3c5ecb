use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_DISPOSITION},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub file: Option<String>,
}

pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let hits = state.repository.search(query.text.as_deref().unwrap_or_default()).await?;
    Ok(([(CACHE_CONTROL, "no-cache")], Json(hits)))
}

/// Stream a repository file as an attachment.
pub async fn download(
    State(state): State<ServerState>,
    Query(query): Query<DownloadQuery>,
    req: Request,
) -> Result<Response, ApiError> {
    let file = query
        .file
        .filter(|f| !f.is_empty())
        .ok_or(ApiError::new(StatusCode::BAD_REQUEST, "File path is required"))?;
    let (path, name) = state.repository.open_download(&file).await?;

    let res = match ServeFile::new(&path).oneshot(req).await {
        Ok(res) => res,
        Err(never) => match never {},
    };
    let mut res = res.map(Body::new);
    res.headers_mut().insert(CONTENT_DISPOSITION, attachment_disposition(&name));
    res.headers_mut().insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(res.into_response())
}

/// RFC 5987 `attr-char` minus alphanumerics; everything else is percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// `attachment; filename="..."`, with an RFC 5987 `filename*` when the name
/// is not plain printable ASCII.
fn attachment_disposition(name: &str) -> HeaderValue {
    let fallback: String = name
        .chars()
        .map(|c| if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let mut value = format!("attachment; filename=\"{fallback}\"");
    if fallback != name {
        value.push_str(&format!("; filename*=UTF-8''{}", utf8_percent_encode(name, ATTR_CHAR)));
    }
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
