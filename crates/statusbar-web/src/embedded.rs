//! 위젯 페이지 임베드 및 서빙.
//!
//! rust-embed로 `assets` 디렉토리를 바이너리에 포함한다.

use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

use crate::error::ApiError;

/// 위젯 페이지 임베드
#[derive(Embed)]
#[folder = "assets"]
#[include = "*.html"]
#[include = "*.css"]
#[include = "*.js"]
struct Assets;

/// 정적 파일 서빙 fallback 핸들러
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref()),
                    (header::CACHE_CONTROL, "no-cache"),
                ],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => ApiError::NotFound(format!("파일 {path}")).into_response(),
    }
}
