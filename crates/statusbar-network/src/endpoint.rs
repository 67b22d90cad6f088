//! 엔드포인트 URL 유도.
//!
//! 페이지 origin에서 상태 스트림 URL(`ws`/`wss`)과 HTTP 폴백 URL을 만든다.
//! origin의 경로/쿼리/프래그먼트는 버리고 고정 경로로 대체한다.

use statusbar_core::error::CoreError;
use url::Url;

/// origin → 상태 스트림 URL
///
/// `https`/`wss` origin은 `wss`, `http`/`ws` origin은 `ws`를 사용한다.
///
/// # Errors
/// origin을 해석할 수 없거나 지원하지 않는 스킴이면 `CoreError::InvalidUrl`
pub fn status_stream_url(origin: &str, path: &str) -> Result<Url, CoreError> {
    let mut url = parse_origin(origin)?;
    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => {
            return Err(CoreError::InvalidUrl(format!(
                "지원하지 않는 스킴: {other} ({origin})"
            )))
        }
    };
    set_scheme(&mut url, scheme, origin)?;
    with_path(url, path)
}

/// origin → HTTP 폴백 URL
///
/// 스트림 스킴으로 지정된 origin도 대응하는 HTTP 스킴으로 바꾼다.
///
/// # Errors
/// origin을 해석할 수 없거나 지원하지 않는 스킴이면 `CoreError::InvalidUrl`
pub fn fallback_url(origin: &str, path: &str) -> Result<Url, CoreError> {
    let mut url = parse_origin(origin)?;
    let scheme = match url.scheme() {
        "https" | "wss" => "https",
        "http" | "ws" => "http",
        other => {
            return Err(CoreError::InvalidUrl(format!(
                "지원하지 않는 스킴: {other} ({origin})"
            )))
        }
    };
    set_scheme(&mut url, scheme, origin)?;
    with_path(url, path)
}

fn parse_origin(origin: &str) -> Result<Url, CoreError> {
    Url::parse(origin.trim()).map_err(|e| CoreError::InvalidUrl(format!("{origin}: {e}")))
}

fn set_scheme(url: &mut Url, scheme: &str, origin: &str) -> Result<(), CoreError> {
    url.set_scheme(scheme)
        .map_err(|()| CoreError::InvalidUrl(format!("스킴 변경 불가: {origin} → {scheme}")))
}

fn with_path(mut url: Url, path: &str) -> Result<Url, CoreError> {
    if !path.starts_with('/') {
        return Err(CoreError::InvalidUrl(format!("경로는 '/'로 시작해야 함: {path}")));
    }
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
