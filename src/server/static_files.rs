use std::path::{Component, Path, PathBuf};
use hyper::{header, Method, Response, StatusCode};
use bytes::Bytes;
use http_body_util::Full;
use tracing::debug;
use crate::proxy::build_error_response;

const INDEX_FILE: &str = "index.html";

/// 번들 출력 디렉토리를 서빙합니다.
///
/// 존재하지 않는 경로는 SPA 라우팅을 위해 `index.html`로 대체합니다.
/// 단, 번들 에셋 디렉토리 아래의 경로는 대체하지 않고 404를 반환합니다.
#[derive(Clone, Debug)]
pub struct StaticFiles {
    root: PathBuf,
    assets_dir: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            assets_dir: assets_dir.into(),
        }
    }

    pub async fn serve(&self, method: &Method, path: &str) -> Response<Full<Bytes>> {
        if method != Method::GET && method != Method::HEAD {
            return build_error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string());
        }

        let Some(relative) = sanitize(path) else {
            return build_error_response(StatusCode::NOT_FOUND, "Not Found".to_string());
        };

        let file = match self.resolve(&relative).await {
            Some(file) => file,
            None => return build_error_response(StatusCode::NOT_FOUND, "Not Found".to_string()),
        };

        match tokio::fs::read(&file).await {
            Ok(contents) => {
                debug!(file = %file.display(), "정적 파일 응답");
                let body = if method == Method::HEAD {
                    Bytes::new()
                } else {
                    Bytes::from(contents)
                };
                let mut response = Response::new(Full::new(body));
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    header::HeaderValue::from_static(content_type(&file)),
                );
                response
            }
            Err(e) => build_error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("파일 읽기 실패: {}", e)),
        }
    }

    // 요청 파일 → 디렉토리 index → 루트 index 순서로 찾음
    async fn resolve(&self, relative: &Path) -> Option<PathBuf> {
        let candidate = self.root.join(relative);
        if is_file(&candidate).await {
            return Some(candidate);
        }

        // 해시된 번들 파일이 없을 때 HTML을 돌려주면 브라우저가 스크립트로 해석함
        if relative.starts_with(&self.assets_dir) {
            return None;
        }

        let dir_index = candidate.join(INDEX_FILE);
        if is_file(&dir_index).await {
            return Some(dir_index);
        }

        let fallback = self.root.join(INDEX_FILE);
        if is_file(&fallback).await {
            debug!(path = %relative.display(), "SPA fallback");
            return Some(fallback);
        }

        None
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

/// 요청 경로를 루트 기준 상대 경로로 바꿉니다. 상위 디렉토리 탈출은 거부합니다.
fn sanitize(path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.trim_start_matches('/'));
    let mut clean = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(clean)
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
