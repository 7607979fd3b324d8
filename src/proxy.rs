use std::fmt;
use hyper::{Request, Response, StatusCode, Uri};
use bytes::Bytes;
use hyper::body::Incoming;
use hyper::header::{self, HeaderValue};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::{debug, instrument};
use crate::routing::TargetOrigin;

#[derive(Debug)]
pub enum ProxyError {
    InvalidUri {
        uri: String,
        error: hyper::http::uri::InvalidUri,
    },
    InvalidHeader {
        header_name: String,
        error: header::InvalidHeaderValue,
    },
    Upstream(legacy::Error),
    Body(hyper::Error),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidUri { .. } | ProxyError::InvalidHeader { .. } => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) | ProxyError::Body(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::InvalidUri { uri, error } =>
                write!(f, "업스트림 URI {} 생성 실패: {}", uri, error),
            ProxyError::InvalidHeader { header_name, error } =>
                write!(f, "{} 헤더 생성 실패: {}", header_name, error),
            ProxyError::Upstream(e) =>
                write!(f, "업스트림 요청 실패: {}", e),
            ProxyError::Body(e) =>
                write!(f, "업스트림 응답 본문 수집 실패: {}", e),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::InvalidUri { error, .. } => Some(error),
            ProxyError::InvalidHeader { error, .. } => Some(error),
            ProxyError::Upstream(e) => Some(e),
            ProxyError::Body(e) => Some(e),
        }
    }
}

/// 업스트림으로 요청을 전달하는 HTTP 클라이언트입니다.
#[derive(Clone)]
pub struct ProxyClient {
    client: legacy::Client<HttpConnector, Incoming>,
}

impl ProxyClient {
    pub fn new() -> Self {
        let connector = HttpConnector::new();
        let client = legacy::Client::builder(TokioExecutor::new())
            .build::<_, Incoming>(connector);

        Self { client }
    }

    #[instrument(skip(self, req, target), fields(upstream = %target))]
    pub async fn forward(
        &self,
        req: Request<Incoming>,
        target: &TargetOrigin,
        rewrite_origin: bool,
    ) -> Result<Response<Full<Bytes>>, ProxyError> {
        let proxied_req = build_forward_request(req, target, rewrite_origin)?;
        debug!(uri = %proxied_req.uri(), "업스트림으로 요청 전달");

        let res = self.client.request(proxied_req).await.map_err(ProxyError::Upstream)?;
        let (parts, body) = res.into_parts();
        let bytes = body.collect().await.map_err(ProxyError::Body)?.to_bytes();
        debug!(status = %parts.status, bytes_size = bytes.len(), "업스트림 응답 수집");

        Ok(Response::from_parts(parts, Full::new(bytes)))
    }
}

impl Default for ProxyClient {
    fn default() -> Self {
        Self::new()
    }
}

/// 업스트림으로 보낼 요청을 만듭니다.
///
/// 경로와 쿼리는 그대로 유지합니다. `rewrite_origin`이 켜져 있으면 `Host` 헤더를
/// 업스트림 authority로, 기존 `Origin` 헤더를 업스트림 오리진으로 바꿉니다.
pub fn build_forward_request<B>(
    req: Request<B>,
    target: &TargetOrigin,
    rewrite_origin: bool,
) -> Result<Request<B>, ProxyError> {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let upstream = target.join(path_and_query);
    let uri: Uri = upstream.parse().map_err(|error| ProxyError::InvalidUri {
        uri: upstream.clone(),
        error,
    })?;

    let (mut parts, body) = req.into_parts();
    parts.uri = uri;

    if rewrite_origin {
        let authority = target.authority();
        let host = HeaderValue::from_str(&authority).map_err(|error| ProxyError::InvalidHeader {
            header_name: "Host".to_string(),
            error,
        })?;
        parts.headers.insert(header::HOST, host);

        if parts.headers.contains_key(header::ORIGIN) {
            let origin = HeaderValue::from_str(target.as_str()).map_err(|error| ProxyError::InvalidHeader {
                header_name: "Origin".to_string(),
                error,
            })?;
            parts.headers.insert(header::ORIGIN, origin);
        }
    }

    Ok(Request::from_parts(parts, body))
}

pub fn error_response(error: &ProxyError) -> Response<Full<Bytes>> {
    build_error_response(error.status_code(), error.to_string())
}

pub fn build_error_response(status: StatusCode, message: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(message)));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Empty;

    fn request(path: &str) -> Request<Empty<Bytes>> {
        Request::builder()
            .uri(path)
            .header(header::HOST, "anitool.haruyuki.cn")
            .header(header::ORIGIN, "http://anitool.haruyuki.cn")
            .body(Empty::new())
            .unwrap()
    }

    #[test]
    fn test_build_forward_request_with_rewrite() {
        let target = TargetOrigin::parse("http://127.0.0.1:11325").unwrap();
        let req = build_forward_request(request("/search/match?scope=2"), &target, true).unwrap();

        assert_eq!(req.uri(), "http://127.0.0.1:11325/search/match?scope=2");
        assert_eq!(req.headers()[header::HOST], "127.0.0.1:11325");
        assert_eq!(req.headers()[header::ORIGIN], "http://127.0.0.1:11325");
    }

    #[test]
    fn test_build_forward_request_without_rewrite() {
        let target = TargetOrigin::parse("http://127.0.0.1:11325").unwrap();
        let req = build_forward_request(request("/images/a.png"), &target, false).unwrap();

        assert_eq!(req.uri(), "http://127.0.0.1:11325/images/a.png");
        assert_eq!(req.headers()[header::HOST], "anitool.haruyuki.cn");
        assert_eq!(req.headers()[header::ORIGIN], "http://anitool.haruyuki.cn");
    }

    #[test]
    fn test_origin_header_is_not_added() {
        let target = TargetOrigin::parse("http://127.0.0.1:11325").unwrap();
        let req = Request::builder()
            .uri("/scene/search")
            .body(Empty::<Bytes>::new())
            .unwrap();
        let req = build_forward_request(req, &target, true).unwrap();

        assert!(!req.headers().contains_key(header::ORIGIN));
        assert_eq!(req.headers()[header::HOST], "127.0.0.1:11325");
    }
}
