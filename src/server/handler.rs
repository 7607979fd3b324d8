use std::sync::Arc;
use std::time::Instant;
use hyper::{Request, Response, StatusCode};
use http_body_util::Full;
use bytes::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use tracing::debug;
use uuid::Uuid;
use crate::{
    context::AppContext,
    logging::{log_request, RequestLog},
    proxy::{self, build_error_response, ProxyClient},
    routing::{Decision, RoutingError},
};
use super::StaticFiles;

pub struct RequestHandler {
    context: Arc<AppContext>,
    proxy_client: ProxyClient,
    static_files: StaticFiles,
}

impl RequestHandler {
    pub fn new(context: Arc<AppContext>) -> Self {
        let build = &context.settings.build;
        let static_files = StaticFiles::new(build.out_dir.clone(), build.assets_dir.as_str());
        Self {
            context,
            proxy_client: ProxyClient::new(),
            static_files,
        }
    }

    /// Host 헤더를 검사한 뒤 요청 경로에 대한 라우팅 결정을 내립니다.
    pub fn route<B>(&self, req: &Request<B>) -> Result<Decision, RoutingError> {
        self.context.host_filter.check(req)?;
        self.context.routes.match_path(req.uri().path())
    }

    pub async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, std::convert::Infallible> {
        let start_time = Instant::now();
        let mut log = RequestLog::new(Uuid::new_v4().to_string());
        log.with_request(&req);

        // 1. Host 검사 및 라우팅
        let response = match self.route(&req) {
            Ok(decision) => {
                log.with_decision(&decision);
                match decision {
                    // 2. 업스트림 전달
                    Decision::Forward { target_origin, rewrite_origin } => {
                        match self.proxy_client.forward(req, &target_origin, rewrite_origin).await {
                            Ok(response) => response,
                            Err(e) => {
                                log.with_error(&e);
                                proxy::error_response(&e)
                            }
                        }
                    }
                    // 3. 로컬 정적 파일
                    Decision::Local => {
                        debug!(path = %req.uri().path(), "로컬 정적 파일 처리");
                        let method = req.method().clone();
                        let path = req.uri().path().to_string();
                        self.static_files.serve(&method, &path).await
                    }
                }
            }
            Err(e) => Self::create_routing_error_response(e),
        };

        log.with_response(response.status());
        log.duration_ms = start_time.elapsed().as_millis() as u64;
        log_request(&log);

        Ok(response)
    }

    fn create_routing_error_response(error: RoutingError) -> Response<Full<Bytes>> {
        let status = match error {
            RoutingError::HostNotAllowed { .. } |
            RoutingError::MissingHost => StatusCode::FORBIDDEN,
            RoutingError::InvalidHost { .. } |
            RoutingError::InvalidPort { .. } |
            RoutingError::HeaderParseError { .. } |
            RoutingError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
            RoutingError::InvalidPrefix { .. } |
            RoutingError::DuplicatePrefix { .. } |
            RoutingError::InvalidTarget { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        build_error_response(status, format!("Error: {}", error))
    }

    pub async fn handle_connection<I>(&self, io: I) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(|req| self.handle_request(req)),
            )
            .await
            .map_err(|e| e.into())
    }
}
