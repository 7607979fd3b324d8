use std::process::ExitCode;
use std::sync::Arc;
use anitool_devproxy::{
    context::AppContext,
    logging,
    server::{self, RequestHandler, ServerListener},
    settings::Settings,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 로깅 초기화 전에 실패할 수 있으므로 stderr에도 남김
            eprintln!("개발 서버 실행 실패: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> server::Result<()> {
    let settings = Settings::load()?;
    let _log_guard = logging::init_logging(&settings.logging);

    // 잘못된 설정이면 시작하지 않음
    let context = match AppContext::from_settings(settings) {
        Ok(context) => Arc::new(context),
        Err(e) => {
            error!(error = %e, "설정 검증 실패");
            return Err(e.into());
        }
    };

    let addr = context.settings.server.bind_addr()?;
    let listener = ServerListener::bind(addr).await?;

    info!(
        addr = %addr,
        allowed_hosts = ?context.host_filter.allowed_hosts(),
        routes = context.routes.len(),
        "개발 서버 시작"
    );

    let handler = Arc::new(RequestHandler::new(context));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "종료 시그널 대기 실패");
        }
    };

    listener.run_until(handler, shutdown).await
}
