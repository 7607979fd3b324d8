use tracing::info;
use crate::endpoints::ConfigResolver;
use crate::routing::{HostFilter, RouteTable};
use crate::settings::{Result, Settings};

/// 프로세스 시작 시 한 번 생성되는 불변 설정 묶음입니다.
///
/// 전역 상수 대신 `Arc<AppContext>`로 필요한 컴포넌트에 명시적으로 전달합니다.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub settings: Settings,
    pub routes: RouteTable,
    pub resolver: ConfigResolver,
    pub host_filter: HostFilter,
}

impl AppContext {
    /// 설정을 검증하고 라우팅 테이블과 리졸버를 생성합니다.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        settings.server.validate()?;
        settings.build.validate()?;

        let routes = settings.route_table()?;
        let resolver = settings.resolver()?;
        resolver.validate_against(&routes)?;
        let host_filter = HostFilter::new(&settings.server.allowed_hosts);

        for (name, path) in resolver.endpoints().iter() {
            info!(endpoint = %name, path = %path, "엔드포인트 등록");
        }

        Ok(Self {
            settings,
            routes,
            resolver,
            host_filter,
        })
    }
}
