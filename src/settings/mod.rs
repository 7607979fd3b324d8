use std::{env, fs, path::Path};
use serde::Deserialize;
use tracing::debug;
use crate::endpoints::ConfigResolver;
use crate::routing::RouteTable;

mod server;
pub mod logging;
mod build;
mod endpoints;
mod proxy;
mod error;

pub use server::ServerSettings;
pub use logging::LogSettings;
pub use build::BuildSettings;
pub use endpoints::EndpointSettings;
pub use proxy::{
    build_route_table, default_proxy_routes, ProxyRouteSettings,
    DEFAULT_PROXY_PREFIXES, DEFAULT_UPSTREAM,
};
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;
pub use server::{parse_env_list, parse_env_var};

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_FILE_ENV: &str = "ANITOOL_CONFIG_FILE";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // 개발 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    // 번들 출력 설정
    #[serde(default)]
    pub build: BuildSettings,

    /// API 엔드포인트 설정
    #[serde(default)]
    pub endpoints: EndpointSettings,

    /// 프록시 라우트 (선언 순서 = 매칭 우선순위)
    #[serde(default = "proxy::default_routes")]
    pub proxy: Vec<ProxyRouteSettings>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var(CONFIG_FILE_ENV) {
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings = Self::from_toml_str(&content)?;
        debug!(path = %path.as_ref().display(), "TOML 설정 파일 로드 완료");
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            build: BuildSettings::from_env()?,
            endpoints: EndpointSettings::from_env()?,
            proxy: proxy::routes_from_env()?,
        };

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    ///
    /// 중복된 프록시 접두사, 필수 엔드포인트 누락, 라우트가 없는 엔드포인트는
    /// 모두 시작을 거부하는 오류입니다.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.build.validate()?;

        let table = self.route_table()?;
        self.resolver()?.validate_against(&table)?;

        Ok(())
    }

    pub fn route_table(&self) -> Result<RouteTable> {
        build_route_table(&self.proxy)
    }

    pub fn resolver(&self) -> Result<ConfigResolver> {
        self.endpoints.resolver()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            logging: LogSettings::default(),
            build: BuildSettings::default(),
            endpoints: EndpointSettings::default(),
            proxy: proxy::default_routes(),
        }
    }
}
