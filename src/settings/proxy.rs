use serde::Deserialize;
use std::env;
use crate::routing::{RouteRule, RouteTable, TargetOrigin};
use super::SettingsError;

/// 기본 업스트림 백엔드
pub const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:11325";

/// 기본으로 프록시되는 접두사 (선언 순서 = 우선순위)
pub const DEFAULT_PROXY_PREFIXES: [&str; 3] = ["/search", "/scene", "/images"];

/// `[[proxy]]` 항목 하나
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProxyRouteSettings {
    pub prefix: String,
    pub target: String,
    #[serde(default = "default_change_origin")]
    pub change_origin: bool,
}

fn default_change_origin() -> bool { true }

impl ProxyRouteSettings {
    pub fn to_rule(&self) -> Result<RouteRule, SettingsError> {
        let origin = TargetOrigin::parse(&self.target)?;
        Ok(RouteRule::new(self.prefix.clone(), origin, self.change_origin)?)
    }
}

/// 모든 기본 접두사를 같은 업스트림으로 보내는 라우트 목록
pub fn default_proxy_routes(upstream: &str) -> Vec<ProxyRouteSettings> {
    DEFAULT_PROXY_PREFIXES
        .iter()
        .map(|prefix| ProxyRouteSettings {
            prefix: prefix.to_string(),
            target: upstream.to_string(),
            change_origin: true,
        })
        .collect()
}

pub fn default_routes() -> Vec<ProxyRouteSettings> {
    default_proxy_routes(DEFAULT_UPSTREAM)
}

pub fn routes_from_env() -> Result<Vec<ProxyRouteSettings>, SettingsError> {
    let upstream = env::var("ANITOOL_UPSTREAM").unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string());
    TargetOrigin::parse(&upstream).map_err(|e| SettingsError::EnvVarInvalid {
        var_name: "ANITOOL_UPSTREAM".to_string(),
        value: upstream.clone(),
        reason: e.to_string(),
    })?;
    Ok(default_proxy_routes(&upstream))
}

/// 선언 순서를 유지한 채 라우팅 테이블을 생성합니다.
pub fn build_route_table(routes: &[ProxyRouteSettings]) -> Result<RouteTable, SettingsError> {
    let rules = routes
        .iter()
        .map(ProxyRouteSettings::to_rule)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RouteTable::new(rules)?)
}
