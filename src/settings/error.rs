use std::fmt;

use crate::endpoints::EndpointError;
use crate::routing::RoutingError;

/// 시작 시점의 설정 오류입니다. 발생하면 프로세스는 시작을 거부합니다.
#[derive(Debug)]
pub enum SettingsError {
    EnvVarInvalid {
        var_name: String,
        value: String,
        reason: String,
    },
    FileError {
        path: String,
        error: std::io::Error,
    },
    ParseError {
        source: toml::de::Error,
    },
    Routing(RoutingError),
    Endpoint(EndpointError),
    InvalidConfig(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVarInvalid { var_name, value, reason } =>
                write!(f, "환경 변수 {} 값 {} 오류: {}", var_name, value, reason),
            Self::FileError { path, error } =>
                write!(f, "설정 파일 {} 오류: {}", path, error),
            Self::ParseError { source } =>
                write!(f, "설정 파싱 오류: {}", source),
            Self::Routing(e) =>
                write!(f, "프록시 라우트 설정 오류: {}", e),
            Self::Endpoint(e) =>
                write!(f, "엔드포인트 설정 오류: {}", e),
            Self::InvalidConfig(msg) =>
                write!(f, "잘못된 설정: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ParseError { source } => Some(source),
            Self::FileError { error, .. } => Some(error),
            Self::Routing(e) => Some(e),
            Self::Endpoint(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RoutingError> for SettingsError {
    fn from(err: RoutingError) -> Self {
        SettingsError::Routing(err)
    }
}

impl From<EndpointError> for SettingsError {
    fn from(err: EndpointError) -> Self {
        SettingsError::Endpoint(err)
    }
}
