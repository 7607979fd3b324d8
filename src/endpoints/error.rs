use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// 등록되지 않은 엔드포인트 이름
    UnknownEndpoint {
        name: String,
        available: Vec<String>,
    },
    /// 필수 엔드포인트 누락
    MissingEndpoint {
        name: String,
    },
    /// 스킴이나 호스트가 포함된 엔드포인트 경로
    RelativePathRequired {
        name: String,
        path: String,
    },
    /// 프록시 라우트가 없는 엔드포인트
    EndpointNotRouted {
        name: String,
        path: String,
    },
    /// 잘못된 기본 URL
    InvalidBaseUrl {
        var_name: String,
        value: String,
        reason: String,
    },
}

impl EndpointError {
    pub fn is_config_error(&self) -> bool {
        !matches!(self, EndpointError::UnknownEndpoint { .. })
    }
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEndpoint { name, available } =>
                write!(f, "알 수 없는 엔드포인트 {} (사용 가능한 엔드포인트: {:?})", name, available),
            Self::MissingEndpoint { name } =>
                write!(f, "필수 엔드포인트 누락: {}", name),
            Self::RelativePathRequired { name, path } =>
                write!(f, "엔드포인트 {}의 경로 {:?}는 '/'로 시작하는 상대 경로여야 합니다", name, path),
            Self::EndpointNotRouted { name, path } =>
                write!(f, "엔드포인트 {}의 경로 {}를 처리할 프록시 라우트가 없습니다", name, path),
            Self::InvalidBaseUrl { var_name, value, reason } =>
                write!(f, "{} 값 {:?} 오류: {}", var_name, value, reason),
        }
    }
}

impl std::error::Error for EndpointError {}
