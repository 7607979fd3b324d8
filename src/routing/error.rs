use std::fmt;

/// 라우팅 관련 에러를 표현하는 열거형입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// 잘못된 요청 경로
    InvalidPath {
        path: String,
        reason: String,
    },
    /// 잘못된 라우트 접두사
    InvalidPrefix {
        prefix: String,
        reason: String,
    },
    /// 중복된 라우트 접두사
    DuplicatePrefix {
        prefix: String,
    },
    /// 잘못된 업스트림 오리진
    InvalidTarget {
        target: String,
        reason: String,
    },
    /// 유효하지 않은 호스트 이름
    InvalidHost {
        host: String,
        reason: String,
    },
    /// 유효하지 않은 포트 번호
    InvalidPort {
        port: String,
        reason: String,
    },
    /// Host 헤더 누락
    MissingHost,
    /// 허용 목록에 없는 호스트
    HostNotAllowed {
        host: String,
    },
    /// 헤더 파싱 에러
    HeaderParseError {
        header_name: String,
        error: String,
    },
}

impl RoutingError {
    /// 시작 시점에 발견되는 설정 오류인지 여부
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RoutingError::InvalidPrefix { .. }
                | RoutingError::DuplicatePrefix { .. }
                | RoutingError::InvalidTarget { .. }
        )
    }
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::InvalidPath { path, reason } =>
                write!(f, "잘못된 요청 경로 {:?}: {}", path, reason),
            RoutingError::InvalidPrefix { prefix, reason } =>
                write!(f, "잘못된 라우트 접두사 {:?}: {}", prefix, reason),
            RoutingError::DuplicatePrefix { prefix } =>
                write!(f, "중복된 라우트 접두사: {}", prefix),
            RoutingError::InvalidTarget { target, reason } =>
                write!(f, "잘못된 업스트림 오리진 {}: {}", target, reason),
            RoutingError::InvalidHost { host, reason } =>
                write!(f, "유효하지 않은 호스트 {}: {}", host, reason),
            RoutingError::InvalidPort { port, reason } =>
                write!(f, "유효하지 않은 포트 {}: {}", port, reason),
            RoutingError::MissingHost =>
                write!(f, "Host 헤더가 누락됨"),
            RoutingError::HostNotAllowed { host } =>
                write!(f, "허용되지 않은 호스트: {}", host),
            RoutingError::HeaderParseError { header_name, error } =>
                write!(f, "{} 헤더 파싱 실패: {}", header_name, error),
        }
    }
}

impl std::error::Error for RoutingError {}
