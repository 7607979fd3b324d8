use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::routing::RoutingError;

/// 업스트림 오리진 (scheme + host + port) 입니다.
///
/// 경로, 쿼리, 프래그먼트, 사용자 정보가 없는 URL만 허용합니다.
///
/// # 예제
///
/// ```
/// use anitool_devproxy::routing::TargetOrigin;
///
/// let origin = TargetOrigin::parse("http://127.0.0.1:11325").unwrap();
/// assert_eq!(origin.as_str(), "http://127.0.0.1:11325");
/// assert_eq!(origin.authority(), "127.0.0.1:11325");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetOrigin {
    url: Url,
    serialized: String,
}

impl TargetOrigin {
    pub fn parse(value: &str) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidTarget {
            target: value.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("http 또는 https 스킴만 지원합니다"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("호스트가 없습니다"));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(invalid("사용자 정보는 허용되지 않습니다"));
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("오리진에는 경로나 쿼리를 포함할 수 없습니다"));
        }

        let serialized = url.origin().ascii_serialization();
        Ok(Self { url, serialized })
    }

    /// `http://host:port` 형식의 직렬화된 오리진
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Host 헤더에 사용할 `host[:port]` 값
    pub fn authority(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// 오리진에 요청 경로(쿼리 포함)를 붙인 업스트림 URL 문자열
    pub fn join(&self, path_and_query: &str) -> String {
        format!("{}{}", self.serialized, path_and_query)
    }
}

impl fmt::Display for TargetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl std::str::FromStr for TargetOrigin {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TargetOrigin {
    type Error = RoutingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TargetOrigin> for String {
    fn from(origin: TargetOrigin) -> Self {
        origin.serialized
    }
}

/// 단일 프록시 라우트 규칙입니다.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteRule {
    prefix: String,
    target_origin: TargetOrigin,
    rewrite_origin: bool,
}

impl RouteRule {
    /// 접두사를 검증한 뒤 규칙을 생성합니다.
    ///
    /// 접두사는 비어 있지 않아야 하며 `/`로 시작해야 합니다.
    pub fn new(
        prefix: impl Into<String>,
        target_origin: TargetOrigin,
        rewrite_origin: bool,
    ) -> Result<Self, RoutingError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(RoutingError::InvalidPrefix {
                prefix,
                reason: "접두사가 비어 있습니다".to_string(),
            });
        }
        if !prefix.starts_with('/') {
            return Err(RoutingError::InvalidPrefix {
                prefix,
                reason: "접두사는 '/'로 시작해야 합니다".to_string(),
            });
        }

        Ok(Self {
            prefix,
            target_origin,
            rewrite_origin,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn target_origin(&self) -> &TargetOrigin {
        &self.target_origin
    }

    pub fn rewrite_origin(&self) -> bool {
        self.rewrite_origin
    }

    /// 순수 문자열 접두사 매칭 (경로 세그먼트를 구분하지 않음)
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}
