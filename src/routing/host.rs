use std::net::IpAddr;

use hyper::header;
use tracing::warn;

use crate::routing::RoutingError;

/// 호스트 정보를 담는 불변 데이터 구조입니다.
///
/// # 필드
///
/// * `name` - 호스트 이름 (예: "anitool.haruyuki.cn")
/// * `port` - 선택적 포트 번호
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostInfo {
    pub name: String,
    pub port: Option<u16>,
}

impl HostInfo {
    /// 호스트 헤더 값에서 HostInfo를 생성합니다.
    ///
    /// # 예제
    ///
    /// ```
    /// use anitool_devproxy::routing::HostInfo;
    ///
    /// let host_info = HostInfo::from_header_value("localhost:5173").unwrap();
    /// assert_eq!(host_info.name, "localhost");
    /// assert_eq!(host_info.port, Some(5173));
    /// ```
    pub fn from_header_value(value: &str) -> Result<Self, RoutingError> {
        let invalid_host = || RoutingError::InvalidHost {
            host: value.to_string(),
            reason: "Invalid format".to_string(),
        };

        if value.is_empty() {
            return Err(invalid_host());
        }

        // IPv6 리터럴: [::1] 또는 [::1]:5173
        if let Some(rest) = value.strip_prefix('[') {
            let (addr, tail) = rest.split_once(']').ok_or_else(invalid_host)?;
            if addr.is_empty() {
                return Err(invalid_host());
            }
            let port = match tail {
                "" => None,
                _ => Some(Self::parse_port(tail.strip_prefix(':').ok_or_else(invalid_host)?)?),
            };
            return Ok(HostInfo {
                name: format!("[{}]", addr),
                port,
            });
        }

        // 호스트와 포트 분리
        let parts: Vec<&str> = value.split(':').collect();
        match parts.len() {
            1 => Ok(HostInfo {
                name: value.to_string(),
                port: None,
            }),
            2 => {
                if parts[0].is_empty() || parts[1].is_empty() {
                    return Err(invalid_host());
                }

                Ok(HostInfo {
                    name: parts[0].to_string(),
                    port: Some(Self::parse_port(parts[1])?),
                })
            }
            _ => Err(invalid_host()),
        }
    }

    fn parse_port(port: &str) -> Result<u16, RoutingError> {
        let parsed = port.parse::<u16>().map_err(|_| RoutingError::InvalidPort {
            port: port.to_string(),
            reason: "Invalid format".to_string(),
        })?;

        if parsed == 0 {
            return Err(RoutingError::InvalidPort {
                port: port.to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        Ok(parsed)
    }

    /// HTTP 요청의 Host 헤더에서 호스트 정보를 추출합니다.
    pub fn from_request<B>(req: &hyper::Request<B>) -> Result<Self, RoutingError> {
        let host = match req.headers().get(header::HOST) {
            Some(value) => value,
            None => return Err(RoutingError::MissingHost),
        };

        let host_str = host.to_str().map_err(|e| RoutingError::HeaderParseError {
            header_name: "Host".to_string(),
            error: e.to_string(),
        })?;

        Self::from_header_value(host_str)
    }

    /// localhost 또는 IP 리터럴인지 여부
    pub fn is_loopback_or_ip(&self) -> bool {
        let name = self.name.to_ascii_lowercase();
        if name == "localhost" || name.ends_with(".localhost") {
            return true;
        }
        name.trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok()
    }
}

/// 허용된 Host 헤더 값만 통과시키는 필터입니다.
///
/// `localhost`, `*.localhost`, IP 주소는 목록과 관계없이 항상 허용됩니다.
#[derive(Clone, Debug, Default)]
pub struct HostFilter {
    allowed: Vec<String>,
}

impl HostFilter {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|host| host.as_ref().trim().to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
        }
    }

    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed
    }

    pub fn is_allowed(&self, host: &HostInfo) -> bool {
        if host.is_loopback_or_ip() {
            return true;
        }
        let name = host.name.to_ascii_lowercase();
        self.allowed.iter().any(|allowed| *allowed == name)
    }

    /// 요청의 Host 헤더를 검사합니다.
    pub fn check<B>(&self, req: &hyper::Request<B>) -> Result<HostInfo, RoutingError> {
        let host = HostInfo::from_request(req)?;
        if self.is_allowed(&host) {
            Ok(host)
        } else {
            warn!(
                host = %host.name,
                allowed = ?self.allowed,
                "허용되지 않은 호스트의 요청 차단"
            );
            Err(RoutingError::HostNotAllowed { host: host.name })
        }
    }
}
