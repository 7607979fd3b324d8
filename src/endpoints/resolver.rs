use tracing::debug;
use url::Url;

use crate::endpoints::{set::is_relative_path, EndpointError, EndpointSet};
use crate::routing::{Decision, RouteTable};

/// 정적 이미지가 마운트되는 경로
const IMAGE_MOUNT: &str = "/images";

/// 논리 엔드포인트 이름과 이미지 경로를 실제 요청 경로로 변환합니다.
///
/// 기본 URL이 비어 있으면 모든 결과는 같은 오리진 기준의 상대 경로입니다.
#[derive(Clone, Debug)]
pub struct ConfigResolver {
    api_base_url: String,
    image_base_url: String,
    endpoints: EndpointSet,
}

impl ConfigResolver {
    pub fn new(
        api_base_url: &str,
        image_base_url: &str,
        endpoints: EndpointSet,
    ) -> Result<Self, EndpointError> {
        Ok(Self {
            api_base_url: normalize_base_url("API_BASE_URL", api_base_url)?,
            image_base_url: normalize_base_url("IMAGE_BASE_URL", image_base_url)?,
            endpoints,
        })
    }

    /// 엔드포인트 이름에 해당하는 요청 경로를 반환합니다.
    ///
    /// # 예제
    ///
    /// ```
    /// use anitool_devproxy::endpoints::{ConfigResolver, EndpointSet};
    ///
    /// let resolver = ConfigResolver::new("", "", EndpointSet::default()).unwrap();
    /// assert_eq!(resolver.resolve_endpoint("MATCH").unwrap(), "/search/match");
    /// assert!(resolver.resolve_endpoint("NONEXISTENT").is_err());
    /// ```
    pub fn resolve_endpoint(&self, name: &str) -> Result<String, EndpointError> {
        let path = self.endpoints.get(name).ok_or_else(|| EndpointError::UnknownEndpoint {
            name: name.to_string(),
            available: self.endpoints.names().map(str::to_string).collect(),
        })?;

        Ok(format!("{}{}", self.api_base_url, path))
    }

    /// 이미지 리소스의 기본 경로 (빈 문자열이면 같은 오리진)
    pub fn base_image_path(&self) -> &str {
        &self.image_base_url
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// 저장된 이미지 경로를 웹 경로로 변환합니다.
    ///
    /// 이미 `http`로 시작하는 값은 그대로 반환하고, 나머지는 `/images/` 아래에 붙입니다.
    ///
    /// ```
    /// use anitool_devproxy::endpoints::{ConfigResolver, EndpointSet};
    ///
    /// let resolver = ConfigResolver::new("", "", EndpointSet::default()).unwrap();
    /// assert_eq!(resolver.image_url("haruhi/ep01/01.jpg"), "/images/haruhi/ep01/01.jpg");
    /// ```
    pub fn image_url(&self, stored_path: &str) -> String {
        if stored_path.is_empty() {
            return String::new();
        }
        if stored_path.starts_with("http") {
            return stored_path.to_string();
        }

        let clean = stored_path.trim_matches(|c| c == '/' || c == '\\');
        format!("{}{}/{}", self.image_base_url, IMAGE_MOUNT, clean)
    }

    /// 모든 엔드포인트가 프록시 라우트로 전달되는지 검증합니다.
    ///
    /// 프론트엔드가 실제로 요청하는 경로(기본 URL 포함)를 기준으로 검사합니다.
    /// 로컬 정적 파이프라인으로 빠지는 엔드포인트는 배포 설정 오류로 취급합니다.
    /// 기본 URL이 절대 URL이면 요청이 개발 서버를 거치지 않으므로 검사하지 않습니다.
    pub fn validate_against(&self, table: &RouteTable) -> Result<(), EndpointError> {
        if !self.api_base_url.is_empty() && !self.api_base_url.starts_with('/') {
            debug!(api_base_url = %self.api_base_url, "외부 API 오리진, 라우트 검증 생략");
            return Ok(());
        }

        for name in self.endpoints.names() {
            let path = self.resolve_endpoint(name)?;
            match table.match_path(&path) {
                Ok(Decision::Forward { target_origin, .. }) => {
                    debug!(endpoint = %name, path = %path, target = %target_origin, "엔드포인트 라우트 확인");
                }
                Ok(Decision::Local) | Err(_) => {
                    return Err(EndpointError::EndpointNotRouted {
                        name: name.to_string(),
                        path,
                    });
                }
            }
        }
        Ok(())
    }
}

fn normalize_base_url(var_name: &str, value: &str) -> Result<String, EndpointError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }

    let invalid = |reason: String| EndpointError::InvalidBaseUrl {
        var_name: var_name.to_string(),
        value: value.to_string(),
        reason,
    };

    if value.starts_with('/') {
        if !is_relative_path(value) {
            return Err(invalid("'/'로 시작하는 단순 경로여야 합니다".to_string()));
        }
        if value.contains(['?', '#']) {
            return Err(invalid("쿼리나 프래그먼트를 포함할 수 없습니다".to_string()));
        }
    } else {
        let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("http 또는 https 스킴만 지원합니다".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("쿼리나 프래그먼트를 포함할 수 없습니다".to_string()));
        }
    }

    Ok(value.trim_end_matches('/').to_string())
}
