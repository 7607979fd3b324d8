use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use crate::endpoints::{default_endpoint_paths, ConfigResolver, EndpointSet, REQUIRED_ENDPOINTS};
use super::SettingsError;

/// API 및 이미지 경로 설정
#[derive(Clone, Debug, Deserialize)]
pub struct EndpointSettings {
    /// 모든 엔드포인트 경로 앞에 붙는 기본 URL (기본값: 빈 문자열)
    #[serde(default)]
    pub api_base_url: String,

    /// 이미지 경로 앞에 붙는 기본 URL (기본값: 빈 문자열)
    #[serde(default)]
    pub image_base_url: String,

    /// 논리 이름 → 상대 경로
    #[serde(default = "default_endpoint_paths")]
    pub paths: BTreeMap<String, String>,
}

impl EndpointSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            api_base_url: env::var("API_BASE_URL").unwrap_or_default(),
            image_base_url: env::var("IMAGE_BASE_URL").unwrap_or_default(),
            paths: default_endpoint_paths(),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.resolver().map(|_| ())
    }

    /// 필수 엔드포인트와 상대 경로 규칙을 검증한 리졸버를 생성합니다.
    pub fn resolver(&self) -> Result<ConfigResolver, SettingsError> {
        let endpoints = EndpointSet::new(self.paths.clone())?;
        endpoints.require(&REQUIRED_ENDPOINTS)?;
        Ok(ConfigResolver::new(&self.api_base_url, &self.image_base_url, endpoints)?)
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            image_base_url: String::new(),
            paths: default_endpoint_paths(),
        }
    }
}
