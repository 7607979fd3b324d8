use std::collections::BTreeMap;

use serde::Serialize;

use crate::endpoints::EndpointError;

/// 항상 존재해야 하는 엔드포인트 이름
pub const REQUIRED_ENDPOINTS: [&str; 2] = ["MATCH", "REPLY"];

/// 논리 이름 → 상대 경로 매핑입니다.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EndpointSet {
    paths: BTreeMap<String, String>,
}

impl EndpointSet {
    /// 모든 경로가 상대 경로인지 검증한 뒤 생성합니다.
    pub fn new(paths: BTreeMap<String, String>) -> Result<Self, EndpointError> {
        for (name, path) in &paths {
            if !is_relative_path(path) {
                return Err(EndpointError::RelativePathRequired {
                    name: name.clone(),
                    path: path.clone(),
                });
            }
        }
        Ok(Self { paths })
    }

    /// 필수 엔드포인트가 모두 있는지 확인합니다.
    pub fn require(&self, names: &[&str]) -> Result<(), EndpointError> {
        match names.iter().find(|name| !self.paths.contains_key(**name)) {
            Some(name) => Err(EndpointError::MissingEndpoint {
                name: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for EndpointSet {
    fn default() -> Self {
        Self {
            paths: default_endpoint_paths(),
        }
    }
}

pub fn default_endpoint_paths() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("MATCH".to_string(), "/search/match".to_string()),
        ("REPLY".to_string(), "/search/reply".to_string()),
    ])
}

// 스킴, 호스트, 프로토콜 상대 경로(`//host`)를 모두 거부
pub(super) fn is_relative_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains("://")
        && !path.chars().any(|c| c.is_ascii_control() || c.is_whitespace())
}
