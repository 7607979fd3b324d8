use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::routing::{RouteRule, RoutingError, TargetOrigin};

/// 요청 경로에 대한 라우팅 결정입니다.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// 업스트림 오리진으로 전달
    Forward {
        target_origin: TargetOrigin,
        rewrite_origin: bool,
    },
    /// 로컬 정적 파일 파이프라인에서 처리
    Local,
}

impl Decision {
    pub fn is_forward(&self) -> bool {
        matches!(self, Decision::Forward { .. })
    }
}

/// 접두사 기반 라우팅 테이블입니다.
///
/// 생성 이후에는 변경되지 않으며, 규칙의 선언 순서가 곧 매칭 우선순위입니다.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// 규칙 목록으로 라우팅 테이블을 생성합니다.
    ///
    /// 같은 접두사가 두 번 이상 선언되면 `RoutingError::DuplicatePrefix`를 반환합니다.
    pub fn new(rules: Vec<RouteRule>) -> Result<Self, RoutingError> {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if !seen.insert(rule.prefix()) {
                return Err(RoutingError::DuplicatePrefix {
                    prefix: rule.prefix().to_string(),
                });
            }
        }

        for rule in &rules {
            info!(
                prefix = %rule.prefix(),
                target = %rule.target_origin(),
                rewrite_origin = rule.rewrite_origin(),
                "프록시 라우트 등록"
            );
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 요청 경로에 대한 라우팅 결정을 반환합니다.
    ///
    /// # 예제
    ///
    /// ```
    /// use anitool_devproxy::routing::{Decision, RouteRule, RouteTable, TargetOrigin};
    ///
    /// let origin = TargetOrigin::parse("http://127.0.0.1:11325").unwrap();
    /// let table = RouteTable::new(vec![
    ///     RouteRule::new("/search", origin.clone(), true).unwrap(),
    /// ]).unwrap();
    ///
    /// assert!(table.match_path("/search/match").unwrap().is_forward());
    /// assert_eq!(table.match_path("/index.html").unwrap(), Decision::Local);
    /// ```
    pub fn match_path(&self, path: &str) -> Result<Decision, RoutingError> {
        validate_path(path)?;

        let decision = self
            .rules
            .iter()
            .find(|rule| rule.matches(path))
            .map_or(Decision::Local, |rule| Decision::Forward {
                target_origin: rule.target_origin().clone(),
                rewrite_origin: rule.rewrite_origin(),
            });

        debug!(path = %path, decision = ?decision, "라우팅 결정");
        Ok(decision)
    }
}

fn validate_path(path: &str) -> Result<(), RoutingError> {
    let invalid = |reason: &str| RoutingError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path.is_empty() {
        return Err(invalid("경로가 비어 있습니다"));
    }
    if !path.starts_with('/') {
        return Err(invalid("경로는 '/'로 시작해야 합니다"));
    }
    if path.chars().any(|c| c.is_ascii_control() || c.is_whitespace()) {
        return Err(invalid("경로에 제어 문자나 공백이 포함되어 있습니다"));
    }

    Ok(())
}
