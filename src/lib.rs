//! anitool 프런트엔드용 개발 프록시입니다.
//!
//! # 주요 기능
//!
//! - 접두사 기반 프록시 라우팅 (선언 순서 우선)
//! - 논리 엔드포인트 이름 → 상대 경로 해석
//! - Host 허용 목록 검사와 정적 번들 서빙
//!
//! # 예제
//!
//! ```
//! use anitool_devproxy::routing::{Decision, RouteRule, RouteTable, TargetOrigin};
//!
//! let backend = TargetOrigin::parse("http://127.0.0.1:11325").unwrap();
//! let table = RouteTable::new(vec![
//!     RouteRule::new("/search", backend.clone(), true).unwrap(),
//!     RouteRule::new("/images", backend.clone(), true).unwrap(),
//! ]).unwrap();
//!
//! assert_eq!(
//!     table.match_path("/images/a.png").unwrap(),
//!     Decision::Forward { target_origin: backend, rewrite_origin: true },
//! );
//! assert_eq!(table.match_path("/").unwrap(), Decision::Local);
//! ```
//!
//! # 엔드포인트 해석
//!
//! ```
//! use anitool_devproxy::settings::Settings;
//!
//! let settings = Settings::default();
//! let resolver = settings.resolver().unwrap();
//!
//! assert_eq!(resolver.resolve_endpoint("REPLY").unwrap(), "/search/reply");
//! assert_eq!(resolver.base_image_path(), "");
//! ```

pub mod context;
pub mod endpoints;
pub mod logging;
pub mod proxy;
pub mod routing;
pub mod server;
pub mod settings;
