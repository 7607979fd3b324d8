//! 접두사 기반 프록시 라우팅을 위한 핵심 기능을 제공하는 모듈입니다.

mod error;
mod host;
mod rule;
mod table;

pub use error::RoutingError;
pub use host::{HostFilter, HostInfo};
pub use rule::{RouteRule, TargetOrigin};
pub use table::{Decision, RouteTable};
