//! 프런트엔드 코드가 사용하는 API 엔드포인트와 이미지 경로를 해석합니다.

mod error;
mod resolver;
mod set;

pub use error::EndpointError;
pub use resolver::ConfigResolver;
pub use set::{default_endpoint_paths, EndpointSet, REQUIRED_ENDPOINTS};
