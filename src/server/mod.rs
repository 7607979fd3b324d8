//! 개발 서버: Host 검사, 프록시 전달, 정적 파일 서빙

pub mod handler;
pub mod listener;
pub mod static_files;
pub mod error;

pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
pub use handler::RequestHandler;
pub use listener::ServerListener;
pub use static_files::StaticFiles;
