use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};
use super::SettingsError;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    /// 바인딩 주소 (기본값: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP 포트 (기본값: 5173)
    #[serde(default = "default_port")]
    pub port: u16,

    /// 허용된 Host 헤더 값
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5173 }
fn default_allowed_hosts() -> Vec<String> { vec!["anitool.haruyuki.cn".to_string()] }

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

/// 쉼표로 구분된 환경 변수를 목록으로 읽습니다.
pub fn parse_env_list<F: FnOnce() -> Vec<String>>(name: &str, default: F) -> Result<Vec<String>, SettingsError> {
    match env::var(name) {
        Ok(val) => Ok(val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl ServerSettings {
    const MIN_PORT: u16 = 1;
    const MAX_PORT: u16 = 65535;

    fn parse_port(name: &str, value: &str) -> Result<u16, SettingsError> {
        let port = value.parse::<u16>().map_err(|_| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: value.to_string(),
            reason: format!("포트는 {}-{} 범위여야 합니다", Self::MIN_PORT, Self::MAX_PORT),
        })?;

        if port < Self::MIN_PORT {
            return Err(SettingsError::EnvVarInvalid {
                var_name: name.to_string(),
                value: value.to_string(),
                reason: "포트는 0이 될 수 없습니다".to_string(),
            });
        }

        Ok(port)
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        let port = Self::parse_port(
            "ANITOOL_PORT",
            &env::var("ANITOOL_PORT").unwrap_or_else(|_| default_port().to_string())
        )?;

        let settings = Self {
            host: env::var("ANITOOL_HOST").unwrap_or_else(|_| default_host()),
            port,
            allowed_hosts: parse_env_list("ANITOOL_ALLOWED_HOSTS", default_allowed_hosts)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.host.parse::<IpAddr>().map_err(|e| SettingsError::EnvVarInvalid {
            var_name: "ANITOOL_HOST".to_string(),
            value: self.host.clone(),
            reason: e.to_string(),
        })?;

        if self.port < Self::MIN_PORT {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "ANITOOL_PORT".to_string(),
                value: self.port.to_string(),
                reason: "포트는 0이 될 수 없습니다".to_string(),
            });
        }

        Ok(())
    }

    /// 리스너 바인딩 주소
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = self.host.parse::<IpAddr>().map_err(|e| SettingsError::EnvVarInvalid {
            var_name: "ANITOOL_HOST".to_string(),
            value: self.host.clone(),
            reason: e.to_string(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_hosts: default_allowed_hosts(),
        }
    }
}
