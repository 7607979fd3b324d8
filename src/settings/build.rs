use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;
use super::{server::parse_env_var, SettingsError};

/// 번들 출력 레이아웃 설정
#[derive(Clone, Debug, Deserialize)]
pub struct BuildSettings {
    /// 출력 디렉토리 (기본값: dist)
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// 정적 자원 하위 디렉토리 (기본값: assets)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// 빌드 전에 출력 디렉토리를 비울지 여부
    #[serde(default = "default_empty_out_dir")]
    pub empty_out_dir: bool,
}

fn default_out_dir() -> PathBuf { PathBuf::from("dist") }
fn default_assets_dir() -> String { "assets".to_string() }
fn default_empty_out_dir() -> bool { true }

impl BuildSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            out_dir: env::var("ANITOOL_OUT_DIR").map(PathBuf::from).unwrap_or_else(|_| default_out_dir()),
            assets_dir: env::var("ANITOOL_ASSETS_DIR").unwrap_or_else(|_| default_assets_dir()),
            empty_out_dir: parse_env_var::<bool, _>("ANITOOL_EMPTY_OUT_DIR", default_empty_out_dir)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.out_dir.as_os_str().is_empty() {
            return Err(SettingsError::InvalidConfig("build.out_dir가 비어 있습니다".to_string()));
        }

        // assets 디렉토리는 out_dir 내부의 단순 상대 경로여야 함
        let assets = Path::new(&self.assets_dir);
        let is_plain_relative = !self.assets_dir.is_empty()
            && assets.components().all(|c| matches!(c, Component::Normal(_)));
        if !is_plain_relative {
            return Err(SettingsError::InvalidConfig(format!(
                "build.assets_dir {:?}는 out_dir 내부의 상대 경로여야 합니다",
                self.assets_dir
            )));
        }

        Ok(())
    }

    pub fn assets_path(&self) -> PathBuf {
        self.out_dir.join(&self.assets_dir)
    }

    /// 출력 디렉토리 레이아웃을 준비합니다.
    ///
    /// `empty_out_dir`가 켜져 있으면 이전 빌드 결과를 먼저 지웁니다.
    pub fn prepare_out_dir(&self) -> Result<PathBuf, SettingsError> {
        let file_error = |path: &Path, error: std::io::Error| SettingsError::FileError {
            path: path.to_string_lossy().to_string(),
            error,
        };

        if self.empty_out_dir && self.out_dir.exists() {
            for entry in fs::read_dir(&self.out_dir).map_err(|e| file_error(&self.out_dir, e))? {
                let path = entry.map_err(|e| file_error(&self.out_dir, e))?.path();
                let removed = if path.is_dir() {
                    fs::remove_dir_all(&path)
                } else {
                    fs::remove_file(&path)
                };
                removed.map_err(|e| file_error(&path, e))?;
            }
            info!(out_dir = %self.out_dir.display(), "출력 디렉토리 비움");
        }

        let assets = self.assets_path();
        fs::create_dir_all(&assets).map_err(|e| file_error(&assets, e))?;
        Ok(assets)
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            assets_dir: default_assets_dir(),
            empty_out_dir: default_empty_out_dir(),
        }
    }
}
