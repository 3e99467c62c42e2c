//! Calc Config - 통합 설정
//!
//! ~/.rcalc/config.json 에서 로드되는 사용자 설정

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 설정 파일명
pub const CONFIG_FILE: &str = "config.json";

/// rcalc 통합 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcConfig {
    /// 계산 기록 파일 경로
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// 확장 매니페스트 디렉토리 (없으면 빌트인 확장만 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions_dir: Option<PathBuf>,

    /// 로그 레벨 (RUST_LOG가 없을 때 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            extensions_dir: None,
            log_level: None,
        }
    }
}

fn default_history_file() -> PathBuf {
    base_dir().join(crate::history::HISTORY_FILE)
}

/// 설정 디렉토리 (~/.rcalc/)
pub fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rcalc")
}

impl CalcConfig {
    /// 설정 로드 - 파일이 없으면 기본값
    pub fn load() -> Result<Self> {
        Self::load_from(&base_dir().join(CONFIG_FILE))
    }

    /// 지정한 경로에서 설정 로드
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// 설정 저장
    pub fn save(&self) -> Result<()> {
        self.save_to(&base_dir().join(CONFIG_FILE))
    }

    /// 지정한 경로에 설정 저장
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!("Failed to create directory: {}", e))
                })?;
            }
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
