//! History Store - 계산 기록 영구 저장
//!
//! 성공한 연산마다 한 건의 레코드를 메모리에 쌓고,
//! 명시적 save/load 로 JSON 파일과 동기화한다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 기본 기록 파일명
pub const HISTORY_FILE: &str = "history.json";

/// 성공한 연산 한 건의 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// 연산 이름 (add, sub, ...)
    pub operation: String,

    /// 첫 번째 피연산자
    pub operand1: f64,

    /// 두 번째 피연산자 (단항 연산은 0)
    pub operand2: f64,

    /// 연산 결과
    pub result: f64,
}

impl HistoryRecord {
    pub fn new(operation: impl Into<String>, operand1: f64, operand2: f64, result: f64) -> Self {
        Self {
            operation: operation.into(),
            operand1,
            operand2,
            result,
        }
    }
}

/// 계산 기록 저장소
pub struct HistoryStore {
    /// 기록 파일 경로
    path: PathBuf,

    /// 메모리 내 기록
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// 새 저장소 생성 (파일은 아직 읽지 않음)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// 기록 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일에서 기록 로드 - 파일이 없으면 빈 기록 유지
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            warn!(
                "No history file found at {}. Using empty history.",
                self.path.display()
            );
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::History(format!("Failed to read {}: {}", self.path.display(), e)))?;
        self.records = serde_json::from_str(&content)
            .map_err(|e| Error::History(format!("Failed to parse {}: {}", self.path.display(), e)))?;
        info!("History loaded from {}", self.path.display());
        Ok(())
    }

    /// 메모리 내 기록을 파일에 저장
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::History(format!("Failed to create directory: {}", e))
                })?;
            }
        }
        let content = serde_json::to_string_pretty(&self.records)
            .map_err(|e| Error::History(format!("Failed to serialize history: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| Error::History(format!("Failed to write {}: {}", self.path.display(), e)))?;
        info!("History saved to {}", self.path.display());
        Ok(())
    }

    /// 메모리 내 기록만 비움 (파일은 그대로)
    pub fn clear(&mut self) {
        self.records.clear();
        info!("History cleared in memory.");
    }

    /// 기록 파일 삭제 - 파일이 없으면 경고만
    pub fn delete_file(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                Error::History(format!("Failed to remove {}: {}", self.path.display(), e))
            })?;
            info!("History file {} deleted.", self.path.display());
        } else {
            warn!("No history file found to delete at {}", self.path.display());
        }
        Ok(())
    }

    /// 기록 한 건 추가
    pub fn append(&mut self, record: HistoryRecord) {
        info!(
            "Record added: {} {} {} -> {}",
            record.operation, record.operand1, record.operand2, record.result
        );
        self.records.push(record);
    }

    /// 현재 기록 목록
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
