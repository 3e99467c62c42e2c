//! # rcalc-foundation
//!
//! Foundation layer for rcalc:
//! - Error: 중앙 에러 타입 (thiserror)
//! - Config: 설정 파일 (~/.rcalc/config.json)
//! - History: 계산 기록 저장소

pub mod config;
pub mod error;
pub mod history;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{CalcConfig, CONFIG_FILE};

// ============================================================================
// History (계산 기록)
// ============================================================================
pub use history::{HistoryRecord, HistoryStore, HISTORY_FILE};
