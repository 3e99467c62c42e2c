//! Error types for rcalc
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// rcalc 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 디스패치 관련
    // ========================================================================
    #[error("Unknown command: {0}. Type 'menu' to see available commands.")]
    UnknownCommand(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("'{command}' requires {required} numeric argument(s)")]
    Arity { command: String, required: usize },

    #[error("Please provide valid numeric input(s): {0}")]
    Parse(String),

    // ========================================================================
    // 연산 도메인 관련
    // ========================================================================
    #[error("Cannot divide by zero.")]
    DivisionByZero,

    #[error("{0}")]
    Domain(String),

    // ========================================================================
    // 확장 관련
    // ========================================================================
    #[error("Extension error: {0}")]
    Extension(String),

    #[error("Failed to load extension '{name}': {message}")]
    ExtensionLoad { name: String, message: String },

    // ========================================================================
    // 기록 저장소 관련
    // ========================================================================
    #[error("History error: {0}")]
    History(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    ///
    /// REPL은 이 에러들을 출력하고 루프를 계속한다.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::UnknownCommand(_)
                | Error::UnknownOperation(_)
                | Error::Arity { .. }
                | Error::Parse(_)
                | Error::DivisionByZero
                | Error::Domain(_)
        )
    }

    /// 도메인 에러 생성 헬퍼
    pub fn domain(message: impl Into<String>) -> Self {
        Error::Domain(message.into())
    }

    /// 확장 로드 에러 생성 헬퍼
    pub fn extension_load(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ExtensionLoad {
            name: name.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_errors() {
        assert!(Error::DivisionByZero.is_user_facing());
        assert!(Error::UnknownCommand("foo".into()).is_user_facing());
        assert!(Error::Arity {
            command: "add".into(),
            required: 2
        }
        .is_user_facing());
        assert!(!Error::Config("bad".into()).is_user_facing());
        assert!(!Error::Internal("oops".into()).is_user_facing());
    }

    #[test]
    fn test_arity_display_names_required_count() {
        let err = Error::Arity {
            command: "add".into(),
            required: 2,
        };
        assert_eq!(err.to_string(), "'add' requires 2 numeric argument(s)");
    }
}
