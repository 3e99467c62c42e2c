//! Console - 프롬프트 출력과 한 줄 입력
//!
//! REPL 루프와 확장 명령이 같은 입력 스트림을 공유한다.
//! 테스트에서는 임의의 reader 를 주입할 수 있다.

use rcalc_foundation::Result;
use std::io::Write as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// 비동기 한 줄 입력 콘솔
pub struct Console {
    input: Box<dyn AsyncBufRead + Send + Unpin>,
}

impl Console {
    /// 표준 입력에 연결된 콘솔
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    /// 임의의 reader 에 연결된 콘솔 (테스트용)
    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        Self {
            input: Box::new(reader),
        }
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다.
    ///
    /// EOF 이면 `None`, 아니면 trim 된 줄을 반환한다.
    pub async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let n = self.input.read_line(&mut line).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_line_trims_input() {
        let mut console = Console::from_reader("  add 2 3  \n".as_bytes());
        let line = console.read_line("").await.unwrap();
        assert_eq!(line.as_deref(), Some("add 2 3"));
    }

    #[tokio::test]
    async fn test_read_line_eof_returns_none() {
        let mut console = Console::from_reader("".as_bytes());
        assert!(console.read_line("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_line_sequential_lines() {
        let mut console = Console::from_reader("first\nsecond\n".as_bytes());
        assert_eq!(console.read_line("").await.unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line("").await.unwrap().as_deref(), Some("second"));
        assert!(console.read_line("").await.unwrap().is_none());
    }
}
