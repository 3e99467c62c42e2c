//! Trig extension - 삼각함수 확장
//!
//! REPL 에서 "trig" 입력 후, 한 줄로 연산과 각도(도 단위)를 받는다.
//! 예: "sin 30". cot/sec/csc 는 정의되지 않는 각도에서 메시지만 출력한다.

use crate::console::Console;
use crate::extension::traits::ExtensionCommand;
use async_trait::async_trait;
use rcalc_foundation::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// 역수 함수가 정의되지 않는다고 보는 임계값
const TOLERANCE: f64 = 1e-10;

/// 지원하는 삼각 연산
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigOp {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
}

impl FromStr for TrigOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sin" => Ok(TrigOp::Sin),
            "cos" => Ok(TrigOp::Cos),
            "tan" => Ok(TrigOp::Tan),
            "cot" => Ok(TrigOp::Cot),
            "sec" => Ok(TrigOp::Sec),
            "csc" => Ok(TrigOp::Csc),
            other => Err(Error::Extension(format!(
                "Operation '{}' is not supported.",
                other
            ))),
        }
    }
}

impl fmt::Display for TrigOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrigOp::Sin => "sin",
            TrigOp::Cos => "cos",
            TrigOp::Tan => "tan",
            TrigOp::Cot => "cot",
            TrigOp::Sec => "sec",
            TrigOp::Csc => "csc",
        };
        write!(f, "{}", name)
    }
}

/// 도 단위 각도에 대해 삼각 연산 평가
fn eval(op: TrigOp, angle_deg: f64) -> Result<f64> {
    let rad = angle_deg.to_radians();
    match op {
        TrigOp::Sin => Ok(rad.sin()),
        TrigOp::Cos => Ok(rad.cos()),
        TrigOp::Tan => Ok(rad.tan()),
        TrigOp::Cot => {
            let tan = rad.tan();
            if tan.abs() < TOLERANCE {
                return Err(Error::domain("Cotangent is undefined for this angle."));
            }
            Ok(1.0 / tan)
        }
        TrigOp::Sec => {
            let cos = rad.cos();
            if cos.abs() < TOLERANCE {
                return Err(Error::domain("Secant is undefined for this angle."));
            }
            Ok(1.0 / cos)
        }
        TrigOp::Csc => {
            let sin = rad.sin();
            if sin.abs() < TOLERANCE {
                return Err(Error::domain("Cosecant is undefined for this angle."));
            }
            Ok(1.0 / sin)
        }
    }
}

/// 정수 각도는 소수점 없이 표시
fn format_angle(angle_deg: f64) -> String {
    if angle_deg.fract() == 0.0 {
        format!("{}", angle_deg as i64)
    } else {
        format!("{:.1}", angle_deg)
    }
}

/// 삼각함수 확장 명령
pub struct TrigExtension;

#[async_trait]
impl ExtensionCommand for TrigExtension {
    fn name(&self) -> &str {
        "trig"
    }

    fn description(&self) -> &str {
        "Trigonometric functions (sin, cos, tan, cot, sec, csc)"
    }

    async fn invoke(&self, console: &mut Console) -> Result<()> {
        let line = console
            .read_line("Enter trig operation and angle (e.g., sin 30): ")
            .await?
            .unwrap_or_default();

        if line.is_empty() {
            println!("No input provided.");
            return Ok(());
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            println!("Invalid input. Please enter an operation and an angle (e.g., sin 30).");
            return Ok(());
        }

        let op = match parts[0].to_lowercase().parse::<TrigOp>() {
            Ok(op) => op,
            Err(_) => {
                println!("Operation '{}' is not supported.", parts[0].to_lowercase());
                return Ok(());
            }
        };

        let angle_deg: f64 = match parts[1].parse() {
            Ok(angle) => angle,
            Err(_) => {
                println!("Invalid angle. Please enter a numeric value for the angle.");
                return Ok(());
            }
        };

        match eval(op, angle_deg) {
            Ok(result) => {
                info!(
                    "Trig operation: {}, angle: {} degrees, result: {}",
                    op, angle_deg, result
                );
                println!("{}({}°) = {}", op, format_angle(angle_deg), result);
            }
            Err(Error::Domain(message)) => println!("{}", message),
            Err(e) => return Err(e),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_30() {
        let result = eval(TrigOp::Sin, 30.0).unwrap();
        assert!((result - 30.0_f64.to_radians().sin()).abs() < 1e-6);
        assert!((result - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cos_60() {
        let result = eval(TrigOp::Cos, 60.0).unwrap();
        assert!((result - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tan_45() {
        let result = eval(TrigOp::Tan, 45.0).unwrap();
        assert!((result - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cot_45() {
        let result = eval(TrigOp::Cot, 45.0).unwrap();
        assert!((result - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sec_60() {
        let result = eval(TrigOp::Sec, 60.0).unwrap();
        assert!((result - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cot_0_is_undefined() {
        let err = eval(TrigOp::Cot, 0.0).unwrap_err();
        assert!(err.to_string().contains("undefined"));
    }

    #[test]
    fn test_sec_90_is_undefined() {
        let err = eval(TrigOp::Sec, 90.0).unwrap_err();
        assert!(err.to_string().contains("undefined"));
    }

    #[test]
    fn test_csc_0_is_undefined() {
        let err = eval(TrigOp::Csc, 0.0).unwrap_err();
        assert!(err.to_string().contains("undefined"));
    }

    #[test]
    fn test_unsupported_operation() {
        assert!("sinh".parse::<TrigOp>().is_err());
    }

    #[test]
    fn test_format_angle() {
        assert_eq!(format_angle(30.0), "30");
        assert_eq!(format_angle(22.5), "22.5");
    }

    #[tokio::test]
    async fn test_invoke_with_injected_reader() {
        let mut console = Console::from_reader("sin 30\n".as_bytes());
        TrigExtension.invoke(&mut console).await.unwrap();
    }

    #[tokio::test]
    async fn test_invoke_undefined_identity_does_not_error() {
        let mut console = Console::from_reader("cot 0\n".as_bytes());
        TrigExtension.invoke(&mut console).await.unwrap();
    }

    #[tokio::test]
    async fn test_invoke_malformed_input_does_not_error() {
        for line in ["\n", "sin\n", "sin thirty\n", "sinh 30\n"] {
            let mut console = Console::from_reader(line.as_bytes());
            TrigExtension.invoke(&mut console).await.unwrap();
        }
    }
}
