//! Builtin operations - 기본 산술/초월 연산

use rcalc_foundation::{Error, Result};

pub fn add(a: f64, b: f64) -> Result<f64> {
    Ok(a + b)
}

pub fn sub(a: f64, b: f64) -> Result<f64> {
    Ok(a - b)
}

pub fn mul(a: f64, b: f64) -> Result<f64> {
    Ok(a * b)
}

pub fn div(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(Error::DivisionByZero);
    }
    Ok(a / b)
}

pub fn sqrt(a: f64) -> Result<f64> {
    if a < 0.0 {
        return Err(Error::domain("Cannot take sqrt of a negative number."));
    }
    Ok(a.sqrt())
}

pub fn square(a: f64) -> Result<f64> {
    Ok(a * a)
}

pub fn cube(a: f64) -> Result<f64> {
    Ok(a * a * a)
}

/// log 밑은 10
pub fn log(a: f64) -> Result<f64> {
    if a <= 0.0 {
        return Err(Error::domain("Cannot take log of a non-positive number."));
    }
    Ok(a.log10())
}
