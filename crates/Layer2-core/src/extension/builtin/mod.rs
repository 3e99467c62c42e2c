//! Builtin extensions - 컴파일 타임에 포함되는 확장 명령

pub mod sample;
pub mod trig;

pub use sample::SampleExtension;
pub use trig::TrigExtension;
