use crate::widget::Phase;

pub type Result<T> = std::result::Result<T, SequenceError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SequenceError {
    #[error("frame count must be at least 1")]
    EmptySequence,
    #[error("target height must be a positive finite number (got {0})")]
    InvalidTargetHeight(f64),
    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),
    #[error("configuration field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("frame index {index} out of range (frame_count={count})")]
    FrameOutOfRange { index: usize, count: usize },
    #[error("cannot {op} while {phase:?}")]
    InvalidPhase { op: &'static str, phase: Phase },
    #[error("surface operation failed: {0}")]
    Surface(String),
}
