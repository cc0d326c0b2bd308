#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RegressionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("division by zero: no variance in x")]
    DivisionByZero,
    #[error("x and y have different lengths: {len_x} vs {len_y}")]
    ShapeMismatch { len_x: usize, len_y: usize },
    #[error("not enough points: got {len}, need at least {needed}")]
    InsufficientData { len: usize, needed: usize },
    #[error("statistical error: {0}")]
    StatError(&'static str),
}

pub type RegResult<T> = Result<T, RegressionError>;

pub(crate) fn check_same_len(x: &[f64], y: &[f64]) -> RegResult<()> {
    if x.len() != y.len() {
        return Err(RegressionError::ShapeMismatch { len_x: x.len(), len_y: y.len() });
    }
    Ok(())
}
