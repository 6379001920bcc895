#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Mismatched tensor shape: {0:?} should be compatible with {1:?}")]
    MismatchedTensorShape(Vec<usize>, Vec<usize>),

    #[error("Validation Error: {0} should be {1}")]
    Validation(String, String),
}
