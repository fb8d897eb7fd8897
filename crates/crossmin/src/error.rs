use crate::binary_lp::SolverError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("binary LP solver failed: {message}")]
    SolverFailure { message: String },

    #[error("lower-layer node {node} has no edges; barycenter/median is undefined")]
    DegenerateInput { node: usize },
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn solver_failure(message: impl Into<String>) -> Self {
        Self::SolverFailure {
            message: message.into(),
        }
    }
}

impl From<SolverError> for Error {
    fn from(value: SolverError) -> Self {
        Self::solver_failure(value.to_string())
    }
}
