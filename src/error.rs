use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// NaN, infinite or negative entries in the distance data.
    #[error("{0}")]
    InvalidDistanceValue(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("malformed distance shape: {0}")]
    MalformedDistanceShape(String),
    /// The solver produced no tour within `budget_ms`.
    #[error("No solution was found. Please increase the timeout value or set it to 0.")]
    SolverTimeout { budget_ms: u64 },
    #[error("unsupported solver: {0}")]
    UnsupportedSolver(String),
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    #[error(transparent)]
    Routing(#[from] routing::RoutingError),
    #[error(transparent)]
    Lkh(#[from] lkh::LkhError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_distance_value(message: impl Into<String>) -> Self {
        Self::InvalidDistanceValue(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn malformed_shape(message: impl Into<String>) -> Self {
        Self::MalformedDistanceShape(message.into())
    }

    pub fn unsupported_solver(message: impl Into<String>) -> Self {
        Self::UnsupportedSolver(message.into())
    }

    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }
}
