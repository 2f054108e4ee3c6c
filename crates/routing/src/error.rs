use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("a routing model needs at least one node")]
    EmptyModel,
    #[error("only single-vehicle models are supported, got {0} vehicles")]
    UnsupportedVehicleCount(usize),
    #[error("depot {depot} is out of range for {num_nodes} nodes")]
    DepotOutOfRange { depot: usize, num_nodes: usize },
    #[error("no transit callback registered under id {0}")]
    UnknownCallback(usize),
}

pub type RoutingResult<T> = std::result::Result<T, RoutingError>;
