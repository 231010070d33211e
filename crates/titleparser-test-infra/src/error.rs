use thiserror::Error;

/// Failure while bringing up or talking to a fixture container.
#[derive(Debug, Error)]
pub enum TestInfraError {
    /// Docker could not start the container or report its ports.
    #[error("fixture container failed: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    /// The container is up but the Redis client could not reach it.
    #[error("fixture redis unreachable: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
