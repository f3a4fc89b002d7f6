/// Errors raised while probing a database connection.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
