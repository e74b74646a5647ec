use thiserror::Error;

/// Failures of the rate-limit counter store.
///
/// None of these reach the client: the limiter admits the request whenever the store
/// cannot answer.
#[derive(Error, Debug)]
pub enum CounterError {
    /// No connection could be checked out of the Redis pool.
    #[error(transparent)]
    Pool(#[from] deadpool_redis::PoolError),

    /// Redis rejected or failed the command.
    #[error(transparent)]
    Redis(#[from] deadpool_redis::redis::RedisError),
}
