//! Errors raised by entity store operations.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The point buffer could not grow to hold the incoming cloud.
    /// The upsert was abandoned and the prior entity left untouched.
    #[error("failed to allocate point buffer for {requested} points: {source}")]
    PointBufferAllocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}
