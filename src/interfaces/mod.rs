// ============================================================================
// Interfaces Module
// Contains the collaborator traits of a computation
// ============================================================================

mod progress;
mod result_store;

pub use progress::{
    LoggingProgressObserver, NoOpProgressObserver, Phase, ProgressEvent, ProgressObserver,
};
pub use result_store::{FileStore, MemoryStore, ResultStore, StoreError};
