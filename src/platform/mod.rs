//! Platform abstraction layer
//!
//! Host-facing ports the engine depends on:
//! - Frame scheduling and time
//! - Input events
//! - Storage (LocalStorage on web)

pub mod input;
pub mod scheduler;
pub mod storage;

pub use input::{InputState, Key};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use storage::{MemoryStore, ScoreStore};

#[cfg(target_arch = "wasm32")]
pub use scheduler::RafScheduler;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
