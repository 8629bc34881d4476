//! Card session: in-memory state for one interview card and the operations
//! that mutate it. State lives in WASM memory (thread_local) for the lifetime
//! of the Web Worker and is discarded with it.

pub mod card;
pub mod export;
pub mod identity;
pub mod selection;
pub mod state;
pub mod store;
