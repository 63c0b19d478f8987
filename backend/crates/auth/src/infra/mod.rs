//! Infrastructure Layer
//!
//! Credential store on the document store; in-process session store.

pub mod document;
pub mod memory;

pub use document::DocUserRepository;
pub use memory::MemorySessionStore;
