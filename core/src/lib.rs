//! Storefront logic shared by the backend and the browser client.
//!
//! Everything here is synchronous and free of I/O so the same rules run
//! on the server and inside the wasm frontend.

pub mod conversation;
pub mod models;
pub mod order;
pub mod pager;
pub mod search;

pub use conversation::{ChatPhase, ChatSession};
pub use models::{ChatMessage, ChatReply, ChatRequest, ChatRole, ContactSettings, Product};
pub use pager::{paginate, Page, PAGE_SIZE};
pub use search::{QuerySequencer, SearchIndex, SearchResponse};
