pub mod client;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod model;
pub mod resolve;
pub mod session;
pub mod store;

pub use client::FeedClient;
pub use config::Config;
pub use error::{FeedError, FeedResult};
pub use model::{ComponentKind, FeedComponent, UpcomingEvent};
pub use resolve::resolve_next;
pub use session::{FeedSession, SessionPhase};
pub use store::{FileStore, MemoryStore, UrlStore};
