pub mod client;
pub mod codec;
pub mod error;
pub mod odoo;
pub mod protocol;
pub mod transport;

pub use client::*;
pub use codec::*;
pub use error::Error;
pub use protocol::*;
pub use transport::*;

/// Result type for JSON-RPC operations
pub type Result<T> = std::result::Result<T, Error>;
