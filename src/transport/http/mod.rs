pub mod client;

// Re-export the reqwest implementation
pub use self::client::{HttpClient, HttpClientConfig};
