pub mod client;
pub mod http;
pub mod payload;

pub use client::{ClientConfig, LookupClient};
pub use http::FaceitClient;
