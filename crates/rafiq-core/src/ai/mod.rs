pub mod client;
pub mod inflight;
pub mod wrappers;

pub use client::AssistantClient;
pub use inflight::InFlight;
