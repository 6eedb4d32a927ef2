pub mod ai_client;
pub mod extraction;
pub mod generator;
pub mod providers;

pub use ai_client::AiClient;
