//! Text generation adapters.

mod anthropic_client;
mod mock_client;

pub use anthropic_client::{AnthropicClient, AnthropicConfig};
pub use mock_client::MockTextGenerator;
