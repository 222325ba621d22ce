pub mod connectivity;
pub mod llm;
pub mod prompt;
pub mod relay;

pub use connectivity::ConnectivityProbe;
pub use llm::{ChatProvider, OpenAICompatibleClient};
