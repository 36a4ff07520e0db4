// LLM abstraction layer

pub mod assistant;
pub mod openai;
pub mod provider;

pub use assistant::Assistant;
pub use openai::OpenAIAdapter;
pub use provider::*;
