pub mod openai;
pub mod resilient;

pub use openai::OpenAIProvider;
pub use resilient::{ResilienceConfig, ResilientProvider};
