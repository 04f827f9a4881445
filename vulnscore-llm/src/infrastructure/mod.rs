pub mod prompts;
pub mod providers;
pub mod registry;
pub mod response_parser;

pub use registry::{ProviderType, create_provider};
pub use response_parser::ResponseParser;
