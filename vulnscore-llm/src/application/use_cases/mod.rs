pub mod generate_cvss;

pub use generate_cvss::{DEFAULT_SYSTEM_PROMPT_NAME, GenerateCvssUseCase, GenerationError};
