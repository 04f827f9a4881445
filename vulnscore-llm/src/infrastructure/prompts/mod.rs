pub mod loader;
pub mod templates;

pub use loader::{
    BuiltinPromptLoader, FilePromptLoader, PromptError, PromptLoader, prompt_loader_from_config,
};
pub use templates::{
    CVSS_CONTEXT_SECTION, CVSS_HUMAN_PROMPT, CVSS_SYSTEM_PROMPT, MISSING_DESCRIPTION,
    PromptBuilder, render,
};
