//! Concrete completion providers.

mod openai;

pub use openai::OpenAiCompatClient;
