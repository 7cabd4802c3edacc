//! studyflow-providers: Content generators.
//!
//! Implements `ContentGenerator` twice: `RemoteModel` asks a chat backend
//! (OpenAI-compatible or Anthropic) and `DeterministicFallback` runs the core
//! engine. `ResilientGenerator` tries the first and falls back to the second.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod fallback;
pub mod mock;
pub mod openai;
pub mod prompts;
pub mod remote;
pub mod resilient;

pub use config::{build_generator, create_chat_model, load_config, ProviderConfig, StudyflowConfig};
pub use error::ProviderError;
pub use fallback::DeterministicFallback;
pub use remote::RemoteModel;
pub use resilient::ResilientGenerator;
