pub mod gemini_client;
pub mod model;
pub mod prompt;

pub use gemini_client::GeminiClient;
pub use model::{ChatModel, ChatSession, ModelReply};
pub use prompt::build_itinerary_prompt;
