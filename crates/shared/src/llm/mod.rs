pub mod gateway;
pub mod gemini;
pub mod prompts;

pub use gateway::{
    GenerationPurpose, InlineImage, LlmGateway, LlmGatewayError, LlmGatewayFuture,
    LlmGatewayRequest, LlmGatewayResponse,
};
pub use gemini::{GeminiConfigError, GeminiGateway, GeminiGatewayConfig};
pub use prompts::{ASTROBOT_SYSTEM_PROMPT, DEFAULT_VISION_PROMPT, translation_prompt};
