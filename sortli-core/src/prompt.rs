//! Chat payloads sent to the upstream model.

use serde::Serialize;

use crate::model::ClassificationInput;

/// Instruction defining the categories and the expected reply format.
pub const SYSTEM_PROMPT: &str = r#"You are a waste classification expert. Analyze the waste item and classify it into one of these categories:
- wet: Organic, biodegradable waste like food scraps, vegetables, fruits, garden waste, leaves
- dry: Recyclable materials like paper, cardboard, plastic bottles, glass, metal cans, textiles
- ewaste: Electronic waste like phones, computers, batteries, cables, appliances, circuit boards
- hazardous: Dangerous materials like chemicals, paints, medicines, fluorescent bulbs, pesticides, motor oil

Respond with ONLY a JSON object on a single line in this exact format (no markdown, no code blocks, no other text):
{"type": "wet|dry|ewaste|hazardous", "confidence": 85-99, "reasoning": "brief explanation"}"#;

/// Text placed before the item in the user message.
pub const USER_INSTRUCTION: &str = "Classify this waste item:";

/// Upstream model selection and sampling settings.
///
/// Images go to a heavier multimodal model, descriptions to a lighter text
/// model. The split is a cost/latency knob, not a correctness requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPolicy {
    /// Model used when the input is an image.
    pub image_model: String,
    /// Model used for text-only input.
    pub text_model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output token ceiling.
    pub max_tokens: u32,
}

impl Default for ModelPolicy {
    fn default() -> Self {
        Self {
            image_model: String::from("google/gemini-2.5-flash"),
            text_model: String::from("google/gemini-2.5-flash-lite"),
            temperature: 0.3,
            max_tokens: 200,
        }
    }
}

impl ModelPolicy {
    /// Model identifier for the given input.
    #[must_use]
    pub fn model_for(&self, input: &ClassificationInput) -> &str {
        if input.is_image() {
            &self.image_model
        } else {
            &self.text_model
        }
    }
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model.
    System,
    /// The end user.
    User,
}

/// Image reference inside a content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageUrl {
    /// Data URL or remote URL.
    pub url: String,
}

/// One element of a multi-part message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text {
        /// Text content.
        text: String,
    },
    /// Attached image.
    ImageUrl {
        /// Image reference.
        image_url: ImageUrl,
    },
}

/// Message body, either a string or a list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Single text body.
    Text(String),
    /// Mixed text and image parts.
    Parts(Vec<ContentPart>),
}

/// Single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Speaker.
    pub role: Role,
    /// Body.
    pub content: MessageContent,
}

/// Chat completion call as understood by OpenAI-compatible gateways.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Upstream model identifier.
    pub model: String,
    /// Conversation, system message first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output token ceiling.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Build the classification conversation for an input.
    #[must_use]
    pub fn for_input(input: &ClassificationInput, policy: &ModelPolicy) -> Self {
        let user_content = match input {
            ClassificationInput::Image(data_url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: USER_INSTRUCTION.to_owned(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: data_url.clone(),
                    },
                },
            ]),
            ClassificationInput::Description(text) => {
                MessageContent::Text(format!("{USER_INSTRUCTION} {text}"))
            }
        };

        Self {
            model: policy.model_for(input).to_owned(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: MessageContent::Text(SYSTEM_PROMPT.to_owned()),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_content,
                },
            ],
            temperature: policy.temperature,
            max_tokens: policy.max_tokens,
        }
    }
}
