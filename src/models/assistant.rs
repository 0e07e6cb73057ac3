// src/models/assistant.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    #[schema(example = "user")]
    pub role: String,
    pub content: String,
}

// Corpo enviado ao endpoint de chat-completion (uma única rodada)
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AskPayload {
    #[validate(length(min = 1, max = 8000, message = "Digite uma mensagem."))]
    #[schema(example = "Qual o prazo para contestação no procedimento comum?")]
    pub mensagem: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AskResponse {
    pub resposta: ChatMessage,
}
