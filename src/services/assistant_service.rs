// src/services/assistant_service.rs
//
// Chat com o assistente jurídico: uma pergunta, uma resposta. Não toca em
// nenhum registro.

use std::time::Duration;

use crate::{
    common::error::AppError,
    models::assistant::{ChatMessage, ChatRequest, ChatResponse},
};

pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

pub fn build_request<'a>(model: &'a str, prompt: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
    }
}

/// Primeira escolha da resposta do endpoint de chat.
pub fn first_reply(response: ChatResponse) -> Result<ChatMessage, AppError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| AppError::AssistantFailed("resposta sem conteúdo".to_string()))
}

#[derive(Clone)]
pub struct AssistantService {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantService {
    pub fn new(config: AssistantConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { http, config })
    }

    pub async fn ask(&self, prompt: &str) -> Result<ChatMessage, AppError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::invalid("Digite uma mensagem."));
        }
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::AssistantFailed("assistente não configurado".to_string()))?;

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&build_request(&self.config.model, prompt))
            .send()
            .await
            .map_err(|e| AppError::AssistantFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AssistantFailed(format!("status {}", response.status())));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::AssistantFailed(e.to_string()))?;
        first_reply(body)
    }
}
