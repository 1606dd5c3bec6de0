use crate::llm::client::{CompletionClient, CompletionError};
use crate::types::{ChatMessage, MessageRole};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use tracing::debug;

pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let mut chat_messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(messages.len());
        for m in messages {
            let message = match m.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(m.content.clone()),
                ),
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(m.content.clone()),
                ),
                MessageRole::Assistant => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(m.content.clone())
                        .build()
                        .map_err(|e| {
                            CompletionError::Request(format!("failed to build request: {e}"))
                        })?,
                ),
            };
            chat_messages.push(message);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(chat_messages)
            .build()
            .map_err(|e| CompletionError::Request(format!("failed to build request: {e}")))?;

        debug!(model = %self.model, messages = messages.len(), "sending completion request");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| CompletionError::Request(format!("OpenAI API error: {e}")))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
