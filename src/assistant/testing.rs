//! Scripted chat backend for assistant tests

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::chat::{
    ChatBackend, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};
use crate::error::{AppError, Result};

pub struct ScriptedChat {
    answer: Option<String>,
    sent: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedChat {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Vec<ChatMessage>> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedChat {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn chat_completion(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        self.sent.lock().push(request.messages);

        let answer = self
            .answer
            .clone()
            .ok_or_else(|| AppError::Upstream("backend offline".to_string()))?;

        Ok(ChatCompletionResponse {
            id: "chatcmpl-test".to_string(),
            model: request.model,
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: answer,
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        })
    }
}
