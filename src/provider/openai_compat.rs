// src/provider/openai_compat.rs — Generic OpenAI-compatible provider
//
// One chat-completion call per request. Used for OpenAI, OpenRouter and any
// custom endpoint that speaks `/chat/completions`.

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, Message, ModelProvider, TokenUsage};
use crate::infra::errors::AutoCoderError;

/// Provider for any OpenAI-compatible API endpoint.
pub struct OpenAICompatProvider {
    id_str: String,
    name_str: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        api_key: String,
        base_url: String,
    ) -> Self {
        Self {
            id_str: id.into(),
            name_str: name.into(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_body(request: &ChatRequest) -> serde_json::Value {
        let system = request.system.as_deref().map(Message::system);
        let messages: Vec<serde_json::Value> = system
            .iter()
            .chain(&request.messages)
            .map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            })
            .collect();

        serde_json::json!({
            "model": request.model,
            "messages": messages,
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAICompatProvider {
    fn id(&self) -> &str {
        &self.id_str
    }

    fn name(&self) -> &str {
        &self.name_str
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AutoCoderError> {
        let body = Self::build_body(&request);

        tracing::debug!(
            provider = %self.id_str,
            model = %request.model,
            "POST {}/chat/completions",
            self.base_url
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header(
                "User-Agent",
                format!("autocoder/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| AutoCoderError::Provider {
                provider: self.id_str.clone(),
                message: e.to_string(),
                retriable: e.is_timeout() || e.is_connect(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AutoCoderError::Provider {
                provider: self.id_str.clone(),
                message: format!("HTTP {status}: {error_body}"),
                retriable: status.as_u16() == 429 || status.is_server_error(),
            });
        }

        let resp: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| AutoCoderError::MalformedResponse {
                    provider: self.id_str.clone(),
                    message: e.to_string(),
                })?;

        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AutoCoderError::MalformedResponse {
                provider: self.id_str.clone(),
                message: "missing choices[0].message.content".into(),
            })?
            .to_string();

        let usage = TokenUsage {
            input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
        };

        Ok(ChatResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_puts_system_first() {
        let req = ChatRequest::system_and_user("deepseek/deepseek-r1", "sys", "usr");
        let body = OpenAICompatProvider::build_body(&req);
        assert_eq!(body["model"], "deepseek/deepseek-r1");
        let msgs = body["messages"].as_array().unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0]["role"], "system");
        assert_eq!(msgs[0]["content"], "sys");
        assert_eq!(msgs[1]["role"], "user");
        assert_eq!(msgs[1]["content"], "usr");
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_body_without_system() {
        let mut req = ChatRequest::system_and_user("o1", "s", "u");
        req.system = None;
        let body = OpenAICompatProvider::build_body(&req);
        let msgs = body["messages"].as_array().unwrap();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0]["role"], "user");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let p = OpenAICompatProvider::new("x", "X", "k".into(), "http://host/v1/".into());
        assert_eq!(p.base_url(), "http://host/v1");
        assert_eq!(p.id(), "x");
        assert_eq!(p.name(), "X");
    }
}
