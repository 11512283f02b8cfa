/// Remote generation client: the single point of entry for Azure OpenAI calls.
///
/// ARCHITECTURAL RULE: generators never talk to the API directly. They receive an
/// `Arc<dyn RemoteGenerator>` from `AppState` and hand it to the dispatcher, which
/// absorbs every error this module can return.
///
/// One attempt per call. There is no retry loop here; a failed call degrades to the
/// local generators instead.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::AzureSettings;

pub mod prompts;

use prompts::SYSTEM_PROMPT;

#[derive(Debug, Error)]
pub enum RemoteGenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response did not contain a function call")]
    MissingFunctionCall,

    #[error("remote generation is not configured")]
    NotConfigured,
}

/// Structured-output generation backend.
///
/// `schema` is the JSON Schema the returned object must follow and `operation` names
/// the function the model is forced to call.
#[async_trait]
pub trait RemoteGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        schema: &Value,
        operation: &str,
    ) -> Result<Value, RemoteGenerationError>;

    /// Whether this backend can reach a model at all. Reported by `/health`.
    fn is_configured(&self) -> bool {
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    functions: Vec<FunctionSpec<'a>>,
    function_call: ForcedCall<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct FunctionSpec<'a> {
    name: &'a str,
    parameters: &'a Value,
}

#[derive(Debug, Serialize)]
struct ForcedCall<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    arguments: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ChatResponse {
    /// Arguments of the forced function call on the first choice.
    fn function_arguments(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.function_call.as_ref())
            .and_then(|f| f.arguments.as_deref())
            .filter(|a| !a.trim().is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Azure OpenAI backend
// ────────────────────────────────────────────────────────────────────────────

/// Azure OpenAI chat-completions client using forced function calling.
#[derive(Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    settings: AzureSettings,
}

impl AzureOpenAiClient {
    pub fn new(settings: AzureSettings, timeout: Duration) -> Result<Self, RemoteGenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn deployment(&self) -> &str {
        &self.settings.model
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model,
            self.settings.api_version
        )
    }
}

#[async_trait]
impl RemoteGenerator for AzureOpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        schema: &Value,
        operation: &str,
    ) -> Result<Value, RemoteGenerationError> {
        let request_body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            functions: vec![FunctionSpec {
                name: operation,
                parameters: schema,
            }],
            function_call: ForcedCall { name: operation },
        };

        debug!("Calling deployment {} for {}", self.settings.model, operation);

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.settings.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(RemoteGenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "{} succeeded: prompt_tokens={}, completion_tokens={}",
                operation, usage.prompt_tokens, usage.completion_tokens
            );
        }

        let arguments = chat
            .function_arguments()
            .ok_or(RemoteGenerationError::MissingFunctionCall)?;

        Ok(serde_json::from_str(strip_json_fences(arguments))?)
    }
}

/// Stand-in used when no endpoint or key is configured. Every call fails, so every
/// request is served by the local generators.
pub struct DisabledRemote;

#[async_trait]
impl RemoteGenerator for DisabledRemote {
    async fn generate(
        &self,
        _prompt: &str,
        _schema: &Value,
        _operation: &str,
    ) -> Result<Value, RemoteGenerationError> {
        Err(RemoteGenerationError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences some deployments wrap around arguments.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}
