//! LLM 释义服务 - 业务能力层
//!
//! 只负责"给一批词条要释义"这一能力，不关心批次划分和结果归并。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型（兼容 OpenAI API 的服务）
//! - 网络调用隔离在 [`ChatTransport`] 之后，测试时可替换

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::LlmError;
use crate::models::DefinitionMap;
use crate::utils::logging::truncate_text;
use crate::utils::retry::{retry_with_backoff, Exhausted, RetryPolicy};

const SYSTEM_MESSAGE: &str = "Eres un asistente que responde solo JSON válido. \
                              Ayudas a hispanohablantes a aprender vocabulario en inglés.";

const INSTRUCTIONS: [&str; 5] = [
    "Devuelve un objeto JSON con la clave 'results'.",
    "results debe mapear cada palabra EXACTAMENTE igual a como se envió, a: una definición breve en español o null.",
    "Definición: 6-14 palabras, sentido principal como sustantivo/verbo/adjetivo común.",
    "Si la palabra es nombre propio (persona, lugar, marca), nacionalidad/demonio, acrónimo, abreviatura o no es vocabulario común, devuelve null.",
    "No añadas ejemplos ni traducciones literales.",
];

/// 一次释义请求的完整内容，与具体 HTTP 客户端无关
///
/// 传输层必须要求模型只返回 JSON 对象。
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionRequest {
    pub model: String,
    pub system_message: String,
    /// JSON 字符串：task / instructions / words
    pub user_message: String,
    pub temperature: f32,
    /// 本次请求的词条，与 user_message 中的 words 一致
    pub labels: Vec<String>,
}

/// 构建释义请求
pub fn build_definition_request(model: &str, temperature: f32, labels: &[String]) -> DefinitionRequest {
    let user_message = json!({
        "task": "define words",
        "instructions": INSTRUCTIONS,
        "words": labels,
    })
    .to_string();

    DefinitionRequest {
        model: model.to_string(),
        system_message: SYSTEM_MESSAGE.to_string(),
        user_message,
        temperature,
        labels: labels.to_vec(),
    }
}

/// 解析 LLM 返回的内容
///
/// 内容必须是 JSON 对象；`results` 缺失时视为空映射。
/// 字符串值为释义，null 或其他类型一律视为 null。
pub fn parse_definition_response(content: &str) -> Result<DefinitionMap, LlmError> {
    let parsed: JsonValue =
        serde_json::from_str(content.trim()).map_err(|e| LlmError::ResponseParseFailed {
            reason: format!("{} (内容: {})", e, truncate_text(content, 120)),
        })?;

    let object = parsed
        .as_object()
        .ok_or_else(|| LlmError::ResponseParseFailed {
            reason: "返回内容不是 JSON 对象".to_string(),
        })?;

    let results = match object.get("results") {
        None | Some(JsonValue::Null) => return Ok(DefinitionMap::new()),
        Some(JsonValue::Object(results)) => results,
        Some(_) => {
            return Err(LlmError::ResponseParseFailed {
                reason: "results 不是 JSON 对象".to_string(),
            })
        }
    };

    Ok(results
        .iter()
        .map(|(label, value)| (label.clone(), value.as_str().map(str::to_string)))
        .collect())
}

/// 单次网络调用
///
/// 返回模型回复的原始文本内容。
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(&self, request: &DefinitionRequest) -> Result<String, LlmError>;
}

/// 基于 `async-openai` 的传输实现
pub struct OpenAiTransport {
    client: Client<OpenAIConfig>,
}

impl OpenAiTransport {
    pub fn new(api_key: &str, api_base_url: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base_url);

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    async fn complete(&self, request: &DefinitionRequest) -> Result<String, LlmError> {
        let request_failed = |e: async_openai::error::OpenAIError| LlmError::RequestFailed {
            model: request.model.clone(),
            message: e.to_string(),
        };

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_message.as_str())
            .build()
            .map_err(request_failed)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(request.user_message.as_str())
            .build()
            .map_err(request_failed)?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(request_failed)?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            request_failed(e)
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: request.model.clone(),
            })
    }
}

/// LLM 释义服务
///
/// 职责：
/// - 为一批词条构建请求
/// - 单次调用超时、失败重试
/// - 解析返回的 `results` 映射
/// - 不关心专有名词过滤和结果归并
pub struct DefinitionService {
    transport: Box<dyn ChatTransport>,
    model_name: String,
    temperature: f32,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl DefinitionService {
    /// 创建新的释义服务
    pub fn new(config: &Config, transport: Box<dyn ChatTransport>) -> Self {
        Self {
            transport,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            timeout: config.llm_timeout,
            retry_policy: config.retry_policy(),
        }
    }

    /// 替换重试策略
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// 请求一批词条的释义
    ///
    /// 网络错误、超时和解析失败都会按重试策略重试；
    /// 用完所有尝试后返回 [`LlmError::RetriesExhausted`]。
    pub async fn request_definitions(&self, labels: &[String]) -> Result<DefinitionMap, LlmError> {
        let request = build_definition_request(&self.model_name, self.temperature, labels);
        debug!(
            "释义请求: {} 个词条, payload: {}",
            labels.len(),
            truncate_text(&request.user_message, 200)
        );

        let request = &request;
        let results = retry_with_backoff(&self.retry_policy, |attempt| async move {
            debug!("第 {} 次调用 LLM，模型: {}", attempt, self.model_name);
            self.attempt(request).await
        })
        .await
        .map_err(|Exhausted { attempts, last_error }| LlmError::RetriesExhausted {
            attempts,
            source: Box::new(last_error),
        })?;

        info!("✓ LLM 返回 {} 个结果", results.len());
        Ok(results)
    }

    async fn attempt(&self, request: &DefinitionRequest) -> Result<DefinitionMap, LlmError> {
        let content = tokio::time::timeout(self.timeout, self.transport.complete(request))
            .await
            .map_err(|_| LlmError::Timeout {
                model: self.model_name.clone(),
                timeout_secs: self.timeout.as_secs(),
            })??;

        parse_definition_response(&content)
    }
}
