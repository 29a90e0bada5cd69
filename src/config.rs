use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::utils::retry::RetryPolicy;

/// 保存 API 密钥的环境变量名，本地配置文件中使用同名字段
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 词汇输入文件（JSON 数组）
    pub input_path: String,
    /// 输出文件，默认覆盖输入文件
    pub output_path: String,
    /// 专有名词列表，每行一个
    pub proper_names_path: String,
    /// 本地密钥文件
    pub secrets_path: String,
    /// 每批发送给 LLM 的词条数量
    pub batch_size: NonZeroUsize,
    // --- LLM 配置 ---
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    /// 每批最多尝试次数（含首次）
    pub llm_max_attempts: u32,
    /// 单次调用超时
    pub llm_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let input_path = "vocab_relevant_clean.json".to_string();
        Self {
            output_path: input_path.clone(),
            input_path,
            proper_names_path: "/usr/share/dict/propernames".to_string(),
            secrets_path: "environment.local.json".to_string(),
            batch_size: NonZeroUsize::new(120).unwrap_or(NonZeroUsize::MIN),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4.1-nano".to_string(),
            llm_temperature: 0.2,
            llm_max_attempts: 4,
            llm_timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    ///
    /// 数值类变量格式错误时返回 [`ConfigError::EnvVarParseFailed`]。
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        let input_path = std::env::var("VOCAB_INPUT_PATH").unwrap_or(default.input_path);
        // 未单独指定输出路径时，覆盖输入文件
        let output_path = std::env::var("VOCAB_OUTPUT_PATH").unwrap_or_else(|_| input_path.clone());

        Ok(Self {
            input_path,
            output_path,
            proper_names_path: std::env::var("PROPER_NAMES_PATH").unwrap_or(default.proper_names_path),
            secrets_path: std::env::var("SECRETS_PATH").unwrap_or(default.secrets_path),
            batch_size: parse_env("BATCH_SIZE", "正整数")?.unwrap_or(default.batch_size),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: parse_env("LLM_TEMPERATURE", "f32")?.unwrap_or(default.llm_temperature),
            llm_max_attempts: parse_env::<u32>("LLM_MAX_ATTEMPTS", "u32")?
                .filter(|attempts| *attempts > 0)
                .unwrap_or(default.llm_max_attempts),
            llm_timeout: parse_env("LLM_TIMEOUT_SECS", "u64")?
                .map(Duration::from_secs)
                .unwrap_or(default.llm_timeout),
        })
    }

    /// 每批请求的重试策略
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.llm_max_attempts,
            ..RetryPolicy::default()
        }
    }
}

fn parse_env<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
