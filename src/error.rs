use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
}

/// 配置错误（致命，不重试）
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量和本地配置文件里都没有 API 密钥
    #[error("缺少 {var_name}：请设置环境变量，或在 {secrets_path} 中提供同名字段")]
    MissingCredential {
        var_name: String,
        secrets_path: String,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 专有名词列表不可用（可恢复：退化为空过滤器）
    #[error("专有名词列表不可用 ({path}): {source}")]
    ProperNamesUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// LLM 服务错误
///
/// 除 `RetriesExhausted` 以外都是单次调用的临时错误，会被重试。
#[derive(Debug, Error)]
pub enum LlmError {
    /// 网络请求失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    RequestFailed { model: String, message: String },
    /// 单次调用超时
    #[error("LLM API调用超时 (模型: {model}, {timeout_secs}秒)")]
    Timeout { model: String, timeout_secs: u64 },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 返回内容不是预期的 JSON
    #[error("无法解析LLM返回的JSON: {reason}")]
    ResponseParseFailed { reason: String },
    /// 重试次数耗尽（致命）
    #[error("LLM调用在 {attempts} 次尝试后仍然失败: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<LlmError>,
    },
}

impl LlmError {
    /// 是否为重试耗尽后的永久错误
    pub fn is_permanent(&self) -> bool {
        matches!(self, LlmError::RetriesExhausted { .. })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::File(FileError::JsonParseFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
