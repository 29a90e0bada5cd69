//! API 密钥解析
//!
//! 先读环境变量，再读本地 JSON 配置文件中的同名字段；
//! 两处都没有时返回 [`ConfigError::MissingCredential`]，由调用方直接终止运行。

use std::path::Path;

use tracing::debug;

use crate::config::API_KEY_VAR;
use crate::error::ConfigError;

/// 解析 API 密钥
pub fn resolve_api_key(secrets_path: impl AsRef<Path>) -> Result<String, ConfigError> {
    resolve_from(std::env::var(API_KEY_VAR).ok(), secrets_path.as_ref())
}

pub(crate) fn resolve_from(env_value: Option<String>, secrets_path: &Path) -> Result<String, ConfigError> {
    if let Some(key) = env_value.filter(|key| !key.trim().is_empty()) {
        debug!("从环境变量 {} 读取 API 密钥", API_KEY_VAR);
        return Ok(key);
    }

    if let Some(key) = read_secrets_file(secrets_path) {
        debug!("从 {} 读取 API 密钥", secrets_path.display());
        return Ok(key);
    }

    Err(ConfigError::MissingCredential {
        var_name: API_KEY_VAR.to_string(),
        secrets_path: secrets_path.display().to_string(),
    })
}

/// 文件不存在、无法解析或字段缺失都视为"没有密钥"
fn read_secrets_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let secrets: serde_json::Value = serde_json::from_str(&content).ok()?;
    secrets
        .get(API_KEY_VAR)
        .and_then(|v| v.as_str())
        .filter(|key| !key.trim().is_empty())
        .map(str::to_string)
}
