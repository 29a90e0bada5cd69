use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::vocab::{DefinedEntry, VocabEntry};

/// 从 JSON 文件加载词条列表
pub async fn load_vocab_entries(path: impl AsRef<Path>) -> AppResult<Vec<VocabEntry>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let entries: Vec<VocabEntry> =
        serde_json::from_str(&content).map_err(|e| AppError::json_parse_failed(&path_str, e))?;

    info!("正在加载: {}，共 {} 个词条", path_str, entries.len());
    Ok(entries)
}

/// 将保留的词条写入 JSON 文件，覆盖原有内容
///
/// 输出为两空格缩进的 JSON 数组，非 ASCII 字符原样保留，末尾带换行。
pub async fn write_defined_entries(path: impl AsRef<Path>, entries: &[DefinedEntry]) -> AppResult<()> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let mut content =
        serde_json::to_string_pretty(entries).map_err(|e| AppError::json_parse_failed(&path_str, e))?;
    content.push('\n');

    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(&path_str, e))?;

    Ok(())
}
