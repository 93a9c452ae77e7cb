// ==========================================
// 销售订单行导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 所有错误面向用户、单条消息、不重试
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 解码错误 =====
    #[error("文件解码失败: {0}")]
    DecodeError(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 校验错误 =====
    #[error("导入列不符合要求，必需列: {0}")]
    SchemaError(String),

    #[error("行校验失败 (行 {row}): 所有行必须包含产品编码且数量为正")]
    RowValidationError { row: usize },

    // ===== 产品解析错误 =====
    #[error("产品不存在: <{0}>")]
    LookupError(String),

    // ===== 数据访问错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 构造 SchemaError，消息中列出全部必需列
    pub fn schema_error() -> Self {
        ImportError::SchemaError(crate::domain::REQUIRED_COLUMNS.join(", "))
    }
}

// 实现 From<base64::DecodeError>
impl From<base64::DecodeError> for ImportError {
    fn from(err: base64::DecodeError) -> Self {
        ImportError::DecodeError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
