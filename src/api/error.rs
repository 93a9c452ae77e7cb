// ==========================================
// 销售订单行导入 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户友好的单条消息
// 约束: 每个失败对外只暴露一条可读消息（无结构化错误码）
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务校验错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// 目的: 校验类错误与技术类错误走不同的对外类别，消息本身保持单条可读
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::SchemaError(_)
            | ImportError::RowValidationError { .. }
            | ImportError::LookupError(_) => ApiError::ValidationError(err.to_string()),
            ImportError::Repository(repo_err) => repo_err.into(),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(e) => ApiError::Other(e),
            decode_err => ApiError::ImportError(decode_err.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
