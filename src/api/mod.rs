// ==========================================
// 销售订单行导入 - API 层
// ==========================================
// 职责: 对 UI / CLI 暴露业务接口，统一错误出口
// ==========================================

pub mod error;
pub mod import_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
