// ==========================================
// 销售订单行导入 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 销售订单行批量导入工具（整体替换目标订单的行集合）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 类型化数据模型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 解码/清洗/解析/替换管道
pub mod importer;

// 配置层 - 运行时配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/schema）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    FilePayload, ImportBatch, ImportOutcome, ImportRow, OrderLineDraft, OrderLineRecord, RawTable,
    ReplaceStats,
};

// 导入器
pub use importer::{
    ImportError, OrderlinesImporter, OrderlinesImporterImpl, TableCleanerImpl,
    UniversalPayloadDecoder,
};

// 仓储
pub use repository::{
    OrderLineRepository, OrderLineRepositoryImpl, ProductCatalogRepository,
    ProductCatalogRepositoryImpl, RepositoryError,
};

// API
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "销售订单行导入工具";
