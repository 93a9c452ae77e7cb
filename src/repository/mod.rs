// ==========================================
// 销售订单行导入 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod order_line_repo;
pub mod order_line_repo_impl;
pub mod product_catalog_repo;
pub mod product_catalog_repo_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use order_line_repo::OrderLineRepository;
pub use order_line_repo_impl::OrderLineRepositoryImpl;
pub use product_catalog_repo::ProductCatalogRepository;
pub use product_catalog_repo_impl::ProductCatalogRepositoryImpl;
