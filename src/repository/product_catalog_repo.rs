// ==========================================
// 销售订单行导入 - 产品目录 Repository Trait
// ==========================================
// 职责: 定义产品目录只读访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据访问
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use std::collections::HashMap;

// ==========================================
// ProductCatalogRepository Trait
// ==========================================
// 用途: 按产品编码批量解析产品 ID（导入阶段 3）
// 实现者: ProductCatalogRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait ProductCatalogRepository: Send + Sync {
    /// 批量查询产品编码对应的产品 ID
    ///
    /// # 参数
    /// - codes: 产品编码列表（default_code，允许重复）
    ///
    /// # 返回
    /// - Ok(HashMap<编码, 产品ID>): 仅包含命中的编码，未命中的编码不出现在映射中
    /// - Err: 数据库错误
    ///
    /// # 说明
    /// - 单次批量查询（IN 子句），不做逐条往返
    /// - 未命中不在此处报错，由导入器按行序判定首个未解析编码
    async fn map_ids_by_default_codes(
        &self,
        codes: &[String],
    ) -> RepositoryResult<HashMap<String, i64>>;
}
