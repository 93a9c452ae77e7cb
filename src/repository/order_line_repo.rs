// ==========================================
// 销售订单行导入 - 订单行 Repository Trait
// ==========================================
// 职责: 定义订单行数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::{OrderLineDraft, OrderLineRecord, ReplaceStats};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// OrderLineRepository Trait
// ==========================================
// 用途: 订单行整体替换与查询（导入阶段 4）
// 实现者: OrderLineRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait OrderLineRepository: Send + Sync {
    /// 整体替换指定订单的订单行（删除原有行 + 写入新行，单事务）
    ///
    /// # 参数
    /// - order_id: 目标订单 ID
    /// - drafts: 待写入的订单行列表
    ///
    /// # 返回
    /// - Ok(ReplaceStats): 删除行数与新建行数
    /// - Err(NotFound): 订单不存在
    /// - Err: 数据库错误（整个事务回滚，原有行保持不变）
    async fn replace_order_lines(
        &self,
        order_id: i64,
        drafts: &[OrderLineDraft],
    ) -> RepositoryResult<ReplaceStats>;

    /// 查询指定订单的全部订单行（按行 ID 升序）
    ///
    /// # 参数
    /// - order_id: 订单 ID
    async fn list_lines_by_order(&self, order_id: i64)
        -> RepositoryResult<Vec<OrderLineRecord>>;

    /// 统计指定订单的订单行数
    async fn count_lines_by_order(&self, order_id: i64) -> RepositoryResult<usize>;
}
