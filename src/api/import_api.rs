// ==========================================
// 订单行导入API
// ==========================================
// 职责: 封装订单行导入相关功能，供 UI / CLI 调用
// 输入: 上传文件（文件名 + base64 内容）+ 当前订单 ID（调用上下文提供）
// ==========================================

use crate::api::error::ApiError;
use crate::domain::{FilePayload, OrderLineRecord};
use crate::importer::{
    OrderlinesImporter, OrderlinesImporterImpl, TableCleanerImpl, UniversalPayloadDecoder,
};
use crate::repository::{
    OrderLineRepository, OrderLineRepositoryImpl, ProductCatalogRepositoryImpl,
};
use serde::{Deserialize, Serialize};

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 目标订单ID
    pub order_id: i64,
    /// 本次导入ID（用于日志追溯）
    pub import_id: String,
    /// 文件数据行数（跳过空白行后）
    pub total_rows: usize,
    /// 去重删除的行数
    pub duplicated_rows: usize,
    /// 被删除的原有订单行数
    pub deleted_lines: usize,
    /// 新建订单行数
    pub created_lines: usize,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    db_path: String,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    /// 创建导入器（通用解码器 + 默认清洗器 + rusqlite 仓储）
    fn create_importer(
        &self,
    ) -> Result<
        OrderlinesImporterImpl<ProductCatalogRepositoryImpl, OrderLineRepositoryImpl>,
        ApiError,
    > {
        let catalog_repo = ProductCatalogRepositoryImpl::new(&self.db_path)?;
        let line_repo = OrderLineRepositoryImpl::new(&self.db_path)?;

        Ok(OrderlinesImporterImpl::new(
            catalog_repo,
            line_repo,
            Box::new(UniversalPayloadDecoder),
            Box::new(TableCleanerImpl),
        ))
    }

    /// 导入订单行（整体替换目标订单的行集合）
    ///
    /// # 参数
    /// - file_name: 上传文件名（用于识别格式）
    /// - file_b64: base64 编码的文件内容
    /// - order_id: 目标订单 ID
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果汇总
    /// - Err(ApiError): 单条可读错误消息，导入整体终止
    pub async fn import_orderlines(
        &self,
        file_name: &str,
        file_b64: &str,
        order_id: i64,
    ) -> Result<ImportApiResponse, ApiError> {
        let importer = self.create_importer()?;
        let payload = FilePayload::new(file_name, file_b64);

        let outcome = importer.import_orderlines(&payload, order_id).await?;

        Ok(ImportApiResponse {
            order_id: outcome.order_id,
            import_id: outcome.import_id,
            total_rows: outcome.total_rows,
            duplicated_rows: outcome.duplicated_rows,
            deleted_lines: outcome.replace_stats.deleted,
            created_lines: outcome.replace_stats.created,
            elapsed_ms: outcome.elapsed_time.as_millis() as i64,
        })
    }

    /// 查询指定订单的全部订单行（导入后刷新界面用）
    ///
    /// # 参数
    /// - order_id: 订单 ID
    pub async fn list_order_lines(&self, order_id: i64) -> Result<Vec<OrderLineRecord>, ApiError> {
        let line_repo = OrderLineRepositoryImpl::new(&self.db_path)?;
        Ok(line_repo.list_lines_by_order(order_id).await?)
    }
}
