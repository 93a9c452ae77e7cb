// ==========================================
// 销售订单行导入 - 订单行导入器实现
// ==========================================
// 职责: 整合导入流程，从上传载荷到订单行落库
// 流程: 解码 → 校验与清洗 → 产品解析 → 行替换
// ==========================================

use crate::domain::{FilePayload, ImportBatch, ImportOutcome, OrderLineDraft};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::orderlines_importer_trait::{
    OrderlinesImporter, PayloadDecoder, TableCleaner,
};
use crate::repository::{OrderLineRepository, ProductCatalogRepository};
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// OrderlinesImporterImpl - 订单行导入器实现
// ==========================================
pub struct OrderlinesImporterImpl<C, L>
where
    C: ProductCatalogRepository,
    L: OrderLineRepository,
{
    // 数据访问层
    catalog_repo: C,
    line_repo: L,

    // 导入组件
    decoder: Box<dyn PayloadDecoder>,
    cleaner: Box<dyn TableCleaner>,
}

impl<C, L> OrderlinesImporterImpl<C, L>
where
    C: ProductCatalogRepository,
    L: OrderLineRepository,
{
    /// 创建新的 OrderlinesImporter 实例
    ///
    /// # 参数
    /// - catalog_repo: 产品目录仓储
    /// - line_repo: 订单行仓储
    /// - decoder: 上传载荷解码器
    /// - cleaner: 校验与清洗器
    pub fn new(
        catalog_repo: C,
        line_repo: L,
        decoder: Box<dyn PayloadDecoder>,
        cleaner: Box<dyn TableCleaner>,
    ) -> Self {
        Self {
            catalog_repo,
            line_repo,
            decoder,
            cleaner,
        }
    }

    /// 产品解析: 批量查询编码映射，回填 product_id
    ///
    /// 任一编码未命中即失败，按行序报告首个未解析编码（快速失败）
    async fn resolve_products(&self, batch: &mut ImportBatch) -> ImportResult<()> {
        let refs = batch.references();
        let mapping = self.catalog_repo.map_ids_by_default_codes(&refs).await?;

        for row in &mut batch.rows {
            match mapping.get(&row.reference) {
                Some(id) => row.product_id = Some(*id),
                None => return Err(ImportError::LookupError(row.reference.clone())),
            }
        }

        Ok(())
    }

    /// 构造待写入的订单行
    fn build_drafts(&self, order_id: i64, batch: &ImportBatch) -> ImportResult<Vec<OrderLineDraft>> {
        batch
            .rows
            .iter()
            .map(|row| {
                OrderLineDraft::from_resolved_row(order_id, row).ok_or_else(|| {
                    // 解析阶段已保证 product_id 存在，走到这里属于内部错误
                    ImportError::InternalError(format!("行 {} 缺少产品 ID", row.row_number))
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<C, L> OrderlinesImporter for OrderlinesImporterImpl<C, L>
where
    C: ProductCatalogRepository + Send + Sync,
    L: OrderLineRepository + Send + Sync,
{
    #[instrument(skip(self, payload), fields(import_id, order_id = order_id))]
    async fn import_orderlines(
        &self,
        payload: &FilePayload,
        order_id: i64,
    ) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let import_id = Uuid::new_v4().to_string();

        info!(
            import_id = %import_id,
            file_name = %payload.file_name,
            order_id = order_id,
            "开始导入订单行"
        );

        // === 步骤 1: 解码上传载荷 ===
        debug!("步骤 1: 解码上传载荷");
        let table = self.decoder.decode_to_table(payload).map_err(|e| {
            error!(error = %e, "载荷解码失败");
            e
        })?;
        let total_rows = table.row_count();
        info!(total_rows = total_rows, "载荷解码完成");

        // === 步骤 2: 校验与清洗 ===
        debug!("步骤 2: 校验与清洗");
        let mut batch = self.cleaner.clean(&table).map_err(|e| {
            error!(error = %e, "数据校验失败");
            e
        })?;
        let duplicated_rows = total_rows - batch.len();
        info!(
            rows = batch.len(),
            duplicated = duplicated_rows,
            "校验与清洗完成"
        );

        // === 步骤 3: 产品解析 ===
        debug!("步骤 3: 产品解析");
        self.resolve_products(&mut batch).await.map_err(|e| {
            error!(error = %e, "产品解析失败");
            e
        })?;
        debug!("产品解析完成");

        // === 步骤 4: 行替换（单事务） ===
        debug!("步骤 4: 行替换");
        let drafts = self.build_drafts(order_id, &batch)?;
        let replace_stats = self.line_repo.replace_order_lines(order_id, &drafts).await?;

        let elapsed_time = start_time.elapsed();
        info!(
            import_id = %import_id,
            order_id = order_id,
            deleted = replace_stats.deleted,
            created = replace_stats.created,
            elapsed_ms = elapsed_time.as_millis(),
            "订单行导入完成"
        );

        Ok(ImportOutcome {
            import_id,
            order_id,
            total_rows,
            duplicated_rows,
            replace_stats,
            elapsed_time,
        })
    }
}
