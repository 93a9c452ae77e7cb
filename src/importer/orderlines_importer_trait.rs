// ==========================================
// 销售订单行导入 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 解码 → 列校验 → 清洗 → 行校验 → 去重 → 产品解析 → 替换订单行
// ==========================================

use crate::domain::{FilePayload, ImportBatch, ImportOutcome, ImportRow, RawTable};
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// OrderlinesImporter Trait
// ==========================================
// 用途: 订单行导入主接口
// 实现者: OrderlinesImporterImpl
#[async_trait]
pub trait OrderlinesImporter: Send + Sync {
    /// 导入上传文件并整体替换目标订单的订单行
    ///
    /// # 参数
    /// - payload: 上传文件载荷（文件名 + base64 内容）
    /// - order_id: 目标订单 ID（由调用上下文提供）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 导入结果（行数统计、替换统计、耗时）
    /// - Err(ImportError): 解码/校验/解析/落库错误，任一错误终止整个导入
    ///
    /// # 导入流程（4个阶段）
    /// 1. 解码: base64 → 字节 → 表格
    /// 2. 校验与清洗: 列校验 / 数值归正 / 文本去空白 / 行校验 / 去重
    /// 3. 产品解析: 按编码批量查询产品目录，首个未命中即失败
    /// 4. 行替换: 单事务内删除原有行并写入新行
    async fn import_orderlines(
        &self,
        payload: &FilePayload,
        order_id: i64,
    ) -> ImportResult<ImportOutcome>;
}

// ==========================================
// PayloadDecoder Trait
// ==========================================
// 用途: 上传载荷解码接口（阶段 1）
// 实现者: CsvPayloadDecoder, ExcelPayloadDecoder, UniversalPayloadDecoder
pub trait PayloadDecoder: Send + Sync {
    /// 将上传载荷解码为原始表格（表头 + 字符串单元格）
    ///
    /// # 参数
    /// - payload: 上传文件载荷
    ///
    /// # 返回
    /// - Ok(RawTable): 表头与数据行（全空白行已跳过）
    /// - Err: base64 解码失败、格式不支持、表格解析失败
    fn decode_to_table(&self, payload: &FilePayload) -> ImportResult<RawTable>;
}

// ==========================================
// TableCleaner Trait
// ==========================================
// 用途: 校验与清洗接口（阶段 2）
// 实现者: TableCleanerImpl
pub trait TableCleaner: Send + Sync {
    /// 校验列集合与必需列全集完全一致
    ///
    /// # 返回
    /// - Ok(()): 列集合合法
    /// - Err(SchemaError): 存在未识别列或缺失列，消息列出全部必需列
    fn validate_columns(&self, table: &RawTable) -> ImportResult<()>;

    /// 将原始行转为类型化导入行
    ///
    /// # 规则
    /// - 数值列: 解析为 f64，空白或非法值静默归 0（宽松策略，不报错）
    /// - 文本列: 去首尾空白
    fn to_import_rows(&self, table: &RawTable) -> Vec<ImportRow>;

    /// 行校验（全有或全无）
    ///
    /// # 返回
    /// - Err(RowValidationError): 任一行编码为空或数量非正，整批拒绝，
    ///   消息携带首个违规行号
    fn validate_rows(&self, rows: &[ImportRow]) -> ImportResult<()>;

    /// 去除完全重复的行（五列全等），保留首次出现，维持原有顺序
    fn dedup_rows(&self, rows: Vec<ImportRow>) -> Vec<ImportRow>;

    /// 完整清洗流程: 列校验 → 类型转换 → 行校验 → 去重
    fn clean(&self, table: &RawTable) -> ImportResult<ImportBatch> {
        self.validate_columns(table)?;
        let rows = self.to_import_rows(table);
        self.validate_rows(&rows)?;
        Ok(ImportBatch {
            rows: self.dedup_rows(rows),
        })
    }
}
