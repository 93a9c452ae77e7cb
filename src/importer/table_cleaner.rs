// ==========================================
// 销售订单行导入 - 校验与清洗器实现
// ==========================================
// 职责: 列校验 / 数值归正 / TRIM / 行校验 / 去重
// 策略: 数值列宽松转换（非法归 0），行校验全有或全无
// ==========================================

use crate::domain::orderline::{DESC_COL, DISC_COL, PRICE_COL, QTY_COL, REF_COL, REQUIRED_COLUMNS};
use crate::domain::{ImportRow, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::orderlines_importer_trait::TableCleaner as TableCleanerTrait;
use std::collections::HashSet;

pub struct TableCleanerImpl;

impl TableCleanerImpl {
    /// 数值单元格宽松转换: 去空白后解析 f64，失败归 0
    fn coerce_numeric(value: Option<&String>) -> f64 {
        value
            .map(|v| v.trim())
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// 文本单元格: 去首尾空白，缺失视为空串
    fn clean_text(value: Option<&String>) -> String {
        value.map(|v| v.trim().to_string()).unwrap_or_default()
    }
}

impl TableCleanerTrait for TableCleanerImpl {
    /// 列集合必须与必需列全集完全一致（顺序不限）
    fn validate_columns(&self, table: &RawTable) -> ImportResult<()> {
        let required: HashSet<&str> = REQUIRED_COLUMNS.iter().copied().collect();
        let present: HashSet<&str> = table.columns.iter().map(|c| c.as_str()).collect();

        // 未识别列或缺失列均整体拒绝
        if present != required {
            return Err(ImportError::schema_error());
        }

        Ok(())
    }

    fn to_import_rows(&self, table: &RawTable) -> Vec<ImportRow> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| ImportRow {
                reference: Self::clean_text(row.get(REF_COL)),
                description: Self::clean_text(row.get(DESC_COL)),
                quantity: Self::coerce_numeric(row.get(QTY_COL)),
                unit_price: Self::coerce_numeric(row.get(PRICE_COL)),
                discount: Self::coerce_numeric(row.get(DISC_COL)),
                product_id: None,
                row_number: idx + 1,
            })
            .collect()
    }

    /// 任一行编码为空或数量非正即整批拒绝
    fn validate_rows(&self, rows: &[ImportRow]) -> ImportResult<()> {
        for row in rows {
            if row.reference.is_empty() || row.quantity <= 0.0 {
                return Err(ImportError::RowValidationError {
                    row: row.row_number,
                });
            }
        }
        Ok(())
    }

    /// 五列全等视为重复行，保留首次出现
    fn dedup_rows(&self, rows: Vec<ImportRow>) -> Vec<ImportRow> {
        let mut seen = HashSet::new();
        rows.into_iter()
            .filter(|row| seen.insert(row.dedup_key()))
            .collect()
    }
}
