// ==========================================
// 销售订单行导入 - 订单行领域模型
// ==========================================
// 用途: 导入管道各阶段的中间产物与最终产物
// 对齐: schema.sql product / sale_order / sale_order_line 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ==========================================
// 列名常量（表头区分大小写）
// ==========================================

pub const REF_COL: &str = "reference"; // 产品编码列
pub const DESC_COL: &str = "description"; // 描述列
pub const QTY_COL: &str = "quantity"; // 数量列
pub const PRICE_COL: &str = "unit_price"; // 单价列
pub const DISC_COL: &str = "discount"; // 折扣列

/// 必需列全集（顺序用于错误提示）
pub const REQUIRED_COLUMNS: [&str; 5] = [REF_COL, DESC_COL, QTY_COL, PRICE_COL, DISC_COL];

/// 数值列（清洗阶段强制转数值，非法值归 0）
pub const NUMERIC_COLUMNS: [&str; 3] = [QTY_COL, PRICE_COL, DISC_COL];

/// 文本列（清洗阶段去首尾空白）
pub const TEXT_COLUMNS: [&str; 2] = [REF_COL, DESC_COL];

// ==========================================
// FilePayload - 上传文件载荷
// ==========================================
// 用途: UI 上传的文件内容（base64 编码）+ 文件名
// 说明: 文件名仅用于识别格式（.xlsx/.xls/.csv）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePayload {
    pub file_name: String,
    pub content_b64: String,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, content_b64: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_b64: content_b64.into(),
        }
    }

    /// 文件扩展名（小写，无扩展名返回空串）
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

// ==========================================
// RawTable - 解码后的原始表格
// ==========================================
// 用途: 解码阶段产物（表头 + 字符串单元格）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// 表头列名（按文件内出现顺序）
    pub columns: Vec<String>,
    /// 数据行（列名 → 单元格原文，全空白行已在解码阶段跳过）
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// ImportRow - 清洗后的导入行
// ==========================================
// 不变量: reference 非空、quantity > 0（由行校验保证）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    pub reference: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub discount: f64,

    /// 解析得到的产品 ID（解析阶段回填）
    pub product_id: Option<i64>,

    // 元信息
    pub row_number: usize, // 原始文件行号（用于错误提示，1 起）
}

impl ImportRow {
    /// 去重键：五个业务列全等视为重复行（行号、product_id 不参与）
    pub fn dedup_key(&self) -> (String, String, u64, u64, u64) {
        (
            self.reference.clone(),
            self.description.clone(),
            self.quantity.to_bits(),
            self.unit_price.to_bits(),
            self.discount.to_bits(),
        )
    }
}

// ==========================================
// ImportBatch - 清洗后的完整批次
// ==========================================
// 不变量: 无重复行；所有行已通过行校验
// 生命周期: 每次导入构造一次，用后即弃
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub rows: Vec<ImportRow>,
}

impl ImportBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按行序提取产品编码列表（用于批量查询）
    pub fn references(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.reference.clone()).collect()
    }
}

// ==========================================
// OrderLineDraft - 待写入的订单行
// ==========================================
// 用途: 替换阶段输入，字段与 sale_order_line 表一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineDraft {
    pub order_id: i64,
    pub product_id: i64,
    pub name: String, // 行名称（取描述列）
    pub product_uom_qty: f64,
    pub price_unit: f64,
    pub discount: f64,
}

impl OrderLineDraft {
    /// 由已解析的导入行构造（product_id 缺失时返回 None，调用方视为内部错误）
    pub fn from_resolved_row(order_id: i64, row: &ImportRow) -> Option<Self> {
        Some(Self {
            order_id,
            product_id: row.product_id?,
            name: row.description.clone(),
            product_uom_qty: row.quantity,
            price_unit: row.unit_price,
            discount: row.discount,
        })
    }
}

// ==========================================
// OrderLineRecord - 已落库的订单行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub name: String,
    pub product_uom_qty: f64,
    pub price_unit: f64,
    pub discount: f64,
    pub created_at: Option<DateTime<Utc>>,
}

// ==========================================
// ReplaceStats - 替换阶段统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReplaceStats {
    pub deleted: usize, // 被删除的原有行数
    pub created: usize, // 新建行数
}

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
// 用途: 导入器返回的汇总信息（API 层据此构造响应）
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub import_id: String, // 本次导入 ID（UUID，用于日志追溯）
    pub order_id: i64,
    pub total_rows: usize,      // 文件数据行数（跳过空白行后）
    pub duplicated_rows: usize, // 去重删除的行数
    pub replace_stats: ReplaceStats,
    pub elapsed_time: Duration,
}
