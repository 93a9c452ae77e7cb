// ==========================================
// 销售订单行导入 - 领域层
// ==========================================
// 职责: 定义导入流程的类型化数据模型
// 红线: 行级不变量在清洗阶段保证，领域类型不携带业务逻辑
// ==========================================

pub mod orderline;

// 重导出核心类型
pub use orderline::{
    FilePayload, ImportBatch, ImportOutcome, ImportRow, OrderLineDraft, OrderLineRecord, RawTable,
    ReplaceStats,
};

// 重导出列名常量
pub use orderline::{DESC_COL, DISC_COL, PRICE_COL, QTY_COL, REF_COL, REQUIRED_COLUMNS};
