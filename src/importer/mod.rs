// ==========================================
// 销售订单行导入 - 导入层
// ==========================================
// 职责: 上传文件解码、校验清洗、产品解析、订单行替换
// 支持: Excel (.xlsx/.xls), CSV (.csv)
// ==========================================

// 模块声明
pub mod error;
pub mod orderlines_importer_impl;
pub mod orderlines_importer_trait;
pub mod payload_decoder;
pub mod table_cleaner;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use orderlines_importer_impl::OrderlinesImporterImpl;
pub use payload_decoder::{CsvPayloadDecoder, ExcelPayloadDecoder, UniversalPayloadDecoder};
pub use table_cleaner::TableCleanerImpl;

// 重导出 Trait 接口
pub use orderlines_importer_trait::{OrderlinesImporter, PayloadDecoder, TableCleaner};
