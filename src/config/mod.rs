// ==========================================
// 销售订单行导入 - 配置层
// ==========================================
// 职责: 提供运行时配置（数据库路径）
// 来源: 环境变量，缺省落到平台数据目录
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "SALE_IMPORT_DB";

/// 导入工具运行时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,
}

impl ImportConfig {
    /// 从环境变量构造配置
    ///
    /// # 环境变量
    /// - SALE_IMPORT_DB: 数据库文件路径（缺省为平台数据目录下的 orderlines.db）
    pub fn from_env() -> Self {
        let db_path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| default_db_path());
        debug!(db_path = %db_path, "加载导入配置");
        Self { db_path }
    }
}

/// 默认数据库路径（平台数据目录，目录不可用时退回当前目录）
pub fn default_db_path() -> String {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("sale-orderlines-import")
        .join("orderlines.db")
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_not_empty() {
        let path = default_db_path();
        assert!(path.ends_with("orderlines.db"));
    }
}
