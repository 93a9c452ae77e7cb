// ==========================================
// 销售订单行导入 - 产品目录 Repository 实现
// ==========================================
// 实现: rusqlite + 单次 IN 批量查询
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_catalog_repo::ProductCatalogRepository;
use async_trait::async_trait;
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductCatalogRepositoryImpl
// ==========================================
pub struct ProductCatalogRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ProductCatalogRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl ProductCatalogRepository for ProductCatalogRepositoryImpl {
    async fn map_ids_by_default_codes(
        &self,
        codes: &[String],
    ) -> RepositoryResult<HashMap<String, i64>> {
        if codes.is_empty() {
            return Ok(HashMap::new());
        }

        // 去重后构造 IN 子句（参数化，防止 SQL 注入）
        let unique_codes: Vec<&String> = {
            let mut seen = HashSet::new();
            codes.iter().filter(|c| seen.insert(c.as_str())).collect()
        };

        let placeholders = vec!["?"; unique_codes.len()].join(", ");
        let sql = format!(
            "SELECT default_code, id FROM product WHERE default_code IN ({})",
            placeholders
        );

        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(unique_codes.iter()),
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        )?;

        let mut mapping = HashMap::new();
        for row in rows {
            let (code, id) = row?;
            mapping.insert(code, id);
        }

        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use tempfile::NamedTempFile;

    fn create_catalog() -> (NamedTempFile, ProductCatalogRepositoryImpl) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        let conn = open_sqlite_connection(&db_path).unwrap();
        init_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO product (id, default_code, name) VALUES (42, 'A1', 'Widget'), (43, 'B2', 'Bolt')",
            [],
        )
        .unwrap();
        drop(conn);

        let repo = ProductCatalogRepositoryImpl::new(&db_path).unwrap();
        (temp_file, repo)
    }

    #[tokio::test]
    async fn test_map_ids_hits_and_misses() {
        let (_tmp, repo) = create_catalog();

        let codes = vec!["A1".to_string(), "B2".to_string(), "ZZ".to_string()];
        let mapping = repo.map_ids_by_default_codes(&codes).await.unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("A1"), Some(&42));
        assert_eq!(mapping.get("B2"), Some(&43));
        assert!(!mapping.contains_key("ZZ"));
    }

    #[tokio::test]
    async fn test_map_ids_empty_input() {
        let (_tmp, repo) = create_catalog();
        let mapping = repo.map_ids_by_default_codes(&[]).await.unwrap();
        assert!(mapping.is_empty());
    }

    #[tokio::test]
    async fn test_map_ids_duplicate_codes() {
        let (_tmp, repo) = create_catalog();

        let codes = vec!["A1".to_string(), "A1".to_string()];
        let mapping = repo.map_ids_by_default_codes(&codes).await.unwrap();

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("A1"), Some(&42));
    }
}
