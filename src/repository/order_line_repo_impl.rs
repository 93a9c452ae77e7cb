// ==========================================
// 销售订单行导入 - 订单行 Repository 实现
// ==========================================
// 实现: rusqlite
// 约束: 替换操作在单事务内完成，失败整体回滚
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{OrderLineDraft, OrderLineRecord, ReplaceStats};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::order_line_repo::OrderLineRepository;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderLineRepositoryImpl
// ==========================================
pub struct OrderLineRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl OrderLineRepositoryImpl {
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

    /// 校验订单存在（不存在时替换操作无意义，直接报 NotFound）
    fn ensure_order_exists(conn: &Connection, order_id: i64) -> RepositoryResult<()> {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT id FROM sale_order WHERE id = ?1",
                params![order_id],
                |row| row.get(0),
            )
            .optional()?;

        if exists.is_none() {
            return Err(RepositoryError::NotFound {
                entity: "sale_order".to_string(),
                id: order_id.to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl OrderLineRepository for OrderLineRepositoryImpl {
    async fn replace_order_lines(
        &self,
        order_id: i64,
        drafts: &[OrderLineDraft],
    ) -> RepositoryResult<ReplaceStats> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        Self::ensure_order_exists(&conn, order_id)?;

        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // 删除原有行
        let deleted = tx.execute(
            "DELETE FROM sale_order_line WHERE order_id = ?1",
            params![order_id],
        )?;

        // 写入新行
        let created = {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO sale_order_line (
                    order_id, product_id, name, product_uom_qty, price_unit, discount, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )?;

            let now = Utc::now();
            let mut count = 0;
            for draft in drafts {
                stmt.execute(params![
                    draft.order_id,
                    draft.product_id,
                    draft.name,
                    draft.product_uom_qty,
                    draft.price_unit,
                    draft.discount,
                    now.to_rfc3339(),
                ])?;
                count += 1;
            }
            count
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(ReplaceStats { deleted, created })
    }

    async fn list_lines_by_order(
        &self,
        order_id: i64,
    ) -> RepositoryResult<Vec<OrderLineRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, order_id, product_id, name, product_uom_qty, price_unit, discount, created_at
            FROM sale_order_line
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map(params![order_id], |row| {
            Ok(OrderLineRecord {
                id: row.get(0)?,
                order_id: row.get(1)?,
                product_id: row.get(2)?,
                name: row.get(3)?,
                product_uom_qty: row.get(4)?,
                price_unit: row.get(5)?,
                discount: row.get(6)?,
                created_at: row
                    .get::<_, Option<String>>(7)?
                    .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
                    .map(|dt| dt.with_timezone(&Utc)),
            })
        })?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }

        Ok(lines)
    }

    async fn count_lines_by_order(&self, order_id: i64) -> RepositoryResult<usize> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sale_order_line WHERE order_id = ?1",
            params![order_id],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }
}
