// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、载荷构造等功能
// ==========================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rusqlite::{params, Connection};
use sale_orderlines_import::db::{init_schema, open_sqlite_connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 插入产品（显式 ID）
pub fn seed_product(conn: &Connection, id: i64, default_code: &str, name: &str) {
    conn.execute(
        "INSERT INTO product (id, default_code, name) VALUES (?1, ?2, ?3)",
        params![id, default_code, name],
    )
    .expect("Failed to seed product");
}

/// 插入订单（显式 ID）
pub fn seed_order(conn: &Connection, id: i64, name: &str) {
    conn.execute(
        "INSERT INTO sale_order (id, name) VALUES (?1, ?2)",
        params![id, name],
    )
    .expect("Failed to seed order");
}

/// 插入已有订单行（导入前的旧行）
pub fn seed_order_line(conn: &Connection, order_id: i64, product_id: i64, name: &str) {
    conn.execute(
        "INSERT INTO sale_order_line (order_id, product_id, name, product_uom_qty, price_unit, discount)
         VALUES (?1, ?2, ?3, 1.0, 1.0, 0.0)",
        params![order_id, product_id, name],
    )
    .expect("Failed to seed order line");
}

/// 统计指定订单的订单行数
pub fn count_lines(conn: &Connection, order_id: i64) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sale_order_line WHERE order_id = ?1",
        params![order_id],
        |row| row.get(0),
    )
    .expect("Failed to count lines")
}

/// 构造 CSV 上传载荷（base64 编码）
pub fn encode_csv(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// 构造带标准表头的 CSV 上传载荷
///
/// # 参数
/// - rows: 每行 [reference, description, quantity, unit_price, discount]
pub fn encode_orderlines_csv(rows: &[[&str; 5]]) -> String {
    let mut text = String::from("reference,description,quantity,unit_price,discount\n");
    for row in rows {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    encode_csv(&text)
}

/// 构造 xlsx 上传载荷（base64 编码，单工作表）
pub fn encode_orderlines_xlsx(rows: &[[&str; 5]]) -> String {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = ["reference", "description", "quantity", "unit_price", "discount"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet
                .write_string((row_idx + 1) as u32, col as u16, *value)
                .unwrap();
        }
    }

    let bytes = workbook.save_to_buffer().expect("Failed to build xlsx");
    STANDARD.encode(&bytes)
}
