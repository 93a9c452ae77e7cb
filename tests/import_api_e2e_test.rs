// ==========================================
// ImportApi 端到端测试
// ==========================================
// 测试目标: 验证 API 层从上传载荷到数据库落库的完整链路
// ==========================================

mod test_helpers;

use sale_orderlines_import::api::ApiError;
use sale_orderlines_import::logging;
use sale_orderlines_import::ImportApi;
use test_helpers::{
    count_lines, create_test_db, encode_orderlines_csv, encode_orderlines_xlsx, seed_order,
    seed_order_line, seed_product,
};

#[tokio::test]
async fn test_import_xlsx_end_to_end() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_product(&conn, 42, "A1", "Widget");
    seed_product(&conn, 43, "B2", "Bolt");
    seed_order(&conn, 7, "SO007");
    seed_order_line(&conn, 7, 42, "old");

    let api = ImportApi::new(db_path.clone());

    let payload = encode_orderlines_xlsx(&[
        ["A1", "Widget", "3", "10.5", ""],
        ["B2", "Bolt", "2", "2.5", "5"],
    ]);
    let response = api
        .import_orderlines("orderlines.xlsx", &payload, 7)
        .await
        .expect("Import should succeed");

    assert_eq!(response.order_id, 7);
    assert_eq!(response.total_rows, 2);
    assert_eq!(response.duplicated_rows, 0);
    assert_eq!(response.deleted_lines, 1);
    assert_eq!(response.created_lines, 2);
    assert!(!response.import_id.is_empty());

    // 通过 API 查询验证落库结果
    let lines = api.list_order_lines(7).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_id, 42);
    assert_eq!(lines[0].product_uom_qty, 3.0);
    assert_eq!(lines[0].price_unit, 10.5);
    assert_eq!(lines[1].product_id, 43);
    assert_eq!(lines[1].discount, 5.0);
}

#[tokio::test]
async fn test_import_unknown_reference_leaves_order_untouched() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_product(&conn, 42, "A1", "Widget");
    seed_order(&conn, 7, "SO007");
    seed_order_line(&conn, 7, 42, "old");

    let api = ImportApi::new(db_path.clone());

    // 目录中无 "A1X"
    let payload = encode_orderlines_csv(&[["A1X", "Widget", "3", "10.5", "0"]]);
    let result = api.import_orderlines("orderlines.csv", &payload, 7).await;

    match result {
        Err(ApiError::ValidationError(msg)) => assert!(msg.contains("<A1X>")),
        other => panic!("Expected ValidationError, got {:?}", other.err()),
    }

    // 订单行保持不变
    assert_eq!(count_lines(&conn, 7), 1);
}

#[tokio::test]
async fn test_import_schema_error_message_names_columns() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_order(&conn, 7, "SO007");

    let api = ImportApi::new(db_path.clone());

    // 多了一个未识别列 note
    let text = "reference,description,quantity,unit_price,discount,note\nA1,Widget,3,10.5,0,x\n";
    let payload = test_helpers::encode_csv(text);
    let result = api.import_orderlines("orderlines.csv", &payload, 7).await;

    match result {
        Err(ApiError::ValidationError(msg)) => {
            assert!(msg.contains("reference"));
            assert!(msg.contains("discount"));
        }
        other => panic!("Expected ValidationError, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_import_unsupported_format() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_order(&conn, 7, "SO007");

    let api = ImportApi::new(db_path.clone());

    let payload = test_helpers::encode_csv("whatever");
    let result = api.import_orderlines("orderlines.pdf", &payload, 7).await;

    assert!(matches!(result, Err(ApiError::ImportError(_))));
}

#[tokio::test]
async fn test_import_unknown_order() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open db");
    seed_product(&conn, 42, "A1", "Widget");

    let api = ImportApi::new(db_path.clone());

    let payload = encode_orderlines_csv(&[["A1", "Widget", "3", "10.5", "0"]]);
    let result = api.import_orderlines("orderlines.csv", &payload, 999).await;

    assert!(matches!(result, Err(ApiError::NotFound(_))));
}
