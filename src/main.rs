// ==========================================
// 销售订单行导入 - CLI 主入口
// ==========================================
// 用法: sale-orderlines-import <订单行文件.xlsx|.csv> <订单ID>
// 说明: 读取本地文件并 base64 编码，模拟 UI 上传载荷后调用 ImportApi
// ==========================================

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sale_orderlines_import::config::ImportConfig;
use sale_orderlines_import::db::{init_schema, open_sqlite_connection};
use sale_orderlines_import::{logging, ImportApi};
use std::path::Path;

fn print_usage() {
    eprintln!("用法: sale-orderlines-import <订单行文件.xlsx|.csv> <订单ID>");
    eprintln!();
    eprintln!("环境变量:");
    eprintln!("  SALE_IMPORT_DB  数据库文件路径（缺省为平台数据目录）");
    eprintln!("  RUST_LOG        日志级别（缺省为 info）");
}

#[tokio::main]
async fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", sale_orderlines_import::APP_NAME);
    tracing::info!("系统版本: {}", sale_orderlines_import::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        print_usage();
        std::process::exit(2);
    }

    let file_path = &args[1];
    let order_id: i64 = match args[2].parse() {
        Ok(id) => id,
        Err(_) => {
            tracing::error!("订单ID必须是整数: {}", args[2]);
            std::process::exit(2);
        }
    };

    // 读取配置并准备数据库
    let config = ImportConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);

    if let Some(parent) = Path::new(&config.db_path).parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("创建数据目录失败: {}", e);
            std::process::exit(1);
        }
    }
    match open_sqlite_connection(&config.db_path) {
        Ok(conn) => {
            if let Err(e) = init_schema(&conn) {
                tracing::error!("初始化数据库 schema 失败: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("打开数据库失败: {}", e);
            std::process::exit(1);
        }
    }

    // 读取文件并模拟 UI 上传载荷（base64）
    let bytes = match std::fs::read(file_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("读取文件失败: {} ({})", file_path, e);
            std::process::exit(1);
        }
    };
    let file_b64 = BASE64.encode(&bytes);
    let file_name = Path::new(file_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_path);

    // 执行导入
    let api = ImportApi::new(config.db_path.clone());
    match api.import_orderlines(file_name, &file_b64, order_id).await {
        Ok(response) => {
            let summary = serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| format!("{:?}", response));
            println!("{}", summary);
        }
        Err(e) => {
            tracing::error!("导入失败: {}", e);
            eprintln!("导入失败: {}", e);
            std::process::exit(1);
        }
    }
}
