// ==========================================
// 销售订单行导入 - 上传载荷解码器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输入: base64 编码的文件内容（UI 上传格式）
// ==========================================

use crate::domain::{FilePayload, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::orderlines_importer_trait::PayloadDecoder;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use calamine::{open_workbook_from_rs, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;

/// 解码 base64 载荷为字节（容忍 MIME 换行等空白字符）
fn decode_payload_bytes(payload: &FilePayload) -> ImportResult<Vec<u8>> {
    let compact: String = payload
        .content_b64
        .split_whitespace()
        .collect::<Vec<_>>()
        .concat();

    if compact.is_empty() {
        return Err(ImportError::DecodeError("上传内容为空".to_string()));
    }

    Ok(BASE64.decode(compact.as_bytes())?)
}

/// 由表头与若干行单元格构造 RawTable，跳过全空白行
fn build_table(headers: Vec<String>, raw_rows: Vec<Vec<String>>) -> RawTable {
    let mut rows = Vec::new();
    for cells in raw_rows {
        let mut row_map = HashMap::new();
        for (col_idx, value) in cells.into_iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value);
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.trim().is_empty()) {
            continue;
        }

        rows.push(row_map);
    }

    RawTable {
        columns: headers,
        rows,
    }
}

// ==========================================
// CSV 解码器实现
// ==========================================
pub struct CsvPayloadDecoder;

impl PayloadDecoder for CsvPayloadDecoder {
    fn decode_to_table(&self, payload: &FilePayload) -> ImportResult<RawTable> {
        let bytes = decode_payload_bytes(payload)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes.as_slice());

        // 读取表头（区分大小写，仅去首尾空白）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut raw_rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            raw_rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(build_table(headers, raw_rows))
    }
}

// ==========================================
// Excel 解码器实现
// ==========================================
pub struct ExcelPayloadDecoder;

impl ExcelPayloadDecoder {
    /// 从第一个工作表提取表头与数据行
    fn extract_rows<RS, R>(mut workbook: R) -> ImportResult<(Vec<String>, Vec<Vec<String>>)>
    where
        RS: std::io::Read + std::io::Seek,
        R: Reader<RS>,
        R::Error: std::fmt::Display,
    {
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let raw_rows: Vec<Vec<String>> = rows
            .map(|data_row| data_row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Ok((headers, raw_rows))
    }
}

impl PayloadDecoder for ExcelPayloadDecoder {
    fn decode_to_table(&self, payload: &FilePayload) -> ImportResult<RawTable> {
        let bytes = decode_payload_bytes(payload)?;
        let cursor = Cursor::new(bytes);

        let (headers, raw_rows) = match payload.extension().as_str() {
            "xls" => {
                let workbook: Xls<_> = open_workbook_from_rs(cursor)
                    .map_err(|e: calamine::XlsError| ImportError::ExcelParseError(e.to_string()))?;
                Self::extract_rows(workbook)?
            }
            _ => {
                let workbook: Xlsx<_> = open_workbook_from_rs(cursor)
                    .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;
                Self::extract_rows(workbook)?
            }
        };

        Ok(build_table(headers, raw_rows))
    }
}

// ==========================================
// 通用解码器（根据文件名扩展名自动选择）
// ==========================================
pub struct UniversalPayloadDecoder;

impl PayloadDecoder for UniversalPayloadDecoder {
    fn decode_to_table(&self, payload: &FilePayload) -> ImportResult<RawTable> {
        match payload.extension().as_str() {
            "csv" => CsvPayloadDecoder.decode_to_table(payload),
            "xlsx" | "xls" => ExcelPayloadDecoder.decode_to_table(payload),
            ext => Err(ImportError::UnsupportedFormat(ext.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn csv_payload(name: &str, text: &str) -> FilePayload {
        FilePayload::new(name, STANDARD.encode(text))
    }

    #[test]
    fn test_csv_decoder_basic() {
        let payload = csv_payload(
            "orders.csv",
            "reference,description,quantity,unit_price,discount\nA1,Widget,3,10.5,\nB2,Bolt,1,2,0\n",
        );

        let table = CsvPayloadDecoder.decode_to_table(&payload).unwrap();

        assert_eq!(
            table.columns,
            vec!["reference", "description", "quantity", "unit_price", "discount"]
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].get("reference"), Some(&"A1".to_string()));
        assert_eq!(table.rows[1].get("unit_price"), Some(&"2".to_string()));
    }

    #[test]
    fn test_csv_decoder_skip_empty_rows() {
        let payload = csv_payload(
            "orders.csv",
            "reference,description,quantity,unit_price,discount\nA1,Widget,3,10.5,0\n,,,,\nB2,Bolt,1,2,0\n",
        );

        let table = CsvPayloadDecoder.decode_to_table(&payload).unwrap();

        // 应跳过空行
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_decode_invalid_base64() {
        let payload = FilePayload::new("orders.csv", "%%%not-base64%%%");
        let result = CsvPayloadDecoder.decode_to_table(&payload);
        assert!(matches!(result, Err(ImportError::DecodeError(_))));
    }

    #[test]
    fn test_decode_empty_payload() {
        let payload = FilePayload::new("orders.csv", "   ");
        let result = CsvPayloadDecoder.decode_to_table(&payload);
        assert!(matches!(result, Err(ImportError::DecodeError(_))));
    }

    #[test]
    fn test_universal_decoder_unsupported_format() {
        let payload = csv_payload("orders.pdf", "whatever");
        let result = UniversalPayloadDecoder.decode_to_table(&payload);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_universal_decoder_xlsx() {
        use rust_xlsxwriter::Workbook;

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "reference").unwrap();
        sheet.write_string(0, 1, "description").unwrap();
        sheet.write_string(0, 2, "quantity").unwrap();
        sheet.write_string(0, 3, "unit_price").unwrap();
        sheet.write_string(0, 4, "discount").unwrap();
        sheet.write_string(1, 0, "A1").unwrap();
        sheet.write_string(1, 1, "Widget").unwrap();
        sheet.write_number(1, 2, 3.0).unwrap();
        sheet.write_number(1, 3, 10.5).unwrap();
        sheet.write_string(1, 4, "").unwrap();

        let bytes = workbook.save_to_buffer().unwrap();
        let payload = FilePayload::new("orders.xlsx", STANDARD.encode(&bytes));

        let table = UniversalPayloadDecoder.decode_to_table(&payload).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0].get("reference"), Some(&"A1".to_string()));
        assert_eq!(table.rows[0].get("quantity"), Some(&"3".to_string()));
        assert_eq!(table.rows[0].get("unit_price"), Some(&"10.5".to_string()));
    }

    #[test]
    fn test_excel_decoder_garbage_bytes() {
        let payload = FilePayload::new("orders.xlsx", STANDARD.encode(b"not an excel file"));
        let result = ExcelPayloadDecoder.decode_to_table(&payload);
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }
}
