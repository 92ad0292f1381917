//! CSV export of a submission list.

use crate::record::Record;

const ROW_SEPARATOR: &str = "\r\n";

/// Header row, then one row per record with every field quoted.
pub fn to_csv<R: Record>(records: &[R]) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(R::CSV_HEADER.join(","));

    for record in records {
        let fields: Vec<String> = record.csv_fields().iter().map(|f| quote(f)).collect();
        rows.push(fields.join(","));
    }

    rows.join(ROW_SEPARATOR)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
