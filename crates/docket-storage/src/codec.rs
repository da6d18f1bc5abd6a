//! Fixed row codec for dataset files.
//!
//! A dataset file is comma separated text: one header row naming [`SCHEMA`]
//! followed by one row per record in the same column order. Titles carrying
//! the delimiter are rejected before they reach the codec.

use docket_core::{DecodeError, Record, RecordId};

pub const SCHEMA: [&str; 4] = ["ID", "Title", "Size", "Priority"];
pub const DELIMITER: char = ',';

pub fn header() -> String {
    SCHEMA.join(",")
}

pub fn is_header(line: &str) -> bool {
    line.trim_end() == header()
}

pub fn encode_row(record: &Record) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}",
        record.id,
        record.title,
        record.size,
        record.priority,
        d = DELIMITER
    )
}

pub fn decode_row(line: &str) -> Result<Record, DecodeError> {
    let cols: Vec<&str> = line.split(DELIMITER).collect();
    if cols.len() != SCHEMA.len() {
        return Err(DecodeError::ColumnCount { expected: SCHEMA.len(), found: cols.len() });
    }
    let id = cols[0].trim();
    if id.is_empty() {
        return Err(DecodeError::Empty { column: SCHEMA[0] });
    }
    if cols[1].is_empty() {
        return Err(DecodeError::Empty { column: SCHEMA[1] });
    }
    let size = cols[2]
        .trim()
        .parse::<u64>()
        .map_err(|_| DecodeError::Integer { column: SCHEMA[2], value: cols[2].to_string() })?;
    let priority = cols[3]
        .trim()
        .parse::<i64>()
        .map_err(|_| DecodeError::Integer { column: SCHEMA[3], value: cols[3].to_string() })?;
    Ok(Record { id: RecordId::from_str(id), title: cols[1].to_string(), size, priority })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_schema_order() {
        assert_eq!(header(), "ID,Title,Size,Priority");
        assert!(is_header("ID,Title,Size,Priority\r"));
    }

    #[test]
    fn encodes_columns_in_schema_order() {
        let r = Record { id: RecordId::from_str("1a2b3c4d"), title: "report".into(), size: 12, priority: 3 };
        assert_eq!(encode_row(&r), "1a2b3c4d,report,12,3");
        assert_eq!(decode_row(&encode_row(&r)).unwrap(), r);
    }

    #[test]
    fn wrong_column_count_is_malformed() {
        assert_eq!(
            decode_row("abc,title,1"),
            Err(DecodeError::ColumnCount { expected: 4, found: 3 })
        );
        assert!(matches!(decode_row("abc,a,b,1,2"), Err(DecodeError::ColumnCount { found: 5, .. })));
    }

    #[test]
    fn negative_size_is_malformed() {
        assert!(matches!(decode_row("abc,t,-1,2"), Err(DecodeError::Integer { column: "Size", .. })));
    }

    #[test]
    fn missing_id_is_malformed() {
        assert_eq!(decode_row(",t,1,2"), Err(DecodeError::Empty { column: "ID" }));
    }
}
