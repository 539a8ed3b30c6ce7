//! In-memory tables loaded from CSV daily reports.

mod normalizer;

pub use normalizer::*;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Number, Value};

use crate::error::ClientError;
use crate::schemas::DeviceRecord;

/// Columns kept verbatim so codes like `01001` keep their leading zeros.
pub const TEXT_COLUMNS: [&str; 3] = ["FIPS", "ZIP", "ZIP_CODE"];

/// Fields read as missing values.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Best-effort coercion of a single field.
    pub fn coerce(raw: &str) -> Self {
        let kind = ColumnKind::infer([raw]);
        kind.cell(raw)
    }

    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Integer(value) => Value::Number((*value).into()),
            // Infinities have no JSON form.
            CellValue::Float(value) => Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(value) => Value::String(value.clone()),
        }
    }
}

/// Type shared by every cell of a CSV column.
///
/// An integer column with missing values widens to float; any field that
/// is neither missing nor numeric makes the whole column text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn infer<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Integer;
        let mut has_missing = false;

        for raw in fields {
            if is_na(raw) {
                has_missing = true;
                continue;
            }
            match kind {
                ColumnKind::Integer if raw.parse::<i64>().is_ok() => {}
                ColumnKind::Integer | ColumnKind::Float if raw.parse::<f64>().is_ok() => {
                    kind = ColumnKind::Float
                }
                _ => return ColumnKind::Text,
            }
        }

        match kind {
            ColumnKind::Integer if has_missing => ColumnKind::Float,
            kind => kind,
        }
    }

    pub fn cell(self, raw: &str) -> CellValue {
        if is_na(raw) {
            return CellValue::Null;
        }
        let text = || CellValue::Text(raw.to_string());
        match self {
            ColumnKind::Integer => raw.parse().map(CellValue::Integer).unwrap_or_else(|_| text()),
            ColumnKind::Float => raw.parse().map(CellValue::Float).unwrap_or_else(|_| text()),
            ColumnKind::Text => text(),
        }
    }
}

/// Named columns over rows of equal width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Rows shorter than the header are padded with nulls, longer ones truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ClientError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                if idx == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();

        let records = reader
            .records()
            .collect::<Result<Vec<csv::StringRecord>, _>>()?;

        let kinds: Vec<ColumnKind> = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                if TEXT_COLUMNS.contains(&name.as_str()) {
                    ColumnKind::Text
                } else {
                    ColumnKind::infer(records.iter().map(|record| record.get(idx).unwrap_or("")))
                }
            })
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .enumerate()
                    .map(|(idx, field)| match kinds.get(idx) {
                        Some(kind) => kind.cell(field),
                        None => CellValue::coerce(field),
                    })
                    .collect()
            })
            .collect();

        Ok(Self::new(columns, rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Row `index` as a JSON object keyed by column name.
    pub fn record(&self, index: usize) -> Option<DeviceRecord> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.clone(), cell.to_json()))
                .collect(),
        )
    }

    pub(crate) fn rename_columns(&mut self, rename: impl Fn(&str) -> String) {
        for column in self.columns.iter_mut() {
            *column = rename(column);
        }
    }

    pub(crate) fn drop_column(&mut self, name: &str) {
        let keep: Vec<bool> = self.columns.iter().map(|column| column != name).collect();
        if keep.iter().all(|k| *k) {
            return;
        }

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in self.rows.iter_mut() {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }
}
