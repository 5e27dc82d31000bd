use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};

use csv::{ReaderBuilder, StringRecord, Trim};
use shared::{
    domain::{CircuitRecord, Column},
    protocol::TableColumn,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open circuit data '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown column '{0}' in header")]
    UnknownColumn(String),
    #[error("column '{0}' appears more than once in header")]
    DuplicateColumn(String),
    #[error("header is missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read-only circuit record set, loaded once at startup.
#[derive(Debug, Clone)]
pub struct CircuitStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    columns: Vec<TableColumn>,
    records: Vec<CircuitRecord>,
}

impl CircuitStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_delimiter(path, b',')
    }

    pub fn open_with_delimiter(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader_with_delimiter(file, delimiter)?;
        debug!(path = %path.display(), circuits = store.len(), "circuit data loaded");
        Ok(store)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::from_reader_with_delimiter(reader, b',')
    }

    pub fn from_reader_with_delimiter(reader: impl Read, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = parse_header(reader.headers()?)?;
        let positions: HashMap<Column, usize> = columns
            .iter()
            .enumerate()
            .map(|(index, column)| (column.id, index))
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(parse_row(&row, &positions)?);
        }

        Ok(Self {
            inner: Arc::new(Inner { columns, records }),
        })
    }

    pub fn from_records(records: Vec<CircuitRecord>) -> Self {
        let columns = Column::ALL
            .into_iter()
            .map(|id| TableColumn {
                id,
                name: id.id().to_string(),
            })
            .collect();
        Self {
            inner: Arc::new(Inner { columns, records }),
        }
    }

    pub fn records(&self) -> &[CircuitRecord] {
        &self.inner.records
    }

    /// Table columns in file order, labelled as written in the header.
    pub fn columns(&self) -> &[TableColumn] {
        &self.inner.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.records.iter().map(|record| record.name.as_str())
    }

    /// First record with this exact name, in load order.
    pub fn find(&self, name: &str) -> Option<&CircuitRecord> {
        self.inner.records.iter().find(|record| record.name == name)
    }

    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }
}

/// Delimiter from a setting or flag: one ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(raw: &str) -> Option<u8> {
    match raw {
        "\\t" | "tab" => Some(b'\t'),
        _ => {
            let mut bytes = raw.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(byte), None) if byte.is_ascii() => Some(byte),
                _ => None,
            }
        }
    }
}

fn parse_header(headers: &StringRecord) -> Result<Vec<TableColumn>> {
    let mut columns: Vec<TableColumn> = Vec::with_capacity(headers.len());
    for label in headers {
        let id = Column::from_header(label)
            .ok_or_else(|| StoreError::UnknownColumn(label.to_string()))?;
        if columns.iter().any(|column| column.id == id) {
            return Err(StoreError::DuplicateColumn(label.to_string()));
        }
        columns.push(TableColumn {
            id,
            name: label.to_string(),
        });
    }

    if let Some(missing) = Column::ALL
        .into_iter()
        .find(|id| columns.iter().all(|column| column.id != *id))
    {
        return Err(StoreError::MissingColumn(missing.id()));
    }

    Ok(columns)
}

fn parse_row(row: &StringRecord, positions: &HashMap<Column, usize>) -> Result<CircuitRecord> {
    let line = row
        .position()
        .map(|position| position.line())
        .unwrap_or_default();
    let field = |column: Column| {
        positions
            .get(&column)
            .and_then(|index| row.get(*index))
            .unwrap_or_default()
    };

    Ok(CircuitRecord {
        name: field(Column::Name).to_string(),
        country: field(Column::Country).to_string(),
        length_km: parse_float(line, Column::LengthKm, field(Column::LengthKm))?,
        laps: parse_count(line, Column::Laps, field(Column::Laps))?,
        turns: parse_count(line, Column::Turns, field(Column::Turns))?,
        lap_record: field(Column::LapRecord).to_string(),
        last_winner: field(Column::LastWinner).to_string(),
        latitude: parse_float(line, Column::Latitude, field(Column::Latitude))?,
        longitude: parse_float(line, Column::Longitude, field(Column::Longitude))?,
    })
}

fn parse_float(line: u64, column: Column, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid(line, column, raw))
}

fn parse_count(line: u64, column: Column, raw: &str) -> Result<u32> {
    raw.parse::<u32>().map_err(|_| invalid(line, column, raw))
}

fn invalid(line: u64, column: Column, raw: &str) -> StoreError {
    StoreError::InvalidValue {
        line,
        column: column.id(),
        value: raw.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
