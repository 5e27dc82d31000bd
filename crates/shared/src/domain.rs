use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ApiException, ErrorCode};

/// One row of the circuit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitRecord {
    pub name: String,
    pub country: String,
    pub length_km: f64,
    pub laps: u32,
    pub turns: u32,
    pub lap_record: String,
    pub last_winner: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CircuitRecord {
    /// Cell value for `column`, as displayed in the table.
    pub fn cell(&self, column: Column) -> serde_json::Value {
        match column {
            Column::Name => self.name.clone().into(),
            Column::Country => self.country.clone().into(),
            Column::LengthKm => self.length_km.into(),
            Column::Laps => self.laps.into(),
            Column::Turns => self.turns.into(),
            Column::LapRecord => self.lap_record.clone().into(),
            Column::LastWinner => self.last_winner.clone().into(),
            Column::Latitude => self.latitude.into(),
            Column::Longitude => self.longitude.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Country,
    LengthKm,
    Laps,
    Turns,
    LapRecord,
    LastWinner,
    Latitude,
    Longitude,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Name,
        Column::Country,
        Column::LengthKm,
        Column::Laps,
        Column::Turns,
        Column::LapRecord,
        Column::LastWinner,
        Column::Latitude,
        Column::Longitude,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Country => "country",
            Column::LengthKm => "length_km",
            Column::Laps => "laps",
            Column::Turns => "turns",
            Column::LapRecord => "lap_record",
            Column::LastWinner => "last_winner",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::Name => "Circuit",
            Column::Country => "Country",
            Column::LengthKm => "Length (km)",
            Column::Laps => "Laps",
            Column::Turns => "Turns",
            Column::LapRecord => "Lap record",
            Column::LastWinner => "Last winner",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
        }
    }

    /// Labels used by the legacy Spanish data file.
    fn legacy_label(self) -> &'static str {
        match self {
            Column::Name => "Circuito",
            Column::Country => "Pais",
            Column::LengthKm => "Longitud",
            Column::Laps => "Vueltas",
            Column::Turns => "Curvas",
            Column::LapRecord => "Récord de vuelta",
            Column::LastWinner => "Último ganador",
            Column::Latitude => "Latitud",
            Column::Longitude => "Longitud_geo",
        }
    }

    /// Matches a file header cell against the column id, label or legacy label.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL.into_iter().find(|column| {
            [column.id(), column.label(), column.legacy_label()]
                .iter()
                .any(|candidate| header.eq_ignore_ascii_case(candidate))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Length,
    Laps,
    Turns,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Length, SortKey::Laps, SortKey::Turns];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Length => "length",
            SortKey::Laps => "laps",
            SortKey::Turns => "turns",
        }
    }

    pub fn column(self) -> Column {
        match self {
            SortKey::Length => Column::LengthKm,
            SortKey::Laps => Column::Laps,
            SortKey::Turns => Column::Turns,
        }
    }

    pub fn value(self, record: &CircuitRecord) -> f64 {
        match self {
            SortKey::Length => record.length_km,
            SortKey::Laps => f64::from(record.laps),
            SortKey::Turns => f64::from(record.turns),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ApiException;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| raw.eq_ignore_ascii_case(key.as_str()))
            .ok_or_else(|| {
                ApiException::new(
                    ErrorCode::Validation,
                    format!("unknown sort key '{raw}', expected one of: length, laps, turns"),
                )
            })
    }
}
