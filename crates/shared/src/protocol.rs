use serde::{Deserialize, Serialize};

use crate::domain::{CircuitRecord, Column, SortKey};

pub const NOT_FOUND_MESSAGE: &str = "Circuit not found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSummary {
    pub heading: String,
    pub name: String,
    pub country: String,
    pub length_km: f64,
    pub laps: u32,
    pub turns: u32,
    pub lap_record: String,
    pub last_winner: String,
}

impl From<&CircuitRecord> for CircuitSummary {
    fn from(record: &CircuitRecord) -> Self {
        Self {
            heading: format!("{} - {}", record.name, record.country),
            name: record.name.clone(),
            country: record.country.clone(),
            length_km: record.length_km,
            laps: record.laps,
            turns: record.turns,
            lap_record: record.lap_record.clone(),
            last_winner: record.last_winner.clone(),
        }
    }
}

/// Content of the info panel below the circuit dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InfoPanel {
    Found(CircuitSummary),
    NotFound { message: String },
}

impl InfoPanel {
    pub fn not_found() -> Self {
        Self::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn summary(&self) -> Option<&CircuitSummary> {
        match self {
            Self::Found(summary) => Some(summary),
            Self::NotFound { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSelection {
    pub info: InfoPanel,
    pub figure: Figure,
}

/// Plotly-compatible figure. The empty figure serialises as `{}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<ScatterGeoTrace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<FigureLayout>,
}

impl Figure {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.layout.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterGeoTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub text: Vec<String>,
    pub hovertext: Vec<String>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: Vec<f64>,
    pub colorscale: String,
    pub showscale: bool,
    pub colorbar: ColorBar,
    pub size: f64,
    pub sizemode: String,
    pub opacity: f64,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    pub title: Title,
    pub geo: GeoLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLayout {
    pub visible: bool,
    pub projection: Projection,
    pub showcoastlines: bool,
    pub coastlinecolor: String,
    pub showland: bool,
    pub landcolor: String,
    pub showocean: bool,
    pub oceancolor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: String,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: Column,
    pub name: String,
}

/// Table content returned by the sort handler endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedTable {
    pub sort: SortKey,
    pub page_size: usize,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<CircuitRecord>,
}
