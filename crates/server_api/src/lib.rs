use shared::{
    domain::{CircuitRecord, SortKey},
    error::ApiError,
    protocol::{CircuitSelection, CircuitSummary, Figure, InfoPanel, SortedTable},
};
use storage::CircuitStore;
use tracing::debug;

mod figure;

pub use figure::circuit_map;

#[derive(Clone)]
pub struct ApiContext {
    pub store: CircuitStore,
    pub page_size: usize,
}

/// Summary and map for the circuit picked in the dropdown.
///
/// The map always plots every circuit; an unknown or missing name yields the
/// not-found panel and an empty figure.
pub fn select_circuit(ctx: &ApiContext, name: Option<&str>) -> CircuitSelection {
    let Some(record) = name.and_then(|name| ctx.store.find(name)) else {
        debug!(name = ?name, "circuit not found");
        return CircuitSelection {
            info: InfoPanel::not_found(),
            figure: Figure::default(),
        };
    };

    CircuitSelection {
        info: InfoPanel::Found(CircuitSummary::from(record)),
        figure: circuit_map(ctx.store.records()),
    }
}

/// All circuits, descending by `key`. Ties keep load order.
pub fn sort_circuits(ctx: &ApiContext, key: SortKey) -> Vec<CircuitRecord> {
    let mut records = ctx.store.records().to_vec();
    records.sort_by(|a, b| key.value(b).total_cmp(&key.value(a)));
    records
}

pub fn sorted_table(ctx: &ApiContext, sort: Option<&str>) -> Result<SortedTable, ApiError> {
    let key = match sort.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse::<SortKey>()?,
        None => SortKey::default(),
    };

    Ok(SortedTable {
        sort: key,
        page_size: ctx.page_size,
        columns: ctx.store.columns().to_vec(),
        rows: sort_circuits(ctx, key),
    })
}

/// Info panel as an HTML fragment.
pub fn render_info_html(info: &InfoPanel) -> String {
    match info {
        InfoPanel::Found(summary) => [
            format!("<h3>{}</h3>", escape_html(&summary.heading)),
            format!("<p>Length: {} km</p>", summary.length_km),
            format!("<p>Laps: {}</p>", summary.laps),
            format!("<p>Turns: {}</p>", summary.turns),
            format!("<p>Lap record: {}</p>", escape_html(&summary.lap_record)),
            format!("<p>Last winner: {}</p>", escape_html(&summary.last_winner)),
        ]
        .concat(),
        InfoPanel::NotFound { message } => format!("<p>{}</p>", escape_html(message)),
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
