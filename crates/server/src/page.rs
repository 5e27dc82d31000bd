//! Static dashboard page.
//!
//! The markup is composed once at startup from the record set, with the
//! initial table rows already in the default sort order. Dynamic regions
//! (info panel, map, sorted table) are filled in by the embedded script,
//! which calls the handler endpoints whenever a dropdown changes.

use server_api::{escape_html, sort_circuits, ApiContext};
use shared::domain::SortKey;
use storage::CircuitStore;

use crate::config::Layout;

pub const PAGE_TITLE: &str = "Formula 1 Circuits";
const TABLE_HEADING: &str = "Circuit table";
const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1400px; }
h1, h2 { text-align: center; }
.selector { display: block; width: 50%; margin: auto; }
#circuit-info { text-align: center; }
#circuit-map { height: 520px; }
.columns { display: flex; gap: 2rem; }
.columns > section { flex: 1; min-width: 0; }
.table-wrap { overflow-x: auto; margin: auto; width: 90%; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: center; border: 1px solid #ddd; padding: 4px 8px; }
.pager { text-align: center; margin: 8px; }
"#;

const SCRIPT: &str = r#"
(function () {
  const state = { rows: [], columns: [], pageSize: 10, page: 0 };
  const circuit = document.getElementById('circuit-dropdown');
  const sort = document.getElementById('sort-dropdown');
  const info = document.getElementById('circuit-info');
  const body = document.querySelector('#circuit-table tbody');
  const pageLabel = document.getElementById('page-label');

  function para(text) {
    const p = document.createElement('p');
    p.textContent = text;
    return p;
  }

  function renderInfo(panel) {
    info.replaceChildren();
    if (panel.status !== 'found') {
      info.appendChild(para(panel.message));
      return;
    }
    const heading = document.createElement('h3');
    heading.textContent = panel.heading;
    info.append(
      heading,
      para('Length: ' + panel.length_km + ' km'),
      para('Laps: ' + panel.laps),
      para('Turns: ' + panel.turns),
      para('Lap record: ' + panel.lap_record),
      para('Last winner: ' + panel.last_winner)
    );
  }

  function renderMap(figure) {
    if (window.Plotly) {
      Plotly.react('circuit-map', figure.data || [], figure.layout || {});
    }
  }

  function renderTable() {
    const pages = Math.max(1, Math.ceil(state.rows.length / state.pageSize));
    state.page = Math.min(state.page, pages - 1);
    const start = state.page * state.pageSize;
    body.replaceChildren();
    for (const row of state.rows.slice(start, start + state.pageSize)) {
      const tr = document.createElement('tr');
      for (const column of state.columns) {
        const td = document.createElement('td');
        td.textContent = row[column.id];
        tr.appendChild(td);
      }
      body.appendChild(tr);
    }
    pageLabel.textContent = (state.page + 1) + ' / ' + pages;
  }

  async function onCircuit() {
    const res = await fetch('/api/circuits/select?name=' + encodeURIComponent(circuit.value));
    const selection = await res.json();
    renderInfo(selection.info);
    renderMap(selection.figure);
  }

  async function onSort() {
    const res = await fetch('/api/circuits/table?sort=' + encodeURIComponent(sort.value));
    if (!res.ok) return;
    const table = await res.json();
    state.rows = table.rows;
    state.columns = table.columns;
    state.pageSize = table.page_size;
    state.page = 0;
    renderTable();
  }

  document.getElementById('page-prev').addEventListener('click', function () {
    if (state.page > 0) { state.page -= 1; renderTable(); }
  });
  document.getElementById('page-next').addEventListener('click', function () {
    if ((state.page + 1) * state.pageSize < state.rows.length) { state.page += 1; renderTable(); }
  });
  circuit.addEventListener('change', onCircuit);
  sort.addEventListener('change', onSort);
  onCircuit();
  onSort();
})();
"#;

pub fn render_page(api: &ApiContext, layout: Layout) -> String {
    let selector = circuit_dropdown(&api.store);
    let info = r#"<div id="circuit-info"></div>"#;
    let map = r#"<div id="circuit-map"></div>"#;
    let table = table_section(api);

    let body = match layout {
        Layout::SingleColumn => format!("{selector}\n{info}\n{map}\n{table}"),
        Layout::TwoColumn => format!(
            "<div class=\"columns\">\n<section>\n{selector}\n{info}\n{map}\n</section>\n\
             <section>\n{table}\n</section>\n</div>"
        ),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n\
         <script src=\"{PLOTLY_SRC}\"></script>\n</head>\n<body class=\"{layout}\">\n\
         <h1>{title}</h1>\n{body}\n<script>{SCRIPT}</script>\n</body>\n</html>\n",
        title = escape_html(PAGE_TITLE),
    )
}

fn circuit_dropdown(store: &CircuitStore) -> String {
    let mut html = String::from(r#"<select id="circuit-dropdown" class="selector">"#);
    for (index, name) in store.names().enumerate() {
        let name = escape_html(name);
        let selected = if index == 0 { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{name}\"{selected}>{name}</option>"));
    }
    html.push_str("</select>");
    html
}

fn sort_dropdown() -> String {
    let mut html = String::from(r#"<select id="sort-dropdown" class="selector">"#);
    for key in SortKey::ALL {
        let selected = if key == SortKey::default() {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{key}\"{selected}>Sort by {key} (descending)</option>"
        ));
    }
    html.push_str("</select>");
    html
}

fn table_section(api: &ApiContext) -> String {
    let store = &api.store;
    let mut html = format!("<h2>{}</h2>\n{}\n", escape_html(TABLE_HEADING), sort_dropdown());
    html.push_str("<div class=\"table-wrap\">\n<table id=\"circuit-table\">\n<thead><tr>");
    for column in store.columns() {
        html.push_str(&format!(
            "<th data-column=\"{}\">{}</th>",
            column.id.id(),
            escape_html(&column.name)
        ));
    }
    html.push_str("</tr></thead>\n<tbody>");
    let rows = sort_circuits(api, SortKey::default());
    for record in rows.iter().take(api.page_size) {
        html.push_str("<tr>");
        for column in store.columns() {
            let cell = match record.cell(column.id) {
                serde_json::Value::String(text) => escape_html(&text),
                other => other.to_string(),
            };
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
    html.push_str(
        "<div class=\"pager\"><button id=\"page-prev\" type=\"button\">&lt;</button> \
         <span id=\"page-label\"></span> \
         <button id=\"page-next\" type=\"button\">&gt;</button></div>",
    );
    html
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
