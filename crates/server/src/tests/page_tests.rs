use super::*;
use shared::domain::CircuitRecord;

fn store() -> CircuitStore {
    let data = "\
Circuit,Country,Length (km),Laps,Turns,Lap record,Last winner,Latitude,Longitude
Autodromo Nazionale Monza,Italy,5.793,53,11,\"1:21.046 (Rubens Barrichello, 2004)\",Charles Leclerc,45.6156,9.2811
Circuit de Spa-Francorchamps,Belgium,7.004,44,19,\"1:46.286 (Valtteri Bottas, 2018)\",Lewis Hamilton,50.4372,5.9714
";
    CircuitStore::from_reader(data.as_bytes()).expect("store")
}

fn api(store: CircuitStore, page_size: usize) -> ApiContext {
    ApiContext { store, page_size }
}

#[test]
fn page_lists_every_circuit_and_column_label() {
    let store = store();
    let html = render_page(&api(store.clone(), 10), Layout::SingleColumn);

    assert!(html.contains("<h1>Formula 1 Circuits</h1>"));
    for name in store.names() {
        assert!(html.contains(&format!("<option value=\"{name}\"")));
    }
    for column in store.columns() {
        assert!(html.contains(&format!(">{}</th>", escape_html(&column.name))));
    }
    assert!(html.contains("<td>53</td>"));
}

#[test]
fn first_circuit_is_selected_by_default() {
    let html = render_page(&api(store(), 10), Layout::SingleColumn);
    assert!(html.contains(
        "<option value=\"Autodromo Nazionale Monza\" selected>Autodromo Nazionale Monza</option>"
    ));
    assert!(html.contains("<option value=\"length\" selected>"));
    assert!(html.contains("<option value=\"laps\">"));
    assert!(html.contains("<option value=\"turns\">"));
}

#[test]
fn layouts_differ_only_in_arrangement() {
    let single = render_page(&api(store(), 10), Layout::SingleColumn);
    let two = render_page(&api(store(), 10), Layout::TwoColumn);

    assert!(!single.contains("class=\"columns\""));
    assert!(two.contains("class=\"columns\""));
    for id in [
        "circuit-dropdown",
        "circuit-info",
        "circuit-map",
        "sort-dropdown",
        "circuit-table",
    ] {
        assert!(single.contains(&format!("id=\"{id}\"")));
        assert!(two.contains(&format!("id=\"{id}\"")));
    }
}

#[test]
fn initial_table_respects_page_size() {
    let html = render_page(&api(store(), 1), Layout::SingleColumn);
    assert!(html.contains("<td>Circuit de Spa-Francorchamps</td>"));
    assert!(!html.contains("<td>Autodromo Nazionale Monza</td>"));
}

#[test]
fn initial_table_follows_selected_sort_key() {
    let html = render_page(&api(store(), 10), Layout::SingleColumn);
    assert!(html.contains("<option value=\"length\" selected>"));

    let spa = html
        .find("<td>Circuit de Spa-Francorchamps</td>")
        .expect("spa row");
    let monza = html
        .find("<td>Autodromo Nazionale Monza</td>")
        .expect("monza row");
    assert!(spa < monza, "longer circuit should be rendered first");
}

#[test]
fn circuit_text_is_escaped() {
    let store = CircuitStore::from_records(vec![CircuitRecord {
        name: "<b>Bold</b> & Co".into(),
        country: "X".into(),
        length_km: 1.0,
        laps: 1,
        turns: 1,
        lap_record: "r".into(),
        last_winner: "w".into(),
        latitude: 0.0,
        longitude: 0.0,
    }]);
    let html = render_page(&api(store, 10), Layout::SingleColumn);
    assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; Co"));
    assert!(!html.contains("<b>Bold</b>"));
}

#[test]
fn empty_store_renders_empty_controls() {
    let html = render_page(
        &api(CircuitStore::from_records(Vec::new()), 10),
        Layout::TwoColumn,
    );
    assert!(html.contains("<select id=\"circuit-dropdown\" class=\"selector\"></select>"));
    assert!(html.contains("<tbody></tbody>"));
}
