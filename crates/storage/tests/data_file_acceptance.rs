use std::io::Write;

use storage::{CircuitStore, StoreError};

#[test]
fn bundled_circuit_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/circuits.csv");
    let store = CircuitStore::open(path).expect("bundled data");
    assert!(store.len() >= 20);

    let monza = store.find("Autodromo Nazionale Monza").expect("monza");
    assert_eq!(monza.laps, 53);
    assert_eq!(store.columns()[2].name, "Length (km)");
}

#[test]
fn opens_data_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "name,country,length_km,laps,turns,lap_record,last_winner,latitude,longitude"
    )
    .expect("write header");
    writeln!(file, "Spa,Belgium,7.004,44,19,1:46.286,Hamilton,50.4372,5.9714").expect("write row");
    file.flush().expect("flush");

    let store = CircuitStore::open(file.path()).expect("store");
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name, "Spa");
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let err = CircuitStore::open(&path).expect_err("should fail");
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
