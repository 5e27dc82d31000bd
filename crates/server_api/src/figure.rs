use shared::{
    domain::CircuitRecord,
    protocol::{
        ColorBar, Figure, FigureLayout, GeoLayout, Marker, MarkerLine, Projection,
        ScatterGeoTrace, Title,
    },
};

const MAP_TITLE: &str = "F1 circuit locations";
const MARKER_SIZE: f64 = 15.0;
const PROJECTION_SCALE: f64 = 5.0;

/// Geographic scatter of every circuit, coloured by track length.
pub fn circuit_map(records: &[CircuitRecord]) -> Figure {
    let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();

    let trace = ScatterGeoTrace {
        kind: "scattergeo".into(),
        mode: "markers+text".into(),
        lat: records.iter().map(|r| r.latitude).collect(),
        lon: records.iter().map(|r| r.longitude).collect(),
        text: names.clone(),
        hovertext: names,
        marker: Marker {
            color: records.iter().map(|r| r.length_km).collect(),
            colorscale: "Viridis".into(),
            showscale: true,
            colorbar: ColorBar {
                title: Title {
                    text: "Length (km)".into(),
                },
            },
            size: MARKER_SIZE,
            sizemode: "diameter".into(),
            opacity: 0.7,
            line: MarkerLine {
                width: 1.0,
                color: "DarkSlateGrey".into(),
            },
        },
    };

    Figure {
        data: vec![trace],
        layout: Some(FigureLayout {
            title: Title {
                text: MAP_TITLE.into(),
            },
            geo: GeoLayout {
                visible: true,
                projection: Projection {
                    kind: "natural earth".into(),
                    scale: PROJECTION_SCALE,
                },
                showcoastlines: true,
                coastlinecolor: "Black".into(),
                showland: true,
                landcolor: "whitesmoke".into(),
                showocean: true,
                oceancolor: "lightblue".into(),
            },
        }),
    }
}
