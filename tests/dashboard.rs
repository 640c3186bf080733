// End-to-end: dataset and background on disk, through the dashboard, to figure and SVG.

use std::{fs, path::Path};

use energymap::{
    BackgroundImage, CoordinateTable, Dashboard, DashboardConfig, DataError, DataStore, MetricSelector, Selection,
};

const DATASET: &str = "\
RegioS,Perioden,ID_x,BevolkingAanHetEindeVanDePeriode_15,BevolkingAanHetBeginVanDePeriode_1,norm_prod_solar_allpower,norm_prod_wind,FractionSolar,FractionWind,FractionTotal
ET0101,2017JJ00,Groningen,\"95,0\",90,4.0,20.0,0.9,3.0,3.9
ET0101,2018JJ00,Groningen,100,90,5.0,25.0,1.5,3.5,5.0
ET0201,2018JJ00,Friesland,50,40,2.5,0.0,0.5,0.8,1.3
ET3002,2018JJ00,Zuid-Limburg,\"1.234,5\",1200,,n/a,0.1,0.0,0.1
";

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

fn dashboard(dir: &Path) -> Dashboard {
    let data = dir.join("sustainable_energy_nl.csv");
    let image = dir.join("map.png");
    fs::write(&data, DATASET).unwrap();
    fs::write(&image, png(898, 1032)).unwrap();

    let table = CoordinateTable::default();
    let store = DataStore::read_csv(&data, &table).unwrap();
    let background = BackgroundImage::read(&image).unwrap();
    Dashboard::new(store, table, Some(background), DashboardConfig::default())
}

#[test]
fn load_normalizes_population() {
    let dir = tempfile::tempdir().unwrap();
    let dash = dashboard(dir.path());

    let pop: Vec<f64> = dash.store().observations().iter().map(|o| o.pop_end).collect();
    assert_eq!(pop, vec![95.0, 100.0, 50.0, 1234.5]);

    let limburg = &dash.store().observations()[3];
    assert_eq!(limburg.solar, 0.0);
    assert_eq!(limburg.wind, 0.0);
}

#[test]
fn default_selection_renders_every_2018_region() {
    let dir = tempfile::tempdir().unwrap();
    let dash = dashboard(dir.path());

    let figure = dash.update_figure(&dash.default_selection()).unwrap();
    let trace = &figure.data[0];
    assert_eq!(trace.text, vec!["ET0101", "ET0201", "ET3002"]);
    assert_eq!(trace.marker.size, vec![100.0, 50.0, 1234.5]);
    assert_eq!(trace.customdata[2], ("Zuid-Limburg".to_string(), 1200.0));
    assert_eq!(trace.marker.sizeref, Some(1234.5 / 900.0));
    assert_eq!(figure.layout.images.len(), 1);
}

#[test]
fn self_sufficient_solar_keeps_only_groningen() {
    let dir = tempfile::tempdir().unwrap();
    let dash = dashboard(dir.path());

    let selection = Selection {
        period: Some("2018JJ00".into()),
        metric: MetricSelector::FractionSolar,
        self_sufficient_only: true,
    };
    let layout = dash.layout(&selection).unwrap();
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.markers()[0].region.as_str(), "ET0101");
    assert_eq!(layout.markers()[0].hover_value, 1.5);

    let svg_path = dir.path().join("out/map.svg");
    layout.to_svg(&svg_path, dash.background(), dash.config()).unwrap();
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert_eq!(svg.matches("<circle").count(), 1);
    assert!(svg.contains(r#"fill="coral""#));
}

#[test]
fn changing_metric_never_moves_markers() {
    let dir = tempfile::tempdir().unwrap();
    let dash = dashboard(dir.path());

    let positions = |metric| {
        let selection = Selection { period: None, metric, self_sufficient_only: false };
        dash.layout(&selection).unwrap().markers().iter().map(|m| m.position).collect::<Vec<_>>()
    };
    let reference = positions(MetricSelector::Population);
    assert_eq!(reference.len(), 4);
    for metric in MetricSelector::ALL {
        assert_eq!(positions(metric), reference, "{metric}");
    }
}

#[test]
fn unknown_region_fails_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("bad.csv");
    fs::write(&data, DATASET.replace("ET0201", "ET9901")).unwrap();

    let err = DataStore::read_csv(&data, &CoordinateTable::default()).unwrap_err();
    assert!(matches!(err.downcast_ref::<DataError>(), Some(DataError::UnknownRegion { row: 2, .. })));
}
