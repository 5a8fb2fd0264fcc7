use std::fs;
use std::path::PathBuf;

use uo_world_map::core::color::{BLUE, WHITE};
use uo_world_map::core::{IconRegistry, MarkerFileKind, DEFAULT_MARKER_ZOOM};
use uo_world_map::formats::{parse_csv, parse_ultima_mapper, parse_uoam, parse_user};
use uo_world_map::load_marker_files;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("uo_world_map_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Temp-Verzeichnis sollte anlegbar sein");
    dir
}

#[test]
fn test_csv_fixture_skips_broken_lines() {
    let markers = parse_csv(include_str!("fixtures/towns.csv"));
    assert_eq!(markers.len(), 3);

    let bank = &markers[0];
    assert_eq!(bank.name, "Britain Bank");
    assert_eq!((bank.x, bank.y, bank.facet), (1434, 1699, 0));
    assert_eq!(bank.color, BLUE);
    assert_eq!(bank.zoom_index, 3);

    assert_eq!(markers[1].zoom_index, DEFAULT_MARKER_ZOOM);
    assert_eq!(markers[2].facet, 1);
    assert_eq!(markers[2].zoom_index, 5);
}

#[test]
fn test_uoam_fixture_reads_both_prefixes() {
    let markers = parse_uoam(include_str!("fixtures/dungeons.map"));
    let names: Vec<&str> = markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Covetous Dungeon", "Deceit", "Shrine of Compassion"]
    );
    assert_eq!(markers[1].facet, 1);
    assert_eq!(markers[1].icon_name, "dungeon");
    assert!(markers.iter().all(|m| m.color == WHITE));
}

#[test]
fn test_ultima_mapper_fixture_unescapes_names() {
    let markers = parse_ultima_mapper(include_str!("fixtures/mapper.xml"))
        .expect("Fixture sollte gültiges XML sein");
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].name, "West & Bank");
    assert_eq!(markers[1].name, "Vesper");
    assert_eq!((markers[1].x, markers[1].y), (2895, 676));
}

#[test]
fn test_user_file_truncates_name_and_color() {
    let markers = parse_user(include_str!("fixtures/userMarkers.usr"));
    assert_eq!(markers.len(), 2);

    assert_eq!(markers[0].name, "Meine Bank mit sehr lange");
    assert_eq!(markers[0].color_name, "purpleish-");
    assert_eq!(markers[0].color, WHITE);
    assert_eq!(markers[0].zoom_index, 4);

    assert_eq!(markers[1].icon_name, "");
    assert_eq!(markers[1].zoom_index, DEFAULT_MARKER_ZOOM);
}

#[test]
fn test_load_marker_files_orders_user_file_first() {
    let dir = temp_dir("marker_order");
    for name in ["towns.csv", "dungeons.map", "mapper.xml"] {
        let src = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name);
        fs::copy(&src, dir.join(name)).expect("Fixture sollte kopierbar sein");
    }
    fs::write(dir.join("notes.txt"), "kein Marker").expect("Datei sollte schreibbar sein");

    let user_file = dir.join("userMarkers.usr");
    let files = load_marker_files(
        &user_file,
        &dir,
        &["towns.csv".to_string()],
        &IconRegistry::new(),
    );

    let kinds: Vec<MarkerFileKind> = files.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MarkerFileKind::User,
            MarkerFileKind::Uoam,
            MarkerFileKind::Csv,
            MarkerFileKind::UltimaMapper,
        ]
    );
    assert!(user_file.exists(), "Benutzerdatei sollte angelegt werden");
    assert!(files[0].editable);
    assert!(files[0].markers.is_empty());
    assert!(files[2].hidden);
    assert!(!files[1].hidden);

    let _ = fs::remove_dir_all(&dir);
}
