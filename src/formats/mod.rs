//! Dateiformate: Marker (CSV, `.usr`, UOAM, UltimaMapper) und Zonen (JSON).

pub mod csv;
pub mod markers;
pub mod ultima_mapper;
pub mod uoam;
pub mod zones;

pub use csv::{
    append_user_marker, format_user_line, load_user_markers, parse_csv, parse_csv_line,
    parse_user, parse_user_line, write_user_markers,
};
pub use markers::{list_marker_files, load_marker_file, load_marker_files};
pub use ultima_mapper::parse_ultima_mapper;
pub use uoam::parse_uoam;
pub use zones::{load_zone_file, load_zone_sets, parse_zones};
