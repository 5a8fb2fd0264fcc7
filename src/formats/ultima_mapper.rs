//! UltimaMapper-Markerdateien (`.xml`).
//!
//! Jedes `<Marker X=".." Y=".." Name=".." Facet=".." Icon=".."/>` wird ein Marker.

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

use crate::core::Marker;

fn read_attributes(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn marker_from_attributes(attrs: &HashMap<String, String>) -> Result<Marker> {
    let number = |key: &str| -> Result<i32> {
        let raw = attrs
            .get(key)
            .with_context(|| format!("Attribut '{key}' fehlt"))?;
        raw.trim()
            .parse::<i32>()
            .with_context(|| format!("Attribut '{key}' ungültig: '{raw}'"))
    };

    let name = attrs.get("Name").cloned().unwrap_or_default();
    let icon = attrs.get("Icon").map(String::as_str).unwrap_or_default();
    Ok(Marker::new(name, number("X")?, number("Y")?, number("Facet")?).with_icon(icon))
}

/// Parst eine UltimaMapper-Datei. Fehlerhafte Marker werden übersprungen,
/// kaputtes XML bricht mit Fehler ab.
pub fn parse_ultima_mapper(xml_content: &str) -> Result<Vec<Marker>> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut markers = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"Marker" {
                    let attrs = read_attributes(&reader, e)?;
                    match marker_from_attributes(&attrs) {
                        Ok(marker) => markers.push(marker),
                        Err(e) => log::debug!("UltimaMapper-Marker übersprungen: {:#}", e),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("XML-Fehler an Position {}", reader.buffer_position())
                })
            }
            _ => {}
        }
        buffer.clear();
    }

    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::WHITE;

    #[test]
    fn test_parse_markers_empty_and_start_tags() {
        let xml = r#"<?xml version="1.0"?>
<Markers>
  <Marker X="1434" Y="1699" Name="West &amp; Bank" Facet="0" Icon="Bank" />
  <Marker X="10" Y="20" Name="Shrine" Facet="1" Icon="shrine"></Marker>
  <Marker X="oops" Y="20" Name="Bad" Facet="1" Icon="x" />
</Markers>"#;
        let markers = parse_ultima_mapper(xml).unwrap();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name, "West & Bank");
        assert_eq!(markers[0].icon_name, "bank");
        assert_eq!(markers[0].color, WHITE);
        assert_eq!((markers[1].x, markers[1].y, markers[1].facet), (10, 20, 1));
    }

    #[test]
    fn test_broken_xml_fails() {
        assert!(parse_ultima_mapper(r#"<Markers><Marker X="1" Y="2" Facet="0"></Wrong></Markers>"#).is_err());
    }
}
