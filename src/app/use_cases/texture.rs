//! Use-Cases für die Facet-Textur: Neuaufbau anfordern und Ergebnisse übernehmen.

use std::sync::Arc;

use anyhow::{Context, Result};
use uo_map_texture::{MulFacet, RadarColors, RebuildEvent};

use crate::app::WorldMapState;

use super::session;

/// Name der Farbtabelle im Client-Verzeichnis.
const RADAR_COLORS_FILE: &str = "radarcol.mul";

/// Fordert den Neuaufbau der Textur für die aktuelle Facet an.
///
/// Öffnet die MUL-Dateien synchron; das Compositing läuft im Worker.
/// Die bisherige Textur bleibt bis zum Ergebnis sichtbar.
pub fn request_rebuild(state: &mut WorldMapState) -> Result<()> {
    let facet = u8::try_from(state.world.facet)
        .with_context(|| format!("Ungültige Facet: {}", state.world.facet))?;
    state.texture.pending_facet = Some(facet);

    let Some(rebuilder) = state.texture.rebuilder.as_ref() else {
        log::warn!("Kein Rebuild-Worker, Textur für Facet {} bleibt aus", facet);
        return Ok(());
    };

    let client_dir = &state.settings.paths.client_dir;
    let source = MulFacet::open(client_dir, facet)
        .with_context(|| format!("Facet {} konnte nicht geöffnet werden", facet))?;
    let colors = RadarColors::load(&client_dir.join(RADAR_COLORS_FILE))
        .with_context(|| format!("{} konnte nicht geladen werden", RADAR_COLORS_FILE))?;

    rebuilder.request(facet, Arc::new(source), Arc::new(colors));
    Ok(())
}

/// Übernimmt fertige Texturen und stößt bei Facet-Wechsel einen Neuaufbau an.
pub fn poll(state: &mut WorldMapState) -> Result<()> {
    let event = state.texture.rebuilder.as_ref().and_then(|r| r.poll());
    match event {
        Some(RebuildEvent::Finished(texture)) => {
            log::info!(
                "Facet-Textur übernommen: Facet {} ({}x{})",
                texture.facet,
                texture.width(),
                texture.height()
            );
            state.texture.install(texture);
        }
        Some(RebuildEvent::Failed { facet, error }) => {
            log::warn!("Neuaufbau von Facet {} fehlgeschlagen: {}", facet, error);
            if state.texture.pending_facet == Some(facet) {
                state.texture.pending_facet = None;
            }
            session::notify(state, format!("Karte für Facet {} fehlt: {}", facet, error));
        }
        None => {}
    }

    let Ok(facet) = u8::try_from(state.world.facet) else {
        return Ok(());
    };
    let stale = state.texture.facet() != Some(facet);
    let requested = state.texture.pending_facet == Some(facet);
    if stale && !requested && state.texture.rebuilder.is_some() {
        log::info!("Facet {} ohne passende Textur, Neuaufbau", facet);
        request_rebuild(state)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::WorldMapSettings;
    use uo_map_texture::FacetTexture;

    #[test]
    fn install_bumps_revision_and_clears_pending() {
        let mut state = WorldMapState::new(WorldMapSettings::default());
        state.texture.pending_facet = Some(1);
        state.texture.install(FacetTexture::blank(1, 16, 16));
        assert_eq!(state.texture.revision, 1);
        assert_eq!(state.texture.facet(), Some(1));
        assert!(state.texture.pending_facet.is_none());
    }

    #[test]
    fn request_without_worker_only_marks_pending() {
        let mut state = WorldMapState::new(WorldMapSettings::default());
        request_rebuild(&mut state).unwrap();
        assert_eq!(state.texture.pending_facet, Some(0));
        poll(&mut state).unwrap();
        assert!(state.texture.current.is_none());
    }

    #[test]
    fn negative_facet_is_rejected() {
        let mut state = WorldMapState::new(WorldMapSettings::default());
        state.world.facet = -1;
        assert!(request_rebuild(&mut state).is_err());
        assert!(poll(&mut state).is_ok());
    }
}
