//! Use-Cases für Marker: Laden, Ein-/Ausblenden und die Benutzerdatei.

use anyhow::{ensure, Context, Result};

use crate::app::events::{DialogKind, UserMarkerDraft};
use crate::app::WorldMapState;
use crate::core::marker::DEFAULT_USER_MARKER_COLOR;
use crate::core::{IconRegistry, Marker, DEFAULT_MARKER_ZOOM, USER_MARKER_ZOOM};
use crate::formats::csv::{sanitize_field, USER_COLOR_MAX_LEN, USER_NAME_MAX_LEN};
use crate::formats::{append_user_marker, load_marker_files, write_user_markers};

use super::session;

/// Lädt Icons und alle Marker-Dateien neu.
pub fn reload(state: &mut WorldMapState) {
    let paths = &state.settings.paths;
    state.icons = IconRegistry::load_dir(&paths.icons_dir);
    state.marker_files = load_marker_files(
        &paths.user_markers_file,
        &paths.markers_dir,
        &state.settings.hidden_marker_files,
        &state.icons,
    );
    log::info!(
        "Marker neu geladen: {} Dateien, {} Icons",
        state.marker_files.len(),
        state.icons.len()
    );
}

/// Blendet eine Marker-Datei ein oder aus.
pub fn toggle_file(state: &mut WorldMapState, name: &str) {
    let Some(file) = state.marker_files.iter_mut().find(|f| f.name == name) else {
        log::warn!("Marker-Datei nicht geladen: {}", name);
        return;
    };
    file.hidden = !file.hidden;
    let hidden = file.hidden;
    state.settings.set_marker_file_hidden(name, hidden);
}

/// Blendet alle geladenen Marker-Dateien ein oder aus.
pub fn set_all_hidden(state: &mut WorldMapState, hidden: bool) {
    for file in &mut state.marker_files {
        file.hidden = hidden;
        state.settings.set_marker_file_hidden(&file.name, hidden);
    }
}

/// Prüft eine Dialog-Eingabe und baut daraus einen Benutzer-Marker.
///
/// Koordinaten müssen innerhalb der Facet liegen, der Name darf nicht leer
/// sein. Kommas werden entfernt, damit die Zeile einlesbar bleibt.
pub fn marker_from_draft(draft: &UserMarkerDraft) -> Result<Marker> {
    let name = sanitize_field(&draft.name);
    ensure!(!name.is_empty(), "Markername darf nicht leer sein");
    ensure!(
        name.chars().count() <= USER_NAME_MAX_LEN,
        "Markername ist länger als {} Zeichen",
        USER_NAME_MAX_LEN
    );

    let (width, height) = u8::try_from(draft.facet)
        .ok()
        .and_then(|f| uo_map_texture::facet_size(f).ok())
        .with_context(|| format!("Unbekannte Facet: {}", draft.facet))?;
    ensure!(
        draft.x >= 0 && draft.y >= 0 && (draft.x as u32) < width && (draft.y as u32) < height,
        "Position {}, {} liegt außerhalb der Facet ({}x{})",
        draft.x,
        draft.y,
        width,
        height
    );

    let color = sanitize_field(&draft.color);
    let color = if color.is_empty() {
        DEFAULT_USER_MARKER_COLOR.to_string()
    } else {
        color
    };
    ensure!(
        color.chars().count() <= USER_COLOR_MAX_LEN,
        "Farbname ist länger als {} Zeichen",
        USER_COLOR_MAX_LEN
    );

    Ok(Marker::new(name, draft.x, draft.y, draft.facet)
        .with_icon(&sanitize_field(&draft.icon))
        .with_color(&color)
        .with_zoom(USER_MARKER_ZOOM))
}

/// Hängt einen Marker an die Benutzerdatei an (Datei und Speicher).
fn append_to_user_file(state: &mut WorldMapState, mut marker: Marker) -> Result<()> {
    marker.resolve_icon(&state.icons);
    let file = state
        .user_file_mut()
        .context("Keine Benutzer-Markerdatei geladen")?;
    append_user_marker(&file.path, &marker)?;
    log::info!(
        "Benutzer-Marker gespeichert: {} ({}, {}, Facet {})",
        marker.name,
        marker.x,
        marker.y,
        marker.facet
    );
    file.markers.push(marker);
    Ok(())
}

/// Schreibt die Benutzerdatei aus dem Speicher neu.
fn rewrite_user_file(state: &WorldMapState) -> Result<()> {
    let file = state
        .user_file()
        .context("Keine Benutzer-Markerdatei geladen")?;
    write_user_markers(&file.path, &file.markers)
}

/// Legt einen Marker an der Spielerposition an (Farbe blau, Zoom 3).
pub fn add_on_player(state: &mut WorldMapState, name: &str) -> Result<()> {
    let Some(position) = state.world.player.as_ref().map(|p| p.position) else {
        session::notify(state, "Kein Spieler in der Welt".to_string());
        return Ok(());
    };
    let name = sanitize_field(name);
    if name.is_empty() {
        session::notify(state, "Ungültiger Markername".to_string());
        return Ok(());
    }

    let marker = Marker::new(name, position.x, position.y, state.world.facet)
        .with_color(DEFAULT_USER_MARKER_COLOR)
        .with_zoom(DEFAULT_MARKER_ZOOM);
    append_to_user_file(state, marker)
}

/// Legt einen Marker aus dem Dialog an.
pub fn add_user_marker(state: &mut WorldMapState, draft: &UserMarkerDraft) -> Result<()> {
    let marker = match marker_from_draft(draft) {
        Ok(marker) => marker,
        Err(e) => {
            session::notify(state, format!("{e:#}"));
            return Ok(());
        }
    };
    append_to_user_file(state, marker)?;
    session::close_dialog(state, DialogKind::UserMarker);
    Ok(())
}

/// Ersetzt einen Benutzer-Marker und schreibt die Datei neu.
pub fn edit_user_marker(
    state: &mut WorldMapState,
    index: usize,
    draft: &UserMarkerDraft,
) -> Result<()> {
    let mut marker = match marker_from_draft(draft) {
        Ok(marker) => marker,
        Err(e) => {
            session::notify(state, format!("{e:#}"));
            return Ok(());
        }
    };
    marker.resolve_icon(&state.icons);

    let file = state
        .user_file_mut()
        .context("Keine Benutzer-Markerdatei geladen")?;
    let slot = file
        .markers
        .get_mut(index)
        .with_context(|| format!("Benutzer-Marker {} existiert nicht", index))?;
    *slot = marker;
    rewrite_user_file(state)?;
    state.dialogs.marker_manager.editing = None;
    Ok(())
}

/// Entfernt einen Benutzer-Marker und schreibt die Datei neu.
pub fn remove_user_marker(state: &mut WorldMapState, index: usize) -> Result<()> {
    let file = state
        .user_file_mut()
        .context("Keine Benutzer-Markerdatei geladen")?;
    ensure!(
        index < file.markers.len(),
        "Benutzer-Marker {} existiert nicht",
        index
    );
    let removed = file.markers.remove(index);
    log::info!("Benutzer-Marker entfernt: {}", removed.name);
    rewrite_user_file(state)?;
    state.dialogs.marker_manager.editing = None;
    Ok(())
}
