//! Icon-Registry: Marker-Icons nach kleingeschriebenem Dateinamen-Stamm.

use image::RgbaImage;
use indexmap::IndexMap;
use std::path::Path;
use std::sync::Arc;

/// Unterstützte Icon-Endungen.
pub const ICON_EXTENSIONS: [&str; 4] = ["cur", "ico", "png", "jpg"];

/// Geladene Icons, Schlüssel = Dateiname ohne Endung, kleingeschrieben.
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    icons: IndexMap<String, Arc<RgbaImage>>,
}

/// Normalisiert einen Icon-Namen zum Registry-Schlüssel.
pub fn icon_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lädt alle Icons eines Verzeichnisses. Defekte Dateien werden geloggt
    /// und übersprungen, ein fehlendes Verzeichnis ergibt eine leere Registry.
    pub fn load_dir(dir: &Path) -> Self {
        let mut registry = Self::new();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Icon-Verzeichnis {} nicht lesbar: {}", dir.display(), e);
                return registry;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| ICON_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            })
            .collect();
        paths.sort();

        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match uo_map_texture::load_icon(&path) {
                Ok(image) => registry.insert(stem, image),
                Err(e) => log::warn!("Icon übersprungen: {:#}", e),
            }
        }

        log::info!("{} Marker-Icons geladen aus {}", registry.len(), dir.display());
        registry
    }

    /// Fügt ein Icon hinzu bzw. ersetzt es.
    pub fn insert(&mut self, name: &str, image: RgbaImage) {
        self.icons.insert(icon_key(name), Arc::new(image));
    }

    /// Sucht ein Icon (Groß-/Kleinschreibung egal).
    pub fn get(&self, name: &str) -> Option<&Arc<RgbaImage>> {
        self.icons.get(&icon_key(name))
    }

    /// Registry-Schlüssel, falls das Icon existiert.
    pub fn resolve(&self, name: &str) -> Option<String> {
        let key = icon_key(name);
        self.icons.contains_key(&key).then_some(key)
    }

    /// Pixelgröße eines Icons.
    pub fn size(&self, key: &str) -> Option<(u32, u32)> {
        self.get(key).map(|img| img.dimensions())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<RgbaImage>)> {
        self.icons.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
