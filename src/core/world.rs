//! Momentaufnahme der Spielwelt, wie sie die Karte zum Zeichnen braucht.
//!
//! Die Daten stammen von außen (Weltmodell des Clients); die Karte liest nur.

use glam::{IVec2, UVec2};

use super::bounds::WorldRect;
use super::color::{self, Rgba};

/// Gesinnung eines Mobiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notoriety {
    #[default]
    Unknown,
    Innocent,
    Ally,
    Gray,
    Criminal,
    Enemy,
    Murderer,
    Invulnerable,
}

impl Notoriety {
    /// Namensfarbe auf der Karte.
    pub fn color(self) -> Rgba {
        match self {
            Notoriety::Innocent => color::CORNFLOWER_BLUE,
            Notoriety::Ally => color::LIME,
            Notoriety::Gray | Notoriety::Criminal | Notoriety::Unknown => color::DARK_GRAY,
            Notoriety::Enemy => color::ORANGE,
            Notoriety::Murderer => color::RED,
            Notoriety::Invulnerable => color::YELLOW,
        }
    }
}

/// Der eigene Charakter.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    pub serial: u32,
    pub name: String,
    pub position: IVec2,
    pub z: i8,
    /// Lebenspunkte 0.0–1.0
    pub hp_ratio: f32,
}

/// Ein Mobile in Sichtweite (oder zuletzt gesehen).
#[derive(Debug, Clone, PartialEq)]
pub struct MobileInfo {
    pub serial: u32,
    pub name: String,
    pub position: IVec2,
    pub notoriety: Notoriety,
    pub hp_ratio: f32,
    /// Innerhalb der Update-Reichweite
    pub in_range: bool,
}

/// Party- oder Gilden-Mitglied mit letzter bekannter Position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    pub serial: u32,
    pub name: String,
    pub position: IVec2,
    pub facet: i32,
    pub hp_ratio: Option<f32>,
    pub is_guild: bool,
}

/// Grundfläche eines Hauses oder Boots.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseInfo {
    pub serial: u32,
    pub footprint: WorldRect,
}

/// Zustand des Ziel-Cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetingState {
    #[default]
    None,
    /// Ziel ist eine Position
    Position,
    /// Ziel ist ein Objekt
    Object,
}

/// Alles, was die Karte pro Frame über die Welt wissen muss.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub facet: i32,
    pub facet_size: UVec2,
    pub player: Option<PlayerInfo>,
    pub mobiles: Vec<MobileInfo>,
    pub entities: Vec<TrackedEntity>,
    pub party: Vec<u32>,
    pub houses: Vec<HouseInfo>,
    pub targeting: TargetingState,
}

impl WorldSnapshot {
    /// Leere Welt auf einer Facet (ohne Spieler).
    pub fn offline(facet: i32) -> Self {
        let (w, h) = uo_map_texture::FACET_DEFAULT_SIZES
            .get(facet.max(0) as usize)
            .copied()
            .unwrap_or(uo_map_texture::FACET_DEFAULT_SIZES[0]);
        Self {
            facet,
            facet_size: UVec2::new(w, h),
            player: None,
            mobiles: Vec::new(),
            entities: Vec::new(),
            party: Vec::new(),
            houses: Vec::new(),
            targeting: TargetingState::None,
        }
    }

    pub fn is_in_party(&self, serial: u32) -> bool {
        self.party.contains(&serial)
    }

    pub fn entity(&self, serial: u32) -> Option<&TrackedEntity> {
        self.entities.iter().find(|e| e.serial == serial)
    }
}
