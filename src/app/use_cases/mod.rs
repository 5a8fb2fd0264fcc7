//! Use-Cases der Application-Layer-Orchestrierung.

pub mod goto;
pub mod markers;
pub mod session;
pub mod texture;
pub mod view;
pub mod zones;
