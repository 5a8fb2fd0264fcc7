//! Minimales Command-Log zur Nachverfolgung von Benutzeraktionen.

use super::MapCommand;

/// Speichert ausgeführte Commands in Reihenfolge.
///
/// Per-Frame-Commands (Welt-Update, Mausbewegung, Textur-Poll) werden
/// nicht aufgezeichnet.
#[derive(Default)]
pub struct CommandLog {
    entries: Vec<MapCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt einen ausgeführten Command hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, command: &MapCommand) {
        if is_frame_command(command) {
            return;
        }
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(command.clone());
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Zuletzt ausgeführter Command, für die Statuszeile.
    pub fn last(&self) -> Option<&MapCommand> {
        self.entries.last()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[MapCommand] {
        &self.entries
    }
}

fn is_frame_command(command: &MapCommand) -> bool {
    matches!(
        command,
        MapCommand::SetCanvas { .. }
            | MapCommand::UpdateWorld { .. }
            | MapCommand::FollowPlayer
            | MapCommand::PollTexture
            | MapCommand::PanTo { .. }
            | MapCommand::SetMouse { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_commands_are_not_recorded() {
        let mut log = CommandLog::new();
        log.record(&MapCommand::PollTexture);
        log.record(&MapCommand::SetMouse { pos: None });
        log.record(&MapCommand::Zoom { steps: 1 });
        assert_eq!(log.len(), 1);
        assert!(matches!(log.entries()[0], MapCommand::Zoom { steps: 1 }));
    }

    #[test]
    fn last_returns_newest_user_command() {
        let mut log = CommandLog::new();
        assert!(log.last().is_none());
        log.record(&MapCommand::Zoom { steps: -1 });
        log.record(&MapCommand::PollTexture);
        log.record(&MapCommand::ClearGoto);
        assert!(matches!(log.last(), Some(MapCommand::ClearGoto)));
    }

    #[test]
    fn log_drains_half_when_full() {
        let mut log = CommandLog::new();
        for _ in 0..CommandLog::MAX_ENTRIES {
            log.record(&MapCommand::ClearGoto);
        }
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES);
        log.record(&MapCommand::ReloadZones);
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES / 2 + 1);
        assert!(matches!(log.entries().last(), Some(MapCommand::ReloadZones)));
    }
}
