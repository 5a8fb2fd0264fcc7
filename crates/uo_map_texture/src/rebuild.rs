//! Hintergrund-Neuaufbau der Facet-Textur.
//!
//! Ein Worker-Thread nimmt Aufträge über einen `mpsc`-Kanal entgegen.
//! Jeder Auftrag erhöht einen Generationszähler; der Worker bricht ab,
//! sobald seine Generation überholt ist, und Ergebnisse veralteter
//! Generationen werden beim Empfang verworfen. Der Puffer gelangt nur
//! über den Ergebniskanal zum UI-Thread.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::build_facet_texture;
use crate::composite::FacetTexture;
use crate::facet::{FacetSource, TileColors};

/// Ein Neuaufbau-Auftrag.
enum RebuildJob {
    Build {
        generation: u64,
        facet: u8,
        source: Arc<dyn FacetSource>,
        colors: Arc<dyn TileColors>,
    },
    Shutdown,
}

/// Ergebnis eines abgeschlossenen Auftrags.
#[derive(Debug)]
pub enum RebuildEvent {
    /// Textur fertig, kann übernommen werden
    Finished(FacetTexture),
    /// Aufbau fehlgeschlagen, bisherige Textur bleibt bestehen
    Failed { facet: u8, error: String },
}

struct RebuildResult {
    generation: u64,
    event: RebuildEvent,
}

/// Handle auf den Rebuild-Worker.
pub struct TextureRebuilder {
    jobs: mpsc::Sender<RebuildJob>,
    results: mpsc::Receiver<RebuildResult>,
    generation: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl TextureRebuilder {
    /// Startet den Worker-Thread.
    pub fn spawn() -> Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<RebuildJob>();
        let (result_tx, result_rx) = mpsc::channel::<RebuildResult>();
        let generation = Arc::new(AtomicU64::new(0));

        let worker_generation = Arc::clone(&generation);
        let handle = thread::Builder::new()
            .name("facet-rebuild".into())
            .spawn(move || worker_main(job_rx, result_tx, worker_generation))
            .context("Rebuild-Thread konnte nicht gestartet werden")?;

        Ok(Self {
            jobs: job_tx,
            results: result_rx,
            generation,
            handle: Some(handle),
        })
    }

    /// Fordert den Neuaufbau einer Facet an und gibt die neue Generation zurück.
    ///
    /// Laufende oder wartende Aufträge älterer Generationen werden dadurch verworfen.
    pub fn request(
        &self,
        facet: u8,
        source: Arc<dyn FacetSource>,
        colors: Arc<dyn TileColors>,
    ) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("Facet-Neuaufbau angefordert: Facet {} (Generation {})", facet, generation);

        let job = RebuildJob::Build {
            generation,
            facet,
            source,
            colors,
        };
        if let Err(e) = self.jobs.send(job) {
            log::error!("Rebuild-Auftrag konnte nicht gesendet werden: {e}");
        }
        generation
    }

    /// Aktuelle (neueste) Generation.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Holt alle fertigen Ergebnisse ab, ohne zu blockieren.
    ///
    /// Liefert das Ergebnis der aktuellen Generation, falls vorhanden.
    pub fn poll(&self) -> Option<RebuildEvent> {
        let mut latest = None;
        while let Ok(result) = self.results.try_recv() {
            if let Some(event) = self.accept(result) {
                latest = Some(event);
            }
        }
        latest
    }

    /// Wartet bis zu `timeout` auf ein Ergebnis der aktuellen Generation.
    pub fn wait(&self, timeout: Duration) -> Option<RebuildEvent> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let result = self.results.recv_timeout(remaining).ok()?;
            if let Some(event) = self.accept(result) {
                return Some(event);
            }
        }
    }

    fn accept(&self, result: RebuildResult) -> Option<RebuildEvent> {
        let current = self.current_generation();
        if result.generation != current {
            log::debug!(
                "Veraltetes Rebuild-Ergebnis verworfen (Generation {} < {})",
                result.generation,
                current
            );
            return None;
        }
        Some(result.event)
    }

    /// Beendet den Worker und wartet auf ihn.
    pub fn shutdown(&mut self) {
        // Laufenden Auftrag abbrechen lassen
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.jobs.send(RebuildJob::Shutdown);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                log::error!("Rebuild-Thread ist abgestürzt: {e:?}");
            }
        }
    }
}

impl Drop for TextureRebuilder {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_main(
    jobs: mpsc::Receiver<RebuildJob>,
    results: mpsc::Sender<RebuildResult>,
    generation: Arc<AtomicU64>,
) {
    while let Ok(job) = jobs.recv() {
        let RebuildJob::Build {
            generation: job_generation,
            facet,
            source,
            colors,
        } = job
        else {
            break;
        };

        let is_stale = || generation.load(Ordering::SeqCst) != job_generation;
        if is_stale() {
            log::debug!("Rebuild Generation {} übersprungen", job_generation);
            continue;
        }

        let started = std::time::Instant::now();
        let event = match build_facet_texture(facet, source.as_ref(), colors.as_ref(), &is_stale) {
            Ok(Some(texture)) => {
                log::info!(
                    "Facet {} aufgebaut: {}x{} in {:.2?}",
                    facet,
                    texture.width(),
                    texture.height(),
                    started.elapsed()
                );
                RebuildEvent::Finished(texture)
            }
            Ok(None) => continue,
            Err(e) => {
                log::error!("Facet {} konnte nicht aufgebaut werden: {:#}", facet, e);
                RebuildEvent::Failed {
                    facet,
                    error: format!("{e:#}"),
                }
            }
        };

        if results
            .send(RebuildResult {
                generation: job_generation,
                event,
            })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::{MapBlock, MemoryFacet};
    use crate::radar::{RadarColors, LAND_ENTRIES};
    use std::sync::Mutex;

    fn colors() -> Arc<dyn TileColors> {
        let mut c = vec![0u16; LAND_ENTRIES + 1];
        c[1] = 0x7C00;
        Arc::new(RadarColors::from_colors(c))
    }

    fn filled(size: u32) -> Arc<dyn FacetSource> {
        let mut facet = MemoryFacet::new(size, size);
        for y in 0..size {
            for x in 0..size {
                facet.set_land(x, y, 1, 0);
            }
        }
        Arc::new(facet)
    }

    /// Facet, deren erster Block erst nach Freigabe gelesen werden kann.
    struct GatedFacet {
        inner: MemoryFacet,
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl FacetSource for GatedFacet {
        fn size(&self) -> (u32, u32) {
            self.inner.size()
        }

        fn read_block(&self, bx: u32, by: u32) -> Result<Option<MapBlock>> {
            if let Ok(gate) = self.gate.lock() {
                let _ = gate.recv();
            }
            self.inner.read_block(bx, by)
        }
    }

    struct BrokenFacet;

    impl FacetSource for BrokenFacet {
        fn size(&self) -> (u32, u32) {
            (8, 8)
        }

        fn read_block(&self, _bx: u32, _by: u32) -> Result<Option<MapBlock>> {
            anyhow::bail!("Lesefehler")
        }
    }

    #[test]
    fn test_rebuild_delivers_texture() {
        let rebuilder = TextureRebuilder::spawn().unwrap();
        let generation = rebuilder.request(3, filled(16), colors());
        assert_eq!(generation, 1);

        match rebuilder.wait(Duration::from_secs(10)) {
            Some(RebuildEvent::Finished(tex)) => {
                assert_eq!(tex.facet, 3);
                assert_eq!((tex.width(), tex.height()), (18, 18));
                assert_eq!(tex.cell(5, 5), [255, 0, 0, 255]);
            }
            other => panic!("unerwartetes Ergebnis: {other:?}"),
        }
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let (gate_tx, gate_rx) = mpsc::channel();
        let gated = Arc::new(GatedFacet {
            inner: MemoryFacet::new(8, 8),
            gate: Mutex::new(gate_rx),
        });

        let rebuilder = TextureRebuilder::spawn().unwrap();
        rebuilder.request(1, gated, colors());
        let newest = rebuilder.request(2, filled(8), colors());
        assert_eq!(rebuilder.current_generation(), newest);
        // Auftrag 1 kann bereits übersprungen worden sein
        let _ = gate_tx.send(());

        match rebuilder.wait(Duration::from_secs(10)) {
            Some(RebuildEvent::Finished(tex)) => assert_eq!(tex.facet, 2),
            other => panic!("unerwartetes Ergebnis: {other:?}"),
        }
        assert!(rebuilder.poll().is_none());
    }

    #[test]
    fn test_failed_rebuild_is_reported() {
        let rebuilder = TextureRebuilder::spawn().unwrap();
        rebuilder.request(0, Arc::new(BrokenFacet), colors());

        match rebuilder.wait(Duration::from_secs(10)) {
            Some(RebuildEvent::Failed { facet, error }) => {
                assert_eq!(facet, 0);
                assert!(error.contains("Lesefehler"));
            }
            other => panic!("unerwartetes Ergebnis: {other:?}"),
        }
    }
}
