use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use std::hint::black_box;
use uo_world_map::core::{Canvas, Marker, MarkerFile, MarkerFileKind};
use uo_world_map::app::build_render_scene;
use uo_world_map::{WorldMapSettings, WorldMapState};

/// Marker-Raster rund um die Kartenmitte.
fn build_state(marker_count: usize) -> WorldMapState {
    let mut state = WorldMapState::new(WorldMapSettings::default());
    state.canvas = Canvas::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
    state.view.center = Vec2::new(1500.0, 1500.0);
    state.view.set_zoom_index(6);

    let markers = (0..marker_count)
        .map(|i| {
            let x = 1000 + (i % 1000) as i32;
            let y = 1000 + (i / 1000) as i32 * 3;
            Marker::new(format!("Marker {i}"), x, y, 0).with_color("blue")
        })
        .collect();
    state.marker_files.push(MarkerFile {
        name: "bench.csv".into(),
        path: "bench.csv".into(),
        kind: MarkerFileKind::Csv,
        markers,
        hidden: false,
        editable: false,
    });
    state
}

fn bench_scene_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_scene_build");

    for count in [1_000usize, 10_000, 100_000] {
        let state = build_state(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &state, |b, state| {
            b.iter(|| {
                let scene = build_render_scene(black_box(state));
                black_box(scene.commands.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scene_build);
criterion_main!(benches);
