use criterion::*;
use geo::Rect;

const BBOX: [f64; 2] = [1024., 1024.];

#[path = "utils/random.rs"]
mod random;
use geo_toposweep::{paths_from_polygon, Path, TopoGraph};
use rand::thread_rng;
use random::*;

fn circular_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("Topological sweep - circular polygons");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    (6..12).for_each(|scale| {
        let steps = 1 << scale;
        let paths: Vec<Path> = (0..2)
            .flat_map(|_| paths_from_polygon(&circular_polygon(thread_rng(), steps)))
            .collect();

        group.sample_size(20);
        group.bench_with_input(BenchmarkId::new("sweep", steps), &paths, |b, paths| {
            b.iter(|| TopoGraph::with_defaults(paths).map(|g| g.len()))
        });
        group.bench_with_input(BenchmarkId::new("sweep + areas", steps), &paths, |b, paths| {
            b.iter(|| {
                let mut g = TopoGraph::with_defaults(paths)?;
                g.trim_whiskers()?;
                g.remove_vestigial()?;
                g.traverse_areas().map(|areas| areas.len())
            })
        });
    });
}

fn uniform_sweep(c: &mut Criterion) {
    const NUM_POLYS: usize = 16;
    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);

    let paths: Vec<Path> = (0..NUM_POLYS)
        .flat_map(|_| paths_from_polygon(&uniform_polygon(&mut thread_rng(), bbox, 16)))
        .collect();
    c.bench_function("Topological sweep - uniform random polygons", |b| {
        b.iter(|| black_box(TopoGraph::with_defaults(&paths).map(|g| g.num_edges())))
    });
}

criterion_group!(random, uniform_sweep, circular_sweep);
criterion_main!(random);
