use mandelfig::bench::{Benchmark, BenchmarkReport};
use mandelfig::coord::Region;
use mandelfig::Figure;

const REPEATS: usize = 3;

fn b_figure(threads: usize, height: usize) -> Benchmark {
    let region = Region::from_ranges((-3.0, 1.0), (-1.125, 1.125), 16 * height / 9, height)
        .expect("valid bench region");
    let out = std::env::temp_dir().join(format!("mandelfig-bench-t{}.png", threads));
    let figure = Figure::new(region, 100).output(out).threads(threads);
    let f = move || {
        mandelfig::make_figure(&figure).expect("figure");
    };
    Benchmark::iter(&format!("figure-t{}-{}p", threads, height), REPEATS, f)
}

fn main() {
    BenchmarkReport::with_benches(&[
        b_figure(0, 540),
        b_figure(4, 540),
        b_figure(0, 1080),
        b_figure(4, 1080),
    ])
    .report("figure");
}
