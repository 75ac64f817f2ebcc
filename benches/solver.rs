use mandelfig::bench::{Benchmark, BenchmarkReport};
use mandelfig::coord::Region;
use mandelfig::solver::{make_set, make_set_threaded};

const HEIGHT: usize = 600;
const MAX_ITER: u32 = 100;
const REPEATS: usize = 5;

fn region(height: usize) -> Region {
    Region::from_ranges((-2.0, 1.0), (-1.2, 1.2), 3 * height / 2, height)
        .expect("valid bench region")
}

fn b_plain(height: usize) -> Benchmark {
    let r = region(height);
    let f = move || {
        make_set(
            (r.x.min, r.x.max),
            (r.y.min, r.y.max),
            r.x_steps,
            r.y_steps,
            MAX_ITER,
        );
    };
    Benchmark::iter(&format!("make_set-{}", height), REPEATS, f)
}

fn b_threaded(threads: usize, height: usize) -> Benchmark {
    let r = region(height);
    let f = move || {
        make_set_threaded(&r, MAX_ITER, threads).expect("solve");
    };
    Benchmark::iter(&format!("threaded-t{}-{}", threads, height), REPEATS, f)
}

fn main() {
    BenchmarkReport::with_benches(&[
        b_plain(HEIGHT),
        b_threaded(0, HEIGHT),
        b_threaded(1, HEIGHT),
        b_threaded(2, HEIGHT),
        b_threaded(4, HEIGHT),
        b_threaded(8, HEIGHT),
    ])
    .report("solver");
}
