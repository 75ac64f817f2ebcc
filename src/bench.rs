use std::fs;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::warn;

#[derive(Clone)]
pub struct Benchmark {
    f: Rc<dyn Fn()>,
    name: String,
    iterations: usize,
}

impl Benchmark {
    pub fn iter<F: Fn() + 'static>(name: &str, n: usize, f: F) -> Self {
        Self {
            f: Rc::new(f),
            name: name.to_string(),
            iterations: n.max(1),
        }
    }

    pub fn once<F: Fn() + 'static>(name: &str, f: F) -> Self {
        Self::iter(name, 1, f)
    }

    fn run(&self) -> Timing {
        let start = Instant::now();
        for _ in 0..self.iterations {
            (self.f)();
        }
        Timing {
            name: self.name.clone(),
            iterations: self.iterations,
            total: start.elapsed(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Timing {
    pub name: String,
    pub iterations: usize,
    pub total: Duration,
}

impl Timing {
    pub fn per_call(&self) -> Duration {
        self.total.div_f64(self.iterations as f64)
    }
}

fn format_duration(d: Duration) -> String {
    if d.as_micros() < 10_000 {
        format!("{:>8}µs", d.as_micros())
    } else if d.as_millis() < 10_000 {
        format!("{:>8}ms", d.as_millis())
    } else {
        format!("{:>8}s ", d.as_secs())
    }
}

#[derive(Default)]
pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    results: Vec<Timing>,
}

impl BenchmarkReport {
    pub fn with_benches(benches: &[Benchmark]) -> Self {
        Self {
            benches: benches.to_vec(),
            results: vec![],
        }
    }

    pub fn run(&mut self) {
        for bench in &self.benches {
            self.results.push(bench.run());
            print!(".");
            let _ = stdout().flush();
        }
        println!();
    }

    pub fn results(&self) -> &[Timing] {
        &self.results
    }

    pub fn show(&self) {
        println!("  {: <32} {: >10} {: >10}", "benchmark", "total", "per_call");
        for t in &self.results {
            println!(
                "  {: <32} {} {}",
                t.name,
                format_duration(t.total),
                format_duration(t.per_call())
            );
        }
    }

    pub fn to_csv(&self) -> String {
        let mut lines = vec!["benchmark,total_us,iterations,per_call_us".to_string()];
        for t in &self.results {
            lines.push(format!(
                "{},{},{},{}",
                t.name,
                t.total.as_micros(),
                t.iterations,
                t.per_call().as_micros()
            ));
        }
        lines.push(String::new());
        lines.join("\n")
    }

    pub fn write_csv(&self, filename: &str) -> io::Result<()> {
        fs::write(filename, self.to_csv())
    }

    pub fn report(&mut self, name: &str) {
        print!("Benchmark: {}", name);
        self.run();
        self.show();
        let filename = format!("benchmark_{}.csv", name);
        if let Err(e) = self.write_csv(&filename) {
            warn!("could not write {}: {}", filename, e);
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_runs_each_iteration() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut report = BenchmarkReport::with_benches(&[
            Benchmark::iter("count", 3, move || counter.set(counter.get() + 1)),
            Benchmark::once("noop", || ()),
        ]);
        report.run();
        assert_eq!(calls.get(), 3);
        assert_eq!(report.results().len(), 2);
        let csv = report.to_csv();
        assert!(csv.starts_with("benchmark,total_us"));
        assert!(csv.contains("\ncount,"));
        assert!(csv.contains(",3,"));
    }
}
