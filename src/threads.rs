use std::sync::mpsc;
use std::thread;

use log::debug;

use crate::error::{Error, Result};

pub trait Split: Sized {
    /// Split into exactly `n` contiguous parts, in order. Parts may be empty.
    fn split_parts(self, n: usize) -> Vec<Self>;
}

pub trait Join: Sized {
    fn join_parts(parts: Vec<Self>) -> Self;
}

pub struct RangeSplitter;

impl RangeSplitter {
    /// `n` half-open ranges covering `start..end`; the first `len % n` ranges
    /// are one longer than the rest.
    pub fn split(start: usize, end: usize, n: usize) -> Vec<(usize, usize)> {
        let n = n.max(1);
        let len = end.saturating_sub(start);
        let size = len / n;
        let extra = len % n;

        let mut ranges = Vec::with_capacity(n);
        let mut from = start;
        for i in 0..n {
            let to = from + size + usize::from(i < extra);
            ranges.push((from, to));
            from = to;
        }
        ranges
    }
}

impl<T> Split for Vec<T> {
    fn split_parts(mut self, n: usize) -> Vec<Self> {
        let ranges = RangeSplitter::split(0, self.len(), n);
        let mut parts = Vec::with_capacity(ranges.len());
        for &(from, _) in ranges.iter().rev() {
            parts.push(self.split_off(from));
        }
        parts.reverse();
        parts
    }
}

impl<T> Join for Vec<T> {
    fn join_parts(parts: Vec<Self>) -> Self {
        let len = parts.iter().map(Vec::len).sum();
        let mut v = Vec::with_capacity(len);
        for mut p in parts {
            v.append(&mut p);
        }
        v
    }
}

impl<T, E> Join for std::result::Result<T, E>
where
    T: Join,
{
    fn join_parts(parts: Vec<Self>) -> Self {
        parts
            .into_iter()
            .collect::<std::result::Result<Vec<T>, E>>()
            .map(T::join_parts)
    }
}

pub trait Call<I, O> {
    fn call(&self, input: I) -> Result<O>;
}

impl<F, I, O> Call<I, O> for F
where
    F: Fn(I) -> O,
{
    fn call(&self, input: I) -> Result<O> {
        Ok(self(input))
    }
}

struct Job<I, O> {
    n: usize,
    part: I,
    reply: mpsc::Sender<(usize, O)>,
}

struct Worker<I, O> {
    tx: Option<mpsc::Sender<Job<I, O>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl<I, O> Worker<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn spawn<F>(id: usize, f: F) -> Self
    where
        F: Fn(I) -> O + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Job<I, O>>();
        let handle = thread::Builder::new()
            .name(format!("mandelfig-worker-{}", id))
            .spawn(move || {
                while let Ok(job) = rx.recv() {
                    let out = f(job.part);
                    if job.reply.send((job.n, out)).is_err() {
                        return;
                    }
                }
            })
            .ok();
        Self {
            tx: Some(tx),
            handle,
        }
    }

    fn send(&self, job: Job<I, O>) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| Error::Worker("worker already shut down".to_string()))?;
        tx.send(job)
            .map_err(|_| Error::Worker("worker thread is gone".to_string()))
    }
}

impl<I, O> Drop for Worker<I, O> {
    fn drop(&mut self) {
        // closing the job channel ends the worker loop
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Fixed set of threads mapping `I -> O`. Each call splits the input into
/// one part per worker and joins the outputs back in input order.
pub struct WorkerPool<I, O> {
    workers: Vec<Worker<I, O>>,
}

impl<I, O> WorkerPool<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn with<G, F>(n: usize, factory: G) -> Self
    where
        G: Fn() -> F,
        F: Fn(I) -> O + Send + 'static,
    {
        let workers = (0..n.max(1)).map(|id| Worker::spawn(id, factory())).collect();
        Self { workers }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl<I, O> Call<I, O> for WorkerPool<I, O>
where
    I: Split + Send + 'static,
    O: Join + Send + 'static,
{
    fn call(&self, input: I) -> Result<O> {
        let n = self.workers.len();
        let (reply, rx) = mpsc::channel();
        for (k, (worker, part)) in self.workers.iter().zip(input.split_parts(n)).enumerate() {
            worker.send(Job {
                n: k,
                part,
                reply: reply.clone(),
            })?;
        }
        drop(reply);

        let mut parts: Vec<Option<O>> = (0..n).map(|_| None).collect();
        for _ in 0..n {
            let (k, out) = rx
                .recv()
                .map_err(|_| Error::Worker("worker exited before replying".to_string()))?;
            parts[k] = Some(out);
        }
        let parts = parts
            .into_iter()
            .collect::<Option<Vec<O>>>()
            .ok_or_else(|| Error::Worker("missing part".to_string()))?;
        debug!("joined {} parts", n);
        Ok(O::join_parts(parts))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_vec_split(length: usize, n: usize) {
        let v: Vec<usize> = (0..length).collect();
        let vs = v.clone().split_parts(n);
        assert_eq!(vs.len(), n);
        let sizes: Vec<usize> = vs.iter().map(Vec::len).collect();
        let max = sizes.iter().max().copied().unwrap_or(0);
        let min = sizes.iter().min().copied().unwrap_or(0);
        assert!(max - min <= 1);
        assert_eq!(Vec::join_parts(vs), v);
    }

    #[test]
    fn test_vec_splits() {
        test_vec_split(1, 1);
        test_vec_split(0, 2);
        test_vec_split(5, 8);
        test_vec_split(8, 5);
        test_vec_split(100, 1);
        test_vec_split(55, 47);
    }

    #[test]
    fn test_range_splitter() {
        assert_eq!(
            RangeSplitter::split(0, 10, 3),
            vec![(0, 4), (4, 7), (7, 10)]
        );
        assert_eq!(RangeSplitter::split(5, 5, 2), vec![(5, 5), (5, 5)]);
        assert_eq!(RangeSplitter::split(0, 3, 0), vec![(0, 3)]);
    }

    fn squares(v: Vec<i64>) -> Vec<i64> {
        v.into_iter().map(|x| x * x).collect()
    }

    #[test]
    fn test_worker_pool_preserves_order() {
        let pool = WorkerPool::with(4, || squares);
        assert_eq!(pool.size(), 4);
        let input: Vec<i64> = (0..103).collect();
        let expected: Vec<i64> = input.iter().map(|x| x * x).collect();
        assert_eq!(Call::call(&pool, input.clone()).unwrap(), expected);
        // the pool is reusable
        assert_eq!(Call::call(&pool, input).unwrap(), expected);
    }

    #[test]
    fn test_worker_pool_with_more_workers_than_items() {
        let pool = WorkerPool::with(8, || |v: Vec<u32>| -> Vec<u32> {
            v.into_iter().map(|x| x + 1).collect()
        });
        assert_eq!(Call::call(&pool, vec![1, 2, 3]).unwrap(), vec![2, 3, 4]);
        assert_eq!(Call::call(&pool, vec![]).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_plain_function_call() {
        assert_eq!(Call::call(&squares, vec![3, -2]).unwrap(), vec![9, 4]);
    }
}
