use super::*;

/// Source of job ids. The first id handed out is 1 and ids are never reused
/// for the lifetime of the counter.
#[derive(Debug, Default)]
pub struct JobCounter(AtomicU64);

impl JobCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> JobId {
        JobId::new(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// The most recently issued id, `None` before the first job.
    pub fn current(&self) -> Option<JobId> {
        match self.0.load(Ordering::Relaxed) {
            0 => None,
            id => Some(JobId::new(id)),
        }
    }
}
