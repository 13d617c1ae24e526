use super::*;

const RETIRED_CAPACITY: usize = 256;

#[derive(Debug)]
struct Entry {
    job: Arc<Job>,
    superseded_at: Option<Instant>,
}

/// Jobs miners may still submit against.
///
/// A clean job retires everything before it. A non-clean job only supersedes
/// its predecessors, which keep accepting shares for `grace`.
#[derive(Debug)]
pub struct Jobs {
    current: Option<Arc<Job>>,
    valid: HashMap<JobId, Entry>,
    retired: LruCache<JobId, ()>,
    grace: Duration,
}

impl Jobs {
    pub fn new(grace: Duration) -> Self {
        Self {
            current: None,
            valid: HashMap::new(),
            retired: LruCache::new(
                NonZeroUsize::new(RETIRED_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
            grace,
        }
    }

    pub fn current(&self) -> Option<&Arc<Job>> {
        self.current.as_ref()
    }

    pub fn len(&self) -> usize {
        self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    pub fn insert(&mut self, job: Arc<Job>, now: Instant) {
        if job.clean_jobs() {
            for (id, _) in self.valid.drain() {
                self.retired.put(id, ());
            }
        } else {
            for entry in self.valid.values_mut() {
                entry.superseded_at.get_or_insert(now);
            }
            self.prune(now);
        }

        self.valid.insert(
            job.id(),
            Entry {
                job: job.clone(),
                superseded_at: None,
            },
        );

        self.current = Some(job);
    }

    pub fn get(&self, id: JobId, now: Instant) -> Result<Arc<Job>, StratumError> {
        match self.valid.get(&id) {
            Some(entry) if self.expired(entry, now) => Err(StratumError::Stale),
            Some(entry) => Ok(entry.job.clone()),
            None if self.retired.contains(&id) => Err(StratumError::Stale),
            None => Err(StratumError::JobNotFound),
        }
    }

    fn expired(&self, entry: &Entry, now: Instant) -> bool {
        entry
            .superseded_at
            .is_some_and(|at| now.saturating_duration_since(at) > self.grace)
    }

    fn prune(&mut self, now: Instant) {
        let expired = self
            .valid
            .iter()
            .filter(|(_, entry)| self.expired(entry, now))
            .map(|(id, _)| *id)
            .collect::<Vec<JobId>>();

        for id in expired {
            self.valid.remove(&id);
            self.retired.put(id, ());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRACE: Duration = Duration::from_secs(30);

    fn job(id: u64, clean_jobs: bool) -> Arc<Job> {
        let template = block_template::tests::sample();
        let generation_transaction = job::tests::sample_generation_transaction(&template);

        Arc::new(
            Job::new(
                JobId::new(id),
                Arc::new(template),
                generation_transaction,
                Vec::new(),
                Arc::new(Sha256d),
            )
            .with_clean_jobs(clean_jobs),
        )
    }

    #[track_caller]
    fn assert_invariants(jobs: &Jobs) {
        assert_eq!(jobs.current.is_some(), !jobs.valid.is_empty());

        if let Some(current) = &jobs.current {
            assert!(jobs.valid.contains_key(&current.id()));
            assert!(jobs.valid[&current.id()].superseded_at.is_none());
        }
    }

    #[test]
    fn unknown_job() {
        let jobs = Jobs::new(GRACE);
        assert!(jobs.current().is_none());
        assert!(jobs.is_empty());
        assert_eq!(
            jobs.get(JobId::new(1), Instant::now()).unwrap_err(),
            StratumError::JobNotFound
        );
    }

    #[test]
    fn clean_job_retires_predecessors() {
        let now = Instant::now();
        let mut jobs = Jobs::new(GRACE);

        jobs.insert(job(1, true), now);
        jobs.insert(job(2, false), now);
        assert_eq!(jobs.len(), 2);
        assert_invariants(&jobs);

        jobs.insert(job(3, true), now);
        assert_eq!(jobs.len(), 1);
        assert_invariants(&jobs);

        assert_eq!(jobs.current().unwrap().id(), JobId::new(3));
        assert_eq!(jobs.get(JobId::new(1), now).unwrap_err(), StratumError::Stale);
        assert_eq!(jobs.get(JobId::new(2), now).unwrap_err(), StratumError::Stale);
        assert!(jobs.get(JobId::new(3), now).is_ok());
        assert_eq!(
            jobs.get(JobId::new(4), now).unwrap_err(),
            StratumError::JobNotFound
        );
    }

    #[test]
    fn superseded_job_valid_within_grace() {
        let start = Instant::now();
        let mut jobs = Jobs::new(GRACE);

        jobs.insert(job(1, true), start);
        jobs.insert(job(2, false), start);
        assert_invariants(&jobs);

        assert!(jobs.get(JobId::new(1), start + GRACE).is_ok());
        assert_eq!(
            jobs.get(JobId::new(1), start + GRACE + Duration::from_secs(1))
                .unwrap_err(),
            StratumError::Stale
        );
        assert!(
            jobs.get(JobId::new(2), start + GRACE + Duration::from_secs(1))
                .is_ok()
        );
    }

    #[test]
    fn superseded_jobs_are_pruned_after_grace() {
        let start = Instant::now();
        let later = start + GRACE * 2;
        let mut jobs = Jobs::new(GRACE);

        jobs.insert(job(1, true), start);
        jobs.insert(job(2, false), start);
        jobs.insert(job(3, false), later);
        assert_invariants(&jobs);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs.get(JobId::new(1), later).unwrap_err(), StratumError::Stale);
        assert!(jobs.get(JobId::new(2), later).is_ok());
    }

    #[test]
    fn superseded_instant_is_not_reset() {
        let start = Instant::now();
        let mut jobs = Jobs::new(GRACE);

        jobs.insert(job(1, true), start);
        jobs.insert(job(2, false), start);
        jobs.insert(job(3, false), start + GRACE);

        assert_eq!(
            jobs.get(JobId::new(1), start + GRACE + Duration::from_secs(1))
                .unwrap_err(),
            StratumError::Stale
        );
    }
}
