//! Jobs and the per-worker search state

use crate::error::{NumbersError, Result};
use crate::expr::{ExpressionRecord, Number, Target};

/// Most source numbers a job may hold, the width of [`UsedMask`]
pub const MAX_NUMBERS: usize = u64::BITS as usize;

/// One independent solving request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    target: Target,
    numbers: Vec<Number>,
}

impl Job {
    pub fn new(target: Target, numbers: Vec<Number>) -> Result<Self> {
        if numbers.is_empty() {
            return Err(NumbersError::NoNumbers);
        }
        if numbers.len() > MAX_NUMBERS {
            return Err(NumbersError::TooManyNumbers {
                count: numbers.len(),
                max: MAX_NUMBERS,
            });
        }
        if let Some(zero) = numbers.iter().find(|&&n| n == 0) {
            return Err(NumbersError::InvalidNumber(zero.to_string()));
        }
        Ok(Self { target, numbers })
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// True when `index` holds the same number as a lower index that is still
    /// unused. Equal numbers are interchangeable, so only the lowest unused
    /// copy is ever placed.
    pub fn is_shadowed(&self, used: UsedMask, index: usize) -> bool {
        let number = self.numbers[index];
        self.numbers[..index]
            .iter()
            .enumerate()
            .any(|(other, &n)| n == number && !used.contains(other))
    }
}

/// Bitmask over a job's number indices; bit `i` is set while index `i` is
/// placed in the expression record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsedMask(u64);

impl UsedMask {
    pub fn contains(self, index: usize) -> bool {
        self.0 & (1u64 << index) != 0
    }

    pub fn insert(&mut self, index: usize) {
        self.0 |= 1u64 << index;
    }

    pub fn remove(&mut self, index: usize) {
        self.0 &= !(1u64 << index);
    }

    /// Number of placed numbers
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

}

/// A worker's private search state: which numbers are placed, and the
/// expression built from them so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerState {
    pub used: UsedMask,
    pub record: ExpressionRecord,
}

impl WorkerState {
    #[allow(dead_code)]
    pub fn for_job(job: &Job) -> Self {
        Self {
            used: UsedMask::default(),
            record: ExpressionRecord::with_capacity(job.len()),
        }
    }

    /// Clear the state for a fresh job
    pub fn reset(&mut self, job: &Job) {
        self.used = UsedMask::default();
        self.record.reset(job.len());
    }

    /// Bulk copy of another worker's state, reusing this state's buffers
    pub fn copy_from(&mut self, other: &WorkerState) {
        self.used = other.used;
        self.record.copy_from(&other.record);
    }

    pub fn placed(&self) -> usize {
        self.used.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(n: Number) -> Target {
        Target::exact(n).unwrap()
    }

    #[test]
    fn test_job_validation() {
        assert!(Job::new(target(10), vec![5, 5]).is_ok());
        assert!(matches!(
            Job::new(target(10), vec![]),
            Err(NumbersError::NoNumbers)
        ));
        assert!(matches!(
            Job::new(target(10), vec![1; 65]),
            Err(NumbersError::TooManyNumbers { count: 65, max: 64 })
        ));
        assert!(Job::new(target(10), vec![1; 64]).is_ok());
        assert!(matches!(
            Job::new(target(10), vec![3, 0]),
            Err(NumbersError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_used_mask() {
        let mut used = UsedMask::default();
        assert_eq!(used.count(), 0);
        used.insert(0);
        used.insert(63);
        assert!(used.contains(0));
        assert!(used.contains(63));
        assert!(!used.contains(1));
        assert_eq!(used.count(), 2);
        used.remove(63);
        assert!(!used.contains(63));
        assert_eq!(used, {
            let mut only_first = UsedMask::default();
            only_first.insert(0);
            only_first
        });
    }

    #[test]
    fn test_shadowed_duplicates() {
        let job = Job::new(target(10), vec![5, 3, 5, 5]).unwrap();
        let mut used = UsedMask::default();
        assert!(!job.is_shadowed(used, 0));
        assert!(!job.is_shadowed(used, 1));
        assert!(job.is_shadowed(used, 2));
        assert!(job.is_shadowed(used, 3));

        used.insert(0);
        assert!(!job.is_shadowed(used, 2));
        assert!(job.is_shadowed(used, 3));
    }

    #[test]
    fn test_worker_state_copy_and_reset() {
        let job = Job::new(target(10), vec![4, 3]).unwrap();
        let mut source = WorkerState::for_job(&job);
        source.used.insert(1);
        source.record.push_value(3);

        let mut copy = WorkerState::default();
        copy.copy_from(&source);
        assert_eq!(copy, source);
        assert_eq!(copy.placed(), 1);

        copy.reset(&job);
        assert_eq!(copy.placed(), 0);
        assert!(copy.record.is_empty());
    }
}
