use std::collections::HashSet;

use chrono::Utc;

use crate::model::task::Task;

/// Issues task ids.
///
/// Ids are decimal millisecond timestamps, the same shape as ids already in
/// existing task files, but each one is strictly greater than every numeric
/// id seen so far, so two tasks created in the same millisecond still get
/// different ids.
///
/// Once the largest id is `u64::MAX` nothing can go above it, so ids are
/// taken from the clock upward, skipping every id already in use.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
    taken: HashSet<u64>,
}

impl IdGenerator {
    /// A generator that will never hand out an id already present in `tasks`
    pub fn seeded(tasks: &[Task]) -> Self {
        let mut ids = IdGenerator::default();
        for task in tasks {
            ids.observe(&task.id);
        }
        ids
    }

    /// Record an existing id. Non-numeric ids can't collide with generated
    /// ones and are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(n) = id.parse::<u64>() {
            self.last = self.last.max(n);
            self.taken.insert(n);
        }
    }

    pub fn next_id(&mut self) -> String {
        self.next_at(now_millis())
    }

    fn next_at(&mut self, now: u64) -> String {
        let mut id = match self.last.checked_add(1) {
            Some(next) => now.max(next),
            None => now,
        };
        while self.taken.contains(&id) {
            id = id.checked_add(1).unwrap_or(0);
        }
        self.last = self.last.max(id);
        self.taken.insert(id);
        id.to_string()
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str) -> Task {
        Task::new(
            id.into(),
            "x".into(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn uses_clock_when_ahead() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(1_000), "1000");
        assert_eq!(ids.next_at(2_000), "2000");
    }

    #[test]
    fn same_millisecond_still_unique() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(5_000), "5000");
        assert_eq!(ids.next_at(5_000), "5001");
        assert_eq!(ids.next_at(5_000), "5002");
    }

    #[test]
    fn clock_going_backwards_does_not_reuse() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(9_000), "9000");
        assert_eq!(ids.next_at(100), "9001");
    }

    #[test]
    fn seeded_past_existing_ids() {
        let mut ids = IdGenerator::seeded(&[task("42"), task("abc"), task("7")]);
        assert_eq!(ids.next_at(10), "43");
    }

    #[test]
    fn largest_possible_id_is_not_reissued() {
        let max = u64::MAX.to_string();
        let mut ids = IdGenerator::seeded(&[task(&max)]);
        assert_eq!(ids.next_at(10), "10");
        assert_eq!(ids.next_at(10), "11");
        assert_eq!(ids.next_at(5), "5");
    }

    #[test]
    fn top_of_range_skips_taken_ids() {
        let near = (u64::MAX - 1).to_string();
        let max = u64::MAX.to_string();
        let mut ids = IdGenerator::seeded(&[task(&near), task("20"), task(&max)]);
        // Nothing fits above the largest id: start from the clock, past taken ids
        assert_eq!(ids.next_at(20), "21");
    }

    #[test]
    fn real_clock_ids_are_increasing() {
        let mut ids = IdGenerator::default();
        let a: u64 = ids.next_id().parse().unwrap();
        let b: u64 = ids.next_id().parse().unwrap();
        assert!(b > a);
    }
}
