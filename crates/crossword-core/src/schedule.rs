//! Cancellable task scheduling on a logical clock
//!
//! The session owns one scheduler and feeds it the current time from its
//! event loop. Nothing runs on another thread; a task "fires" when
//! [`Scheduler::pop_due`] hands it back.

use std::time::Duration;

/// Identifies a scheduled task for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    due: Duration,
    period: Option<Duration>,
    task: T,
}

/// One-shot and recurring tasks ordered by due time
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Current logical time
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Run `task` once, `delay` after the current time
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TaskHandle {
        self.push(delay, None, task)
    }

    /// Run `task` every `period`, first after one period.
    /// Periods under a millisecond are raised to one.
    pub fn schedule_every(&mut self, period: Duration, task: T) -> TaskHandle {
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), task)
    }

    /// Remove a task. Returns `false` if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled {
            handle,
            due: self.now + delay,
            period,
            task,
        });
        handle
    }
}

impl<T: Clone> Scheduler<T> {
    /// Hand back the earliest task due at or before `now`, moving the clock
    /// to its due time. Ties go to the task scheduled first. When nothing
    /// is due the clock moves to `now` and `None` is returned.
    ///
    /// Callers loop on this so a task can cancel later ones before they fire.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        let next = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.handle.0))
            .map(|(i, _)| i);

        let Some(index) = next else {
            self.now = self.now.max(now);
            return None;
        };

        self.now = self.now.max(self.tasks[index].due);
        match self.tasks[index].period {
            Some(period) => {
                let entry = &mut self.tasks[index];
                entry.due += period;
                Some(entry.task.clone())
            }
            None => Some(self.tasks.remove(index).task),
        }
    }

    /// Fire everything due by `now`, in order
    pub fn advance_to(&mut self, now: Duration) -> Vec<T> {
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(now) {
            fired.push(task);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_once_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(ms(100), "check");
        assert!(scheduler.advance_to(ms(99)).is_empty());
        assert_eq!(scheduler.advance_to(ms(100)), vec!["check"]);
        assert!(scheduler.advance_to(ms(500)).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_once(ms(100), "check");
        assert!(scheduler.is_pending(handle));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.advance_to(ms(1_000)).is_empty());
    }

    #[test]
    fn test_debounce_pattern_keeps_last() {
        let mut scheduler = Scheduler::new();
        let mut pending = scheduler.schedule_once(ms(100), 1);
        scheduler.advance_to(ms(50));
        scheduler.cancel(pending);
        pending = scheduler.schedule_once(ms(100), 2);
        scheduler.advance_to(ms(120));
        scheduler.cancel(pending);
        scheduler.schedule_once(ms(100), 3);
        assert!(scheduler.advance_to(ms(200)).is_empty());
        assert_eq!(scheduler.advance_to(ms(220)), vec![3]);
    }

    #[test]
    fn test_recurring_fires_once_per_period() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(Duration::from_secs(1), "tick");
        assert!(scheduler.advance_to(ms(999)).is_empty());
        assert_eq!(scheduler.advance_to(ms(3_500)), vec!["tick"; 3]);
        assert_eq!(scheduler.advance_to(ms(4_000)), vec!["tick"]);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_due_order_across_tasks() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(ms(40), "tick");
        scheduler.schedule_once(ms(50), "check");
        assert_eq!(
            scheduler.advance_to(ms(100)),
            vec!["tick", "check", "tick"]
        );
    }

    #[test]
    fn test_pop_due_lets_caller_cancel_midway() {
        let mut scheduler = Scheduler::new();
        let tick = scheduler.schedule_every(ms(10), "tick");
        scheduler.schedule_once(ms(15), "stop");
        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due(ms(100)) {
            if task == "stop" {
                scheduler.cancel(tick);
            }
            fired.push(task);
        }
        assert_eq!(fired, vec!["tick", "stop"]);
        assert_eq!(scheduler.now(), ms(100));
    }

    #[test]
    fn test_delay_counts_from_current_time() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(ms(1_000));
        scheduler.schedule_once(ms(100), "later");
        assert!(scheduler.advance_to(ms(1_050)).is_empty());
        assert_eq!(scheduler.advance_to(ms(1_100)), vec!["later"]);
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(ms(10), 1);
        scheduler.schedule_once(ms(10), 2);
        scheduler.cancel_all();
        assert!(scheduler.advance_to(ms(1_000)).is_empty());
    }
}
