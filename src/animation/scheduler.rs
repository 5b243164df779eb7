use std::fmt::Debug;

use crate::animation::hinge::TickStatus;

/// Cooperative per-frame task list.
///
/// Tasks are identified by small copyable keys. Each frame every registered task runs once, in
/// registration order, and tasks reporting [`TickStatus::Done`] are dropped from the list. Nothing
/// reschedules itself recursively: a task stays registered only while it keeps asking for ticks.
#[derive(Clone, Debug)]
pub struct FrameScheduler<K> {
    tasks: Vec<K>,
    frames: u64,
}

impl<K> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            frames: 0,
        }
    }
}

impl<K: Copy + Eq + Debug> FrameScheduler<K> {
    /// An idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key`; returns `false` if it was already registered.
    pub fn register(&mut self, key: K) -> bool {
        if self.tasks.contains(&key) {
            return false;
        }
        self.tasks.push(key);
        true
    }

    /// Remove `key`; returns `false` if it was not registered.
    pub fn unregister(&mut self, key: K) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|k| *k != key);
        self.tasks.len() != before
    }

    /// Whether `key` is currently registered.
    pub fn is_registered(&self, key: K) -> bool {
        self.tasks.contains(&key)
    }

    /// Whether no task is registered.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of frames run so far.
    pub fn frames_run(&self) -> u64 {
        self.frames
    }

    /// Run one frame: call `tick` for every registered task, then drop the finished ones.
    ///
    /// Returns the number of tasks that ran.
    pub fn run_frame(&mut self, mut tick: impl FnMut(K) -> TickStatus) -> usize {
        self.frames += 1;
        let ran = self.tasks.len();
        self.tasks.retain(|&key| match tick(key) {
            TickStatus::Continue => true,
            TickStatus::Done => {
                tracing::trace!(task = ?key, "frame task finished");
                false
            }
        });
        ran
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
