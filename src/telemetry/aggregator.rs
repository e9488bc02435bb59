// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

pub(crate) type Counts = HashMap<String, u64>;

/// Counters collected during one time slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TelemetryWindow {
    /// Epoch milliseconds, a multiple of the window width.
    pub time_slot_start: i64,
    /// flag id -> variant key -> evaluations
    pub evaluation_counts: HashMap<String, Counts>,
    /// flag id -> evaluations that fell back to the default
    pub error_counts: Counts,
    /// flag id -> variant key -> variants that could not be served
    pub code_bug_counts: HashMap<String, Counts>,
}

impl TelemetryWindow {
    fn new(time_slot_start: i64) -> Self {
        Self {
            time_slot_start,
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.evaluation_counts.is_empty()
            && self.error_counts.is_empty()
            && self.code_bug_counts.is_empty()
    }

    fn merge(&mut self, other: TelemetryWindow) {
        for (flag_id, counts) in other.evaluation_counts {
            for (key, n) in counts {
                add_nested(&mut self.evaluation_counts, &flag_id, &key, n);
            }
        }
        for (flag_id, n) in other.error_counts {
            *self.error_counts.entry(flag_id).or_default() += n;
        }
        for (flag_id, counts) in other.code_bug_counts {
            for (key, n) in counts {
                add_nested(&mut self.code_bug_counts, &flag_id, &key, n);
            }
        }
    }
}

fn add_nested(map: &mut HashMap<String, Counts>, flag_id: &str, key: &str, n: u64) {
    *map.entry(flag_id.to_string())
        .or_default()
        .entry(key.to_string())
        .or_default() += n;
}

enum Event<'a> {
    Evaluation { flag_id: &'a str, variant_key: &'a str },
    Error { flag_id: &'a str },
    CodeBug { flag_id: &'a str, variant_key: &'a str },
}

#[derive(Debug)]
struct Windows {
    current: TelemetryWindow,
    closed: BTreeMap<i64, TelemetryWindow>,
}

impl Windows {
    /// Closes the current window and opens an empty one for `time_slot_start`.
    fn rotate(&mut self, time_slot_start: i64) {
        let closing = std::mem::replace(&mut self.current, TelemetryWindow::new(time_slot_start));
        if closing.is_empty() {
            return;
        }
        match self.closed.entry(closing.time_slot_start) {
            Entry::Vacant(entry) => {
                entry.insert(closing);
            }
            // The slot was closed early by a forced rotation and saw more events afterwards.
            Entry::Occupied(mut entry) => entry.get_mut().merge(closing),
        }
    }
}

/// Counts evaluation outcomes into fixed-width time windows.
///
/// Recording never blocks on anything but the internal mutex, which is only
/// held for a few map updates.
#[derive(Debug)]
pub(crate) struct TelemetryAggregator {
    capture_events: bool,
    window_ms: i64,
    windows: Mutex<Windows>,
}

impl TelemetryAggregator {
    pub(crate) fn new(capture_events: bool, window: Duration) -> Self {
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX).max(1);
        let current = TelemetryWindow::new(time_slot(now_ms(), window_ms));
        Self {
            capture_events,
            window_ms,
            windows: Mutex::new(Windows {
                current,
                closed: BTreeMap::new(),
            }),
        }
    }

    pub(crate) fn record_evaluation(&self, flag_id: &str, variant_key: &str) {
        self.record_at(now_ms(), Event::Evaluation { flag_id, variant_key });
    }

    pub(crate) fn record_error(&self, flag_id: &str) {
        self.record_at(now_ms(), Event::Error { flag_id });
    }

    pub(crate) fn record_code_bug(&self, flag_id: &str, variant_key: &str) {
        self.record_at(now_ms(), Event::CodeBug { flag_id, variant_key });
    }

    /// Closes the current window even if its time slot isn't over.
    pub(crate) fn force_rotate(&self) {
        self.force_rotate_at(now_ms());
    }

    /// Removes and returns all closed windows, oldest first.
    pub(crate) fn drain(&self) -> Vec<TelemetryWindow> {
        let mut windows = self.lock_windows();
        std::mem::take(&mut windows.closed).into_values().collect()
    }

    fn record_at(&self, now_ms: i64, event: Event<'_>) {
        if !self.capture_events {
            return;
        }
        let slot = time_slot(now_ms, self.window_ms);
        let mut windows = self.lock_windows();
        if windows.current.time_slot_start != slot {
            windows.rotate(slot);
        }
        let current = &mut windows.current;
        match event {
            Event::Evaluation { flag_id, variant_key } => {
                add_nested(&mut current.evaluation_counts, flag_id, variant_key, 1)
            }
            Event::Error { flag_id } => {
                *current.error_counts.entry(flag_id.to_string()).or_default() += 1
            }
            Event::CodeBug { flag_id, variant_key } => {
                add_nested(&mut current.code_bug_counts, flag_id, variant_key, 1)
            }
        }
    }

    fn force_rotate_at(&self, now_ms: i64) {
        let slot = time_slot(now_ms, self.window_ms);
        self.lock_windows().rotate(slot);
    }

    fn lock_windows(&self) -> std::sync::MutexGuard<'_, Windows> {
        // Updates are single increments, a poisoned lock still guards consistent counters.
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn time_slot(now_ms: i64, window_ms: i64) -> i64 {
    now_ms.div_euclid(window_ms) * window_ms
}
