// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Observer list fired synchronously after a successful mutation.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<Box<dyn FnMut()>>,
    batch_depth: usize,
    pending: bool,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Fires every observer now, or once at the end of the enclosing batch.
    pub fn notify(&mut self) {
        if self.batch_depth > 0 {
            self.pending = true;
            return;
        }
        for observer in self.observers.iter_mut() {
            observer();
        }
    }

    pub(crate) fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    pub(crate) fn end_batch(&mut self) {
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 && self.pending {
            self.pending = false;
            self.notify();
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .field("batch_depth", &self.batch_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(notifier: &mut ChangeNotifier) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        notifier.subscribe(move || handle.set(handle.get() + 1));
        count
    }

    #[test]
    fn test_notify_reaches_every_observer() {
        let mut notifier = ChangeNotifier::new();
        let first = counting(&mut notifier);
        let second = counting(&mut notifier);

        notifier.notify();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_batch_coalesces_notifications() {
        let mut notifier = ChangeNotifier::new();
        let count = counting(&mut notifier);

        notifier.begin_batch();
        notifier.notify();
        notifier.notify();
        notifier.begin_batch();
        notifier.notify();
        notifier.end_batch();
        assert_eq!(count.get(), 0);
        notifier.end_batch();

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_empty_batch_stays_silent() {
        let mut notifier = ChangeNotifier::new();
        let count = counting(&mut notifier);

        notifier.begin_batch();
        notifier.end_batch();

        assert_eq!(count.get(), 0);
    }
}
