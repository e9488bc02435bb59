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

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type LockResult<'a, T, R> = Result<R, PoisonError<MutexGuard<'a, T>>>;

/// Thread-safe wrapper around a value that allows threads to wait for specific conditions on that value.
#[derive(Debug, Clone)]
pub(crate) struct Waitable<T> {
    inner: Arc<(Mutex<T>, Condvar)>,
}

impl<T> Waitable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new((Mutex::new(value), Condvar::new())),
        }
    }

    pub fn set(&self, value: T) -> LockResult<'_, T, ()> {
        let (mutex, condvar) = &*self.inner;
        let mut guard = mutex.lock()?;
        *guard = value;
        condvar.notify_all();
        Ok(())
    }

    /// Blocks until `condition` holds for the value.
    pub fn wait_until<F>(&self, mut condition: F) -> LockResult<'_, T, T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let (mutex, condvar) = &*self.inner;
        let guard = mutex.lock()?;
        let guard = condvar.wait_while(guard, |value| !condition(value))?;
        Ok(guard.clone())
    }

    /// Like [`Waitable::wait_until`], but gives up after `timeout`.
    ///
    /// Returns whether the condition holds when the call returns.
    pub fn wait_until_timeout<F>(&self, timeout: Duration, mut condition: F) -> LockResult<'_, T, bool>
    where
        F: FnMut(&T) -> bool,
    {
        let (mutex, condvar) = &*self.inner;
        let guard = mutex.lock()?;
        let (guard, _) = condvar
            .wait_timeout_while(guard, timeout, |value| !condition(value))
            .map_err(|e| PoisonError::new(e.into_inner().0))?;
        Ok(condition(&guard))
    }
}
