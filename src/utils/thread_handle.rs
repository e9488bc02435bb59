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

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

/// A named background thread that can be asked to terminate.
///
/// The closure receives the receiving end of a termination channel. The
/// channel is disconnected when [`ThreadHandle::stop`] is called or when the
/// handle is dropped; the thread is expected to check it between units of
/// work and return once it reports anything other than a timeout.
#[derive(Debug)]
pub(crate) struct ThreadHandle<T> {
    thread_termination_sender: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> ThreadHandle<T> {
    pub(crate) fn new<F>(name: &str, f: F) -> std::io::Result<Self>
    where
        F: FnOnce(Receiver<()>) -> T,
        F: Send + 'static,
    {
        let (thread_termination_sender, thread_termination_receiver) = mpsc::channel();

        let t = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || f(thread_termination_receiver))?;

        Ok(Self {
            thread_termination_sender: Some(thread_termination_sender),
            thread_handle: Some(t),
        })
    }

    /// Signals termination and joins the thread.
    ///
    /// Returns `None` if the thread was already stopped, and `Some(Err(_))`
    /// carrying the panic message if the thread panicked.
    pub(crate) fn stop(&mut self) -> Option<Result<T, String>> {
        drop(self.thread_termination_sender.take());
        let t = self.thread_handle.take()?;
        Some(t.join().map_err(|e| {
            if let Some(panic_msg) = e.downcast_ref::<String>() {
                format!("Thread panicked: {panic_msg}")
            } else if let Some(panic_msg) = e.downcast_ref::<&str>() {
                format!("Thread panicked: {panic_msg}")
            } else {
                "Thread panicked".to_string()
            }
        }))
    }
}
