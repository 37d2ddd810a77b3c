// Copyright 2024 FastLabs Developers
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

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::Builder;
use tokio::runtime::Handle;
use tokio::runtime::Runtime;

use crate::Error;
use crate::error::ErrorKind;

const SHARED_THREAD_NAME: &str = "logforth-http";

/// Decides where delivery tasks run.
#[derive(Debug, Clone, Default)]
pub(crate) struct Spawner {
    handle: Option<Handle>,
}

impl Spawner {
    pub(crate) fn new(handle: Option<Handle>) -> Self {
        Self { handle }
    }

    /// Spawn a detached task.
    ///
    /// Prefers the configured handle, then the runtime of the calling context, then a shared
    /// single-worker runtime started on first use.
    pub(crate) fn spawn<F>(&self, task: F) -> Result<(), Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = &self.handle {
            handle.spawn(task);
            return Ok(());
        }

        if let Ok(handle) = Handle::try_current() {
            handle.spawn(task);
            return Ok(());
        }

        let runtime = shared_runtime()?;
        runtime.spawn(task);
        Ok(())
    }
}

fn shared_runtime() -> Result<&'static Runtime, Error> {
    static SHARED: OnceLock<std::io::Result<Runtime>> = OnceLock::new();

    let runtime = SHARED.get_or_init(|| {
        Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name(SHARED_THREAD_NAME)
            .enable_all()
            .build()
    });

    match runtime {
        Ok(runtime) => Ok(runtime),
        Err(err) => Err(Error::new(
            ErrorKind::Spawn,
            format!("failed to start background runtime {SHARED_THREAD_NAME}"),
        )
        .with_source(std::io::Error::new(err.kind(), err.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn spawn_outside_runtime_uses_shared_runtime() {
        let (tx, rx) = mpsc::channel();
        Spawner::default()
            .spawn(async move {
                let name = std::thread::current().name().map(str::to_owned);
                let _ = tx.send(name);
            })
            .unwrap();

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some(SHARED_THREAD_NAME));
    }

    #[tokio::test]
    async fn spawn_inside_runtime_uses_current_runtime() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        Spawner::default()
            .spawn(async move {
                let _ = tx.send(());
            })
            .unwrap();
        rx.await.unwrap();
    }

    #[test]
    fn spawn_uses_configured_handle() {
        let runtime = Builder::new_current_thread().enable_all().build().unwrap();
        let spawner = Spawner::new(Some(runtime.handle().clone()));

        let (tx, rx) = tokio::sync::oneshot::channel();
        spawner
            .spawn(async move {
                let _ = tx.send(42);
            })
            .unwrap();

        assert_eq!(runtime.block_on(rx).unwrap(), 42);
    }
}
