//! Loading the model off the event loop thread.
//!
//! A `PendingLoad` is a single-shot promise: the worker thread writes one
//! result into a shared slot and the loop thread takes it out once. The loop
//! thread owns the skeleton from then on, so pose mutation never crosses a
//! thread boundary.
use crate::{mr_error::MrError, skeleton::Skeleton};
use log::{debug, error, info};
use parking_lot::Mutex;
use std::{
    any::Any,
    path::{Path, PathBuf},
    sync::Arc,
    thread::{self, JoinHandle},
    time::Instant,
};

type Slot = Arc<Mutex<Option<Result<Skeleton, MrError>>>>;

/// Something that produces a skeleton from a file
pub trait AssetLoader {
    /// # Errors
    /// May return `MrError`
    fn load(&self, path: &Path) -> Result<Skeleton, MrError>;
}

pub struct PendingLoad {
    slot: Slot,
    worker: Option<JoinHandle<()>>,
    taken: bool,
}

impl PendingLoad {
    /// Starts loading `path` on a new thread
    ///
    /// # Errors
    /// May return `MrError` if the thread can not be started
    pub fn spawn<L>(loader: L, path: PathBuf) -> Result<Self, MrError>
    where
        L: AssetLoader + Send + 'static,
    {
        let slot: Slot = Arc::new(Mutex::new(None));
        let worker_slot = slot.clone();
        let worker = thread::Builder::new()
            .name("asset-load".to_string())
            .spawn(move || {
                let benchmark = Instant::now();
                let result = loader.load(&path);
                debug!("Loading {:?} took {:?}", path, benchmark.elapsed());
                *worker_slot.lock() = Some(result);
            })?;
        Ok(Self {
            slot,
            worker: Some(worker),
            taken: false,
        })
    }

    /// A promise that has already completed
    #[must_use]
    pub fn ready(result: Result<Skeleton, MrError>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(result))),
            worker: None,
            taken: false,
        }
    }

    /// Returns the result the first time it is available and `None` before
    /// that and ever after. A worker that ended without a result counts as
    /// `MrError::LoaderDisconnected`.
    pub fn try_take(&mut self) -> Option<Result<Skeleton, MrError>> {
        if self.taken {
            return None;
        }
        let ready = self.slot.lock().take();
        let result = match ready {
            Some(result) => result,
            None => {
                let finished =
                    self.worker.as_ref().is_some_and(JoinHandle::is_finished);
                if !finished {
                    return None;
                }
                // Check again in case the worker finished after the lock
                let late = self.slot.lock().take();
                late.unwrap_or(Err(MrError::LoaderDisconnected))
            }
        };
        self.taken = true;
        if let Some(worker) = self.worker.take() {
            // Already finished or about to, since the slot was written
            if let Err(payload) = worker.join() {
                error!("Asset loader panicked: {}", panic_message(&*payload));
            }
        }
        Some(result)
    }
}

/// Text of a panic payload, for the usual `&str` and `String` cases
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Where the model is in its one and only load
pub enum AssetState {
    Uninitialized,
    Loading(PendingLoad),
    Loaded,
    Failed,
}

impl AssetState {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Checks a load in progress. On completion moves to `Loaded` or
    /// `Failed` and returns the result. Failures are logged here so callers
    /// only have to decide what to do with a skeleton.
    pub fn poll(&mut self) -> Option<Result<Skeleton, MrError>> {
        let Self::Loading(pending) = self else {
            return None;
        };
        let result = pending.try_take()?;
        match &result {
            Ok(skeleton) => {
                info!(
                    "Loaded {} with {} nodes",
                    skeleton.name,
                    skeleton.len()
                );
                *self = Self::Loaded;
            }
            Err(e) => {
                error!("Asset load failed: {e}");
                *self = Self::Failed;
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{panic_message, AssetLoader, AssetState, PendingLoad};
    use crate::{
        mr_error::MrError,
        skeleton::{JointInfo, Skeleton},
    };
    use std::{
        path::{Path, PathBuf},
        time::Duration,
    };

    struct OneBone;

    impl AssetLoader for OneBone {
        fn load(&self, path: &Path) -> Result<Skeleton, MrError> {
            let mut sk = Skeleton::new(&path.to_string_lossy());
            sk.add_joint(JointInfo::new("Bone"), None);
            Ok(sk)
        }
    }

    struct Panics;

    impl AssetLoader for Panics {
        #[allow(clippy::panic)]
        fn load(&self, _path: &Path) -> Result<Skeleton, MrError> {
            panic!("loader exploded")
        }
    }

    fn wait(pending: &mut PendingLoad) -> Result<Skeleton, MrError> {
        for _ in 0..500 {
            if let Some(result) = pending.try_take() {
                return result;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        Err(MrError::LoaderDisconnected)
    }

    #[test]
    fn spawned_result_is_taken_once() {
        let mut pending =
            PendingLoad::spawn(OneBone, PathBuf::from("one")).unwrap();
        let sk = wait(&mut pending).unwrap();
        assert_eq!(sk.name, "one");
        assert!(pending.try_take().is_none());
    }

    #[test]
    fn dead_worker_is_reported() {
        let mut pending =
            PendingLoad::spawn(Panics, PathBuf::from("x")).unwrap();
        assert!(matches!(
            wait(&mut pending),
            Err(MrError::LoaderDisconnected)
        ));
    }

    #[allow(clippy::panic)]
    fn explode(file: &str) {
        panic!("bad header in {file}")
    }

    #[test]
    fn panic_payload_text() {
        let worker = std::thread::spawn(|| explode("soldier.glb"));
        let payload = worker.join().unwrap_err();
        assert_eq!(panic_message(&*payload), "bad header in soldier.glb");

        let payload: Box<dyn std::any::Any + Send> = Box::new("static text");
        assert_eq!(panic_message(&*payload), "static text");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7u32);
        assert_eq!(panic_message(&*payload), "unknown panic");
    }

    #[test]
    fn state_transitions() {
        let mut state = AssetState::Uninitialized;
        assert!(state.poll().is_none());

        let pending = PendingLoad::ready(Err(MrError::NoScene));
        state = AssetState::Loading(pending);
        assert!(state.is_loading());
        assert!(state.poll().unwrap().is_err());
        assert!(state.is_failed());
        assert!(state.poll().is_none());

        let mut sk = Skeleton::new("ok");
        sk.add_joint(JointInfo::new("Bone"), None);
        state = AssetState::Loading(PendingLoad::ready(Ok(sk)));
        assert!(state.poll().unwrap().is_ok());
        assert!(state.is_loaded());
    }
}
