//! Trailing-edge debounce.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay used by search inputs unless configured otherwise.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A value that follows its input once the input has been stable for `delay`.
///
/// Every new input cancels the pending emission and schedules a new one, so
/// a burst of inputs produces exactly one emission carrying the last value.
/// Dropping the handle (or calling [`Debounced::dispose`]) cancels a pending
/// emission. A settled value equal to the current output is not re-emitted.
#[derive(Debug)]
pub struct Debounced<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    /// Set on every accepted input, cleared when its timer fires.
    pending: Arc<watch::Sender<bool>>,
    delay: Duration,
    task: JoinHandle<()>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start debouncing from `initial`.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);
        let (pending, _) = watch::channel(false);
        let pending = Arc::new(pending);
        let task = tokio::spawn(settle(input_rx, output_tx, Arc::clone(&pending), delay));

        Self {
            input,
            output,
            pending,
            delay,
            task,
        }
    }

    /// Start debouncing with [`DEFAULT_DEBOUNCE`].
    pub fn with_default_delay(initial: T) -> Self {
        Self::new(initial, DEFAULT_DEBOUNCE)
    }

    /// Feed a new input. Inputs equal to the latest one are ignored.
    pub fn set(&self, value: T) {
        self.input.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                self.pending.send_replace(true);
                true
            }
        });
    }

    /// Latest input, settled or not.
    pub fn input(&self) -> T {
        self.input.borrow().clone()
    }

    /// Current settled value.
    pub fn value(&self) -> T {
        self.output.borrow().clone()
    }

    /// Receiver notified on every emission.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    /// Whether a debounce timer is running.
    pub fn is_pending(&self) -> bool {
        *self.pending.borrow()
    }

    /// Receiver of the pending flag; it turns `false` each time a timer
    /// fires, whether or not the output changed.
    pub fn subscribe_pending(&self) -> watch::Receiver<bool> {
        self.pending.subscribe()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Stop debouncing, dropping any pending emission.
    pub fn dispose(self) {}
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn settle<T: Clone + PartialEq>(
    mut input: watch::Receiver<T>,
    output: watch::Sender<T>,
    pending: Arc<watch::Sender<bool>>,
    delay: Duration,
) {
    loop {
        if input.changed().await.is_err() {
            return;
        }

        loop {
            tokio::select! {
                _ = tokio::time::sleep(delay) => break,
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        let value = {
            let latest = input.borrow_and_update();
            pending.send_replace(false);
            latest.clone()
        };
        output.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}
