/// A callback subscribed to an event source for exactly one firing.
///
/// The first `fire` takes the callback out and runs it; later calls find the
/// subscription gone and do nothing.
pub struct OneShotTrigger<F> {
    callback: parking_lot::Mutex<Option<F>>,
}

impl<F> OneShotTrigger<F> {
    pub fn subscribe(callback: F) -> Self {
        Self {
            callback: parking_lot::Mutex::new(Some(callback)),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.callback.lock().is_some()
    }

    pub fn fire<E>(&self, event: E) -> bool
    where
        F: FnOnce(E),
    {
        // Release the lock before running the callback.
        let callback = self.callback.lock().take();
        match callback {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }
}
