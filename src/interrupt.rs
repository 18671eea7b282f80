//! Ctrl+C is turned into an ordinary error so that scratch files are
//! dropped on the way out instead of being left behind by `exit`.

use crate::error::GiftoaError;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Called from the signal handler.
pub fn request() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_requested() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Fails with [`GiftoaError::Interrupted`] once Ctrl+C was pressed.
pub fn check() -> Result<(), GiftoaError> {
    if is_requested() {
        Err(GiftoaError::Interrupted)
    } else {
        Ok(())
    }
}
