//! Fail-fast path for broken internal invariants.
//!
//! Bad input never lands here, it is reported through [`crate::AsymError`]. An abort
//! means the library itself (or a caller breaking a documented contract) is wrong,
//! and the process is terminated instead of continuing with suspect key material.

use std::sync::OnceLock;

static ABORT_HOOK: OnceLock<fn(&str)> = OnceLock::new();

/// Registers a platform hook that runs before the process is aborted, e.g. to
/// flush a secure log. Only the first registration takes effect.
pub fn set_abort_hook(hook: fn(&str)) -> bool {
    ABORT_HOOK.set(hook).is_ok()
}

#[cold]
pub fn abort(exp: &str) -> ! {
    log::error!("fatal: {exp}");
    if let Some(hook) = ABORT_HOOK.get() {
        hook(exp);
    }
    std::process::abort()
}

/// Aborts with the stringified condition when it does not hold.
#[macro_export]
macro_rules! ensure_invariant {
    ($cond:expr) => {
        if !($cond) {
            $crate::abort::abort(concat!(file!(), ":", line!(), ": ", stringify!($cond)))
        }
    };
}
