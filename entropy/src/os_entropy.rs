use crate::{EntropyError, EntropySource};
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Mutex;

// one channel per process, each `fill` holds it for the whole request
static CHANNEL: Mutex<()> = Mutex::new(());

/// Operating system generator behind a process wide lock.
#[derive(Copy, Clone, Debug, Default)]
pub struct OsEntropy {
    rng: OsRng,
}

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
        // the guarded value is `()`, a poisoned lock carries no broken state
        let _guard = CHANNEL.lock().unwrap_or_else(|e| e.into_inner());
        let mut rng = self.rng;
        rng.try_fill_bytes(buf).map_err(|e| {
            buf.fill(0);
            log::error!("os entropy source failed: {e}");
            EntropyError(e.to_string())
        })
    }
}
