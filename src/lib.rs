pub mod cmd;
pub mod error;

/// Logs the error and turns the result into an `Option`.
pub fn log_error<T>(x: Result<T, anyhow::Error>) -> Option<T> {
    x.map_err(|e| {
        log::error!("{e:#}");
    })
    .ok()
}
