use tracing_appender::non_blocking::WorkerGuard;

/// Routes `tracing` output to `file_name` in the system temp directory.
///
/// The terminal is in raw mode while the maze is drawn, so logs cannot go to stdout or stderr.
/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init(file_name: &str) -> std::io::Result<WorkerGuard> {
    let appender = tracing_appender::rolling::never(std::env::temp_dir(), file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(guard)
}
