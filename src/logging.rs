use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "playlist_converter=debug";
const QUIET_FILTER: &str = "error";

/// Installs the stderr subscriber for diagnostic logging.
///
/// `RUST_LOG` wins when set. Otherwise verbose mode logs every request and
/// response of this crate at debug level, and quiet mode only errors so the
/// progress bar stays readable.
pub fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
