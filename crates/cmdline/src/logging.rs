//! Log level selection and subscriber installation.
//! 日誌等級選擇與訂閱者安裝。

use tracing::debug;
use tracing::level_filters::LevelFilter;

/// Maps the `-v` count to a level: none → warn, one → info, more → debug.
/// 依 `-v` 次數決定日誌等級。
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Installs a stderr `fmt` subscriber at the level for `verbosity`.
/// A subscriber that is already installed is left in place.
pub fn configure_logging(verbosity: u8) -> LevelFilter {
    let level = level_for_verbosity(verbosity);
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        debug!("a global subscriber is already installed");
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::WARN);
        assert_eq!(level_for_verbosity(1), LevelFilter::INFO);
        assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
        assert_eq!(level_for_verbosity(100), LevelFilter::DEBUG);
    }

    #[test]
    fn configuring_twice_is_harmless() {
        assert_eq!(configure_logging(1), LevelFilter::INFO);
        assert_eq!(configure_logging(2), LevelFilter::DEBUG);
    }
}
