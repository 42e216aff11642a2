use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Route tracing output to a per-run log file under `log_dir`, or to stderr.
///
/// `RUST_LOG` wins over `verbose` when set.
pub fn init(verbose: bool, log_dir: Option<&Path>) {
    let default_level = if verbose { "signalhound=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file = log_dir.and_then(|dir| {
        fs::create_dir_all(dir).ok()?;
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path(dir))
            .ok()
    });

    if let Some(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn log_file_path(dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    dir.join(format!("signalhound_{timestamp}.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let path = log_file_path(Path::new("logs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("signalhound_"));
        assert!(name.ends_with(".log"));
        // signalhound_YYYY-MM-DD_HH-MM-SS.log
        assert_eq!(name.len(), "signalhound_".len() + 19 + ".log".len());
        assert_eq!(path.parent(), Some(Path::new("logs")));
    }
}
