//! `pdfdl run` – enumerate manifests, then download every task.

use anyhow::Result;
use pdfdl_core::config::FetchConfig;
use pdfdl_core::{fetcher, manifest};
use std::time::Instant;

pub async fn run_fetch(cfg: &FetchConfig) -> Result<()> {
    let started = Instant::now();

    let tasks = manifest::enumerate_tasks(cfg);
    if tasks.is_empty() {
        tracing::error!(
            "No download tasks found in {}",
            cfg.manifest_dir.display()
        );
    } else {
        fetcher::run_tasks(cfg, tasks).await?;
    }

    tracing::info!(
        "Total execution time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfdl_core::logging::RunLogFormat;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_manifest_dir_logs_error_and_downloads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FetchConfig {
            manifest_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("pdfs"),
            ..FetchConfig::default()
        };

        let capture = Capture::default();
        let sink = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(RunLogFormat)
            .with_writer(move || sink.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        run_fetch(&cfg).await.unwrap();

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(
            out.lines()
                .any(|l| l.contains(" - ERROR - No download tasks found in ")),
            "log: {out}"
        );
        assert!(!out.contains("Starting download"), "log: {out}");
        assert!(!cfg.output_dir.exists());
    }
}
