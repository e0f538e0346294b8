// src/fuzz/run.rs
// =============================================================================
// One complete scan, from wordlist to summary.
//
// Steps:
// 1. Print the banner
// 2. Load the wordlist (fatal if missing) and expand it with extensions
// 3. Run the worker pool, each worker probing and recording into the
//    shared aggregator
// 4. Take a snapshot once every worker has been joined
// 5. Print the summary (and the interruption notice if Ctrl-C stopped us)
//
// Writing the report file is a separate step (`save_report`) so that a
// failing disk never costs the operator the findings already on screen.
// =============================================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use tracing::{debug, info, warn};

use super::aggregator::{ResultAggregator, RunSnapshot};
use super::pool::{PoolReport, ShutdownSignal, WorkerPool};
use crate::config::FuzzConfig;
use crate::probe::{HttpTransport, Prober, Transport};
use crate::report::{console, write_report, ReportHeader};
use crate::wordlist::{generate_candidates, load_wordlist};

/// Final state of a run, handed to the summary and the report writer.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub snapshot: RunSnapshot,
    pub pool: PoolReport,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn interrupted(&self) -> bool {
        self.pool.interrupted
    }
}

#[derive(Debug)]
pub struct FuzzRun {
    config: FuzzConfig,
    shutdown: ShutdownSignal,
}

impl FuzzRun {
    pub fn new(config: FuzzConfig, shutdown: ShutdownSignal) -> Self {
        Self { config, shutdown }
    }

    /// Runs the scan over real HTTP.
    pub async fn execute(&self) -> Result<RunSummary> {
        let transport =
            HttpTransport::new(self.config.timeout).context("failed to build HTTP client")?;
        self.execute_with(Arc::new(transport)).await
    }

    pub async fn execute_with(&self, transport: Arc<dyn Transport>) -> Result<RunSummary> {
        console::print_banner(&self.config);

        let words = load_wordlist(&self.config.wordlist).await?;
        let candidates = generate_candidates(&words, &self.config.extensions);
        info!(
            words = words.len(),
            candidates = candidates.len(),
            threads = self.config.threads,
            "wordlist loaded"
        );
        console::print_plan(candidates.len());

        let prober = Arc::new(Prober::new(self.config.target.clone(), transport));
        let aggregator = Arc::new(ResultAggregator::new());
        let mut pool = WorkerPool::new(self.config.threads, candidates, self.shutdown.clone());

        let started = Instant::now();
        let pool_report = {
            let prober = Arc::clone(&prober);
            let aggregator = Arc::clone(&aggregator);
            pool.run(move |candidate| {
                let prober = Arc::clone(&prober);
                let aggregator = Arc::clone(&aggregator);
                async move { prober.probe_and_record(&candidate, &aggregator).await }
            })
            .await?
        };
        let elapsed = started.elapsed();
        debug!(
            state = ?pool.state(),
            dispatched = pool_report.dispatched,
            completed = pool_report.completed,
            "probing finished"
        );

        let snapshot = aggregator.snapshot();
        if pool_report.failed_workers > 0 {
            warn!(
                failed_workers = pool_report.failed_workers,
                "workers failed; results are partial"
            );
            println!();
            println!(
                "{}",
                format!(
                    "[!] {} worker(s) failed, results may be incomplete",
                    pool_report.failed_workers
                )
                .red()
            );
        }
        if pool_report.interrupted {
            info!(
                completed = pool_report.completed,
                remaining = pool.pending(),
                "scan interrupted"
            );
            console::print_interrupted();
        }
        console::print_summary(&snapshot, elapsed);

        Ok(RunSummary {
            snapshot,
            pool: pool_report,
            elapsed,
        })
    }

    /// Writes the report file if `--output` was given. Failures are reported
    /// to the operator and otherwise ignored.
    pub fn save_report(&self, summary: &RunSummary) {
        let Some(path) = &self.config.output else {
            return;
        };

        let header = ReportHeader {
            target: self.config.target.as_str(),
            wordlist: &self.config.wordlist,
            generated_at: Local::now(),
            elapsed: summary.elapsed,
            interrupted: summary.interrupted(),
        };

        match write_report(path, self.config.format, &header, &summary.snapshot) {
            Ok(()) => {
                info!(path = %path.display(), "report written");
                println!();
                println!(
                    "{}",
                    format!("[+] Report saved to: {}", path.display()).green()
                );
            }
            Err(err) => {
                warn!(error = %err, "report not written");
                println!();
                println!("{}", format!("[!] Failed to save report: {}", err).red());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReportFormat;
    use crate::config::Target;
    use crate::probe::{FetchedResponse, TransportError};
    use crate::testing::{Reply, StubServer};
    use crate::wordlist::WordlistError;
    use futures::future::BoxFuture;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use url::Url;

    // Mock HTTP layer: known paths answer, everything else is refused.
    struct MockTransport(HashMap<&'static str, u16>);

    impl Transport for MockTransport {
        fn get<'a>(
            &'a self,
            url: &'a Url,
        ) -> BoxFuture<'a, Result<FetchedResponse, TransportError>> {
            Box::pin(async move {
                match self.0.get(url.path()) {
                    Some(&status) => Ok(FetchedResponse { status, size: 100 }),
                    None => Err(TransportError::Connect("connection refused".to_string())),
                }
            })
        }
    }

    fn wordlist(words: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(words.as_bytes()).unwrap();
        file
    }

    fn config(target: &str, wordlist: PathBuf, extensions: &[&str], threads: usize) -> FuzzConfig {
        FuzzConfig {
            target: Target::parse(target).unwrap(),
            wordlist,
            threads,
            timeout: Duration::from_secs(2),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            output: None,
            format: ReportFormat::Text,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_end_to_end_with_mock_transport() {
        let words = wordlist("admin\nlogin\n");
        let run = FuzzRun::new(
            config("http://example.test", words.path().to_path_buf(), &["php"], 2),
            ShutdownSignal::new(),
        );
        let transport = MockTransport(HashMap::from([("/admin", 200), ("/login.php", 403)]));

        let summary = run.execute_with(Arc::new(transport)).await.unwrap();

        assert_eq!(summary.pool.dispatched, 4);
        assert_eq!(summary.snapshot.total_requests, 2);
        assert_eq!(summary.snapshot.found_count, 2);
        let statuses: Vec<u16> = summary
            .snapshot
            .sorted_by_status()
            .iter()
            .map(|o| o.status)
            .collect();
        assert_eq!(statuses, vec![200, 403]);
        assert!(!summary.interrupted());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_end_to_end_over_http() {
        let server = StubServer::start(vec![
            ("/admin", Reply::status(200, "<h1>admin</h1>")),
            ("/admin.php", Reply::Drop),
            ("/login.php", Reply::status(403, "no")),
        ])
        .await;
        let words = wordlist("admin\nlogin\n");
        let run = FuzzRun::new(
            config(&server.base_url(), words.path().to_path_buf(), &["php"], 2),
            ShutdownSignal::new(),
        );

        let summary = run.execute().await.unwrap();

        // admin, login (404) and login.php answered; admin.php was dropped.
        assert_eq!(summary.snapshot.total_requests, 3);
        assert_eq!(summary.snapshot.found_count, 2);
        let sorted = summary.snapshot.sorted_by_status();
        assert_eq!(sorted[0].status, 200);
        assert_eq!(sorted[0].size, 14);
        assert_eq!(sorted[0].url, format!("{}admin", server.base_url()));
        assert_eq!(sorted[1].status, 403);
        assert_eq!(sorted[1].path, "login.php");

        let mut hits = server.hits();
        hits.sort();
        assert_eq!(hits, vec!["/admin", "/admin.php", "/login", "/login.php"]);
    }

    #[tokio::test]
    async fn test_missing_wordlist_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let run = FuzzRun::new(
            config("http://example.test", dir.path().join("missing.txt"), &[], 2),
            ShutdownSignal::new(),
        );

        let err = run
            .execute_with(Arc::new(MockTransport(HashMap::new())))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WordlistError>(),
            Some(WordlistError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_interrupted_before_start() {
        let words = wordlist("a\nb\nc\n");
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();
        let run = FuzzRun::new(
            config("http://example.test", words.path().to_path_buf(), &[], 2),
            shutdown,
        );

        let summary = run
            .execute_with(Arc::new(MockTransport(HashMap::from([("/a", 200)]))))
            .await
            .unwrap();

        assert!(summary.interrupted());
        assert_eq!(summary.pool.dispatched, 0);
        assert_eq!(summary.snapshot, RunSnapshot::default());
    }

    // Fires the shutdown signal from inside the request, as a Ctrl-C landing
    // while the last probe is still waiting on the server would.
    struct InterruptingTransport(ShutdownSignal);

    impl Transport for InterruptingTransport {
        fn get<'a>(
            &'a self,
            _url: &'a Url,
        ) -> BoxFuture<'a, Result<FetchedResponse, TransportError>> {
            Box::pin(async move {
                self.0.trigger();
                Ok(FetchedResponse { status: 200, size: 7 })
            })
        }
    }

    #[tokio::test]
    async fn test_interrupted_on_last_candidate() {
        let words = wordlist("admin\n");
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.txt");
        let shutdown = ShutdownSignal::new();
        let mut cfg = config("http://example.test", words.path().to_path_buf(), &[], 1);
        cfg.output = Some(report_path.clone());
        let run = FuzzRun::new(cfg, shutdown.clone());

        let summary = run
            .execute_with(Arc::new(InterruptingTransport(shutdown)))
            .await
            .unwrap();

        assert!(summary.interrupted());
        assert_eq!(summary.pool.completed, 1);
        assert_eq!(summary.snapshot.found_count, 1);

        run.save_report(&summary);
        let report = std::fs::read_to_string(&report_path).unwrap();
        assert!(report.contains("Status: interrupted (partial results)\n"));
    }

    // Panics on one path, answers 200 everywhere else.
    struct PanickingTransport(&'static str);

    impl Transport for PanickingTransport {
        fn get<'a>(
            &'a self,
            url: &'a Url,
        ) -> BoxFuture<'a, Result<FetchedResponse, TransportError>> {
            Box::pin(async move {
                if url.path() == self.0 {
                    panic!("stdout went away");
                }
                Ok(FetchedResponse { status: 200, size: 1 })
            })
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_worker_panic_keeps_partial_results() {
        let words = wordlist("a\nb\nc\nd\n");
        let run = FuzzRun::new(
            config("http://example.test", words.path().to_path_buf(), &[], 2),
            ShutdownSignal::new(),
        );

        let summary = run
            .execute_with(Arc::new(PanickingTransport("/a")))
            .await
            .unwrap();

        assert_eq!(summary.pool.failed_workers, 1);
        assert_eq!(summary.snapshot.found_count, 3);
        let mut paths: Vec<&str> = summary
            .snapshot
            .results
            .iter()
            .map(|o| o.path.as_str())
            .collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_save_report() {
        let words = wordlist("admin\n");
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.txt");
        let mut cfg = config("http://example.test/", words.path().to_path_buf(), &[], 1);
        cfg.output = Some(report_path.clone());
        let run = FuzzRun::new(cfg, ShutdownSignal::new());

        let summary = run
            .execute_with(Arc::new(MockTransport(HashMap::from([("/admin", 200)]))))
            .await
            .unwrap();
        run.save_report(&summary);

        let report = std::fs::read_to_string(&report_path).unwrap();
        assert!(report.contains("Target: http://example.test\n"));
        assert!(report.contains("[200] http://example.test/admin\n"));
    }
}
