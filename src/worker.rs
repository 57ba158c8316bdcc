use crate::handlers::validation::normalize::normalize;
use crate::handlers::validation::validator::EmailValidator;
use crate::models::email::{
    AddressRecord, BatchOptions, BatchReport, CleanListResponse, DuplicateRecord, ExtendedRecord,
    REASON_VALIDATION_ERROR, ValidationOptions, Verdict,
};
use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_CHUNK_SIZE: usize = 100;
pub const DEFAULT_CHUNK_TIMEOUT: Duration = Duration::from_secs(120);

static NAMED_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*<(.+?)>$").expect("named address pattern is valid"));

#[derive(Debug, Error, PartialEq)]
pub enum BatchError {
    #[error("chunk {chunk} did not finish within {after:?}")]
    ChunkTimeout { chunk: usize, after: Duration },
}

/// Receives progress and the human-readable log of a list run.
pub trait BatchSink: Send {
    /// Called after every chunk, failed chunks included.
    fn on_progress(&mut self, processed: usize, total: usize);
    fn on_log(&mut self, line: String);
}

/// Sink that keeps every log line and progress update in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub lines: Vec<String>,
    pub progress: Vec<(usize, usize)>,
}

impl BatchSink for CollectingSink {
    fn on_progress(&mut self, processed: usize, total: usize) {
        self.progress.push((processed, total));
    }

    fn on_log(&mut self, line: String) {
        self.lines.push(line);
    }
}

/// Cancellation token checked before each chunk.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Splits pasted text into address records.
///
/// Blank lines are skipped. `Name <address>` lines yield both parts, any other
/// line is taken whole as the address.
pub fn parse_addresses(text: &str) -> Vec<AddressRecord> {
    text.trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match NAMED_ADDRESS.captures(line) {
            Some(caps) => AddressRecord {
                original: line.to_string(),
                email: caps[2].trim().to_string(),
                name: caps[1].trim().to_string(),
            },
            None => AddressRecord {
                original: line.to_string(),
                email: line.to_string(),
                name: String::new(),
            },
        })
        .collect()
}

/// Drives list runs: chunked validation, deduplication and reporting.
#[derive(Clone)]
pub struct ValidationWorker {
    validator: Arc<EmailValidator>,
    chunk_size: usize,
    chunk_timeout: Duration,
}

impl ValidationWorker {
    pub fn new(validator: EmailValidator) -> Self {
        Self {
            validator: Arc::new(validator),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_timeout: DEFAULT_CHUNK_TIMEOUT,
        }
    }

    pub fn with_chunking(mut self, chunk_size: usize, chunk_timeout: Duration) -> Self {
        self.chunk_size = chunk_size.max(1);
        self.chunk_timeout = chunk_timeout;
        self
    }

    pub fn validator(&self) -> &EmailValidator {
        &self.validator
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub async fn validate_email(&self, email: &str, options: &ValidationOptions) -> Verdict {
        self.validator.validate(email.trim(), options).await
    }

    /// Validates every address of `text` and accumulates the report.
    ///
    /// Log lines are emitted in input order. A chunk that exceeds the chunk
    /// timeout is logged, its items are left out of both buckets and the run
    /// continues with the next chunk.
    pub async fn run(
        &self,
        text: &str,
        options: &BatchOptions,
        sink: &mut dyn BatchSink,
        cancel: &CancelFlag,
    ) -> BatchReport {
        let records = parse_addresses(text);
        let total = records.len();
        let mut report = BatchReport::new(total);
        if total == 0 {
            return report;
        }

        let started = Instant::now();
        info!("Starting list run of {} rows", total);
        sink.on_log(format!("Starting to validate an input of {} rows...", total));

        let mut seen: HashSet<String> = HashSet::new();
        let mut processed = 0;

        for (index, chunk) in records.chunks(self.chunk_size).enumerate() {
            let chunk_number = index + 1;
            if cancel.is_cancelled() {
                warn!("List run cancelled before chunk {}", chunk_number);
                report.cancelled = true;
                sink.on_log(format!(
                    "Validation cancelled after {} of {} rows.",
                    processed, total
                ));
                break;
            }

            match self
                .validate_chunk(chunk, &options.validation, chunk_number)
                .await
            {
                Ok(verdicts) => {
                    for (record, verdict) in chunk.iter().cloned().zip(verdicts) {
                        place(&mut report, &mut seen, record, verdict, options, sink);
                    }
                }
                Err(e) => {
                    error!("Chunk {} failed: {}", chunk_number, e);
                    sink.on_log(format!("Error processing batch {}: {}", chunk_number, e));
                    report.failed_chunks.push(chunk_number);
                }
            }

            processed += chunk.len();
            sink.on_progress(processed, total);
        }

        let elapsed = started.elapsed().as_secs_f64();
        info!(
            "List run finished in {:.2}s: {} valid, {} invalid, {} duplicates of {} rows",
            elapsed, report.valid_count, report.invalid_count, report.duplicate_count, total
        );
        sink.on_log(format!(
            "Analysis completed in {:.2} seconds. Found {} valid emails out of {} total.",
            elapsed, report.valid_count, total
        ));

        report
    }

    /// Runs a whole list to completion and packs report, summary and log together.
    pub async fn clean_list(&self, text: &str, options: &BatchOptions) -> CleanListResponse {
        let mut sink = CollectingSink::default();
        let report = self.run(text, options, &mut sink, &CancelFlag::new()).await;
        CleanListResponse {
            summary: report.summary(),
            report,
            log: sink.lines,
        }
    }

    /// Validates one chunk concurrently, returning verdicts in input order.
    async fn validate_chunk(
        &self,
        chunk: &[AddressRecord],
        options: &ValidationOptions,
        chunk_number: usize,
    ) -> Result<Vec<Verdict>, BatchError> {
        let handles: Vec<_> = chunk
            .iter()
            .map(|record| {
                let validator = Arc::clone(&self.validator);
                let email = record.email.clone();
                let options = options.clone();
                tokio::spawn(async move { validator.validate(&email, &options).await })
            })
            .collect();
        let aborts: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();

        let joined = match tokio::time::timeout(self.chunk_timeout, join_all(handles)).await {
            Ok(joined) => joined,
            Err(_) => {
                for abort in aborts {
                    abort.abort();
                }
                return Err(BatchError::ChunkTimeout {
                    chunk: chunk_number,
                    after: self.chunk_timeout,
                });
            }
        };

        let verdicts = joined
            .into_iter()
            .zip(chunk)
            .map(|(result, record)| {
                result.unwrap_or_else(|e| {
                    error!("Validating {} failed: {}", record.email, e);
                    let mut verdict = Verdict::pending(&record.email).reject(REASON_VALIDATION_ERROR);
                    verdict.has_mx = false;
                    verdict.has_a_record = false;
                    verdict
                })
            })
            .collect();

        Ok(verdicts)
    }
}

fn place(
    report: &mut BatchReport,
    seen: &mut HashSet<String>,
    record: AddressRecord,
    verdict: Verdict,
    options: &BatchOptions,
    sink: &mut dyn BatchSink,
) {
    if !verdict.valid {
        let reason = verdict.reason.clone().unwrap_or_default();
        sink.on_log(format!("{} - Invalid email ({})", record.original, reason));
        report.push_invalid(ExtendedRecord::new(record, verdict));
        return;
    }

    if !options.allow_duplicates {
        let normalized = normalize(&record.email);
        if !seen.insert(normalized.clone()) {
            sink.on_log(format!(
                "{} - Duplicate email (normalized to: {})",
                record.original, normalized
            ));
            report.push_duplicate(DuplicateRecord {
                original: record.original,
                email: record.email,
                normalized,
            });
            return;
        }
    }

    sink.on_log(format!("{} - Valid looking email", record.original));
    report.push_valid(ExtendedRecord::new(record, verdict));
}
