//! Lightweight global metrics for the snapshot store.
//!
//! Thread-safe atomic counters, process-wide (shared by every store):
//! - document reads
//! - fetches (served / rejected)
//! - saves (committed / failed) and per-pass snapshot counts
//! - bytes written to backing documents

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Reads / fetch -----
static DOCUMENT_READS: AtomicU64 = AtomicU64::new(0);
static SNAPSHOTS_READ: AtomicU64 = AtomicU64::new(0);
static FETCHES_TOTAL: AtomicU64 = AtomicU64::new(0);
static FETCHES_REJECTED: AtomicU64 = AtomicU64::new(0);

// ----- Save -----
static SAVES_TOTAL: AtomicU64 = AtomicU64::new(0);
static SAVES_FAILED: AtomicU64 = AtomicU64::new(0);
static SNAPSHOTS_INSERTED: AtomicU64 = AtomicU64::new(0);
static SNAPSHOTS_UPDATED: AtomicU64 = AtomicU64::new(0);
static SNAPSHOTS_DELETED: AtomicU64 = AtomicU64::new(0);
static BYTES_WRITTEN: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub document_reads: u64,
    pub snapshots_read: u64,
    pub fetches_total: u64,
    pub fetches_rejected: u64,

    pub saves_total: u64,
    pub saves_failed: u64,
    pub snapshots_inserted: u64,
    pub snapshots_updated: u64,
    pub snapshots_deleted: u64,
    pub bytes_written: u64,
}

impl MetricsSnapshot {
    pub fn avg_document_bytes(&self) -> f64 {
        if self.saves_total == 0 {
            0.0
        } else {
            self.bytes_written as f64 / self.saves_total as f64
        }
    }
}

// ----- Recorders (reads) -----
pub fn record_document_read(snapshots: usize) {
    DOCUMENT_READS.fetch_add(1, Ordering::Relaxed);
    SNAPSHOTS_READ.fetch_add(snapshots as u64, Ordering::Relaxed);
}

pub fn record_fetch() {
    FETCHES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn record_fetch_rejected() {
    FETCHES_REJECTED.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (save) -----
pub fn record_save(inserted: usize, updated: usize, deleted: usize, bytes: usize) {
    SAVES_TOTAL.fetch_add(1, Ordering::Relaxed);
    SNAPSHOTS_INSERTED.fetch_add(inserted as u64, Ordering::Relaxed);
    SNAPSHOTS_UPDATED.fetch_add(updated as u64, Ordering::Relaxed);
    SNAPSHOTS_DELETED.fetch_add(deleted as u64, Ordering::Relaxed);
    BYTES_WRITTEN.fetch_add(bytes as u64, Ordering::Relaxed);
}

pub fn record_save_failed() {
    SAVES_FAILED.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        document_reads: DOCUMENT_READS.load(Ordering::Relaxed),
        snapshots_read: SNAPSHOTS_READ.load(Ordering::Relaxed),
        fetches_total: FETCHES_TOTAL.load(Ordering::Relaxed),
        fetches_rejected: FETCHES_REJECTED.load(Ordering::Relaxed),

        saves_total: SAVES_TOTAL.load(Ordering::Relaxed),
        saves_failed: SAVES_FAILED.load(Ordering::Relaxed),
        snapshots_inserted: SNAPSHOTS_INSERTED.load(Ordering::Relaxed),
        snapshots_updated: SNAPSHOTS_UPDATED.load(Ordering::Relaxed),
        snapshots_deleted: SNAPSHOTS_DELETED.load(Ordering::Relaxed),
        bytes_written: BYTES_WRITTEN.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    DOCUMENT_READS.store(0, Ordering::Relaxed);
    SNAPSHOTS_READ.store(0, Ordering::Relaxed);
    FETCHES_TOTAL.store(0, Ordering::Relaxed);
    FETCHES_REJECTED.store(0, Ordering::Relaxed);

    SAVES_TOTAL.store(0, Ordering::Relaxed);
    SAVES_FAILED.store(0, Ordering::Relaxed);
    SNAPSHOTS_INSERTED.store(0, Ordering::Relaxed);
    SNAPSHOTS_UPDATED.store(0, Ordering::Relaxed);
    SNAPSHOTS_DELETED.store(0, Ordering::Relaxed);
    BYTES_WRITTEN.store(0, Ordering::Relaxed);
}
