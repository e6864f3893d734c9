//! Prometheus metrics (lock-free atomics, zero allocation on hot path).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use pxn_types::CommandError;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Traffic ---
    pub commands_total: AtomicU64,
    pub commands_applied: AtomicU64,

    // --- Rejections, one counter per error kind ---
    pub rejected_malformed: AtomicU64,
    pub rejected_invalid_signature: AtomicU64,
    pub rejected_unauthorized: AtomicU64,
    pub rejected_not_found: AtomicU64,
    pub rejected_store_unavailable: AtomicU64,

    // --- Latency (μs); max resets on each scrape ---
    pub command_duration_us_sum: AtomicU64,
    pub command_duration_us_max: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            commands_total: AtomicU64::new(0),
            commands_applied: AtomicU64::new(0),
            rejected_malformed: AtomicU64::new(0),
            rejected_invalid_signature: AtomicU64::new(0),
            rejected_unauthorized: AtomicU64::new(0),
            rejected_not_found: AtomicU64::new(0),
            rejected_store_unavailable: AtomicU64::new(0),
            command_duration_us_sum: AtomicU64::new(0),
            command_duration_us_max: AtomicU64::new(0),
        }
    }

    pub fn record_rejection(&self, err: &CommandError) {
        let counter = match err {
            CommandError::MalformedCommand(_) => &self.rejected_malformed,
            CommandError::InvalidSignature(_) => &self.rejected_invalid_signature,
            CommandError::Unauthorized(_) => &self.rejected_unauthorized,
            CommandError::NotFound(_) => &self.rejected_not_found,
            CommandError::StoreUnavailable(_) => &self.rejected_store_unavailable,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_command_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.command_duration_us_sum.fetch_add(us, Ordering::Relaxed);
        self.command_duration_us_max.fetch_max(us, Ordering::Relaxed);
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, listings: usize) -> String {
        let total = self.commands_total.load(Ordering::Relaxed);
        let applied = self.commands_applied.load(Ordering::Relaxed);
        let malformed = self.rejected_malformed.load(Ordering::Relaxed);
        let invalid_sig = self.rejected_invalid_signature.load(Ordering::Relaxed);
        let unauthorized = self.rejected_unauthorized.load(Ordering::Relaxed);
        let not_found = self.rejected_not_found.load(Ordering::Relaxed);
        let store_unavailable = self.rejected_store_unavailable.load(Ordering::Relaxed);
        let dur_sum = self.command_duration_us_sum.load(Ordering::Relaxed);
        let dur_max = self.command_duration_us_max.swap(0, Ordering::Relaxed);

        // Convert μs to seconds for Prometheus conventions
        let dur_sum_s = dur_sum as f64 / 1_000_000.0;
        let dur_max_s = dur_max as f64 / 1_000_000.0;

        format!(
            "\
# HELP pxn_commands_total Signed listing commands received.\n\
# TYPE pxn_commands_total counter\n\
pxn_commands_total {total}\n\
# HELP pxn_commands_applied_total Commands verified, authorized and applied.\n\
# TYPE pxn_commands_applied_total counter\n\
pxn_commands_applied_total {applied}\n\
# HELP pxn_commands_rejected_total Rejected commands by reason.\n\
# TYPE pxn_commands_rejected_total counter\n\
pxn_commands_rejected_total{{reason=\"malformed_command\"}} {malformed}\n\
pxn_commands_rejected_total{{reason=\"invalid_signature\"}} {invalid_sig}\n\
pxn_commands_rejected_total{{reason=\"unauthorized\"}} {unauthorized}\n\
pxn_commands_rejected_total{{reason=\"not_found\"}} {not_found}\n\
pxn_commands_rejected_total{{reason=\"store_unavailable\"}} {store_unavailable}\n\
# HELP pxn_command_duration_seconds_sum Total command handling time (seconds).\n\
# TYPE pxn_command_duration_seconds_sum counter\n\
pxn_command_duration_seconds_sum {dur_sum_s:.6}\n\
# HELP pxn_command_duration_seconds_max Max command handling time since last scrape (seconds).\n\
# TYPE pxn_command_duration_seconds_max gauge\n\
pxn_command_duration_seconds_max {dur_max_s:.6}\n\
# HELP pxn_listings Listings currently stored.\n\
# TYPE pxn_listings gauge\n\
pxn_listings {listings}\n"
        )
    }
}
