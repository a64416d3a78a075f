//! Metrics registry for the message board.
//!
//! Counter cells are keyed by a closed label struct instead of free-form
//! string pairs: the endpoint label is the `Endpoint` enum, so label
//! cardinality is bounded by the route table plus `unknown` no matter what
//! paths clients send. Histogram buckets are fixed; observations are stored
//! as integer microseconds to avoid floating point math and rendered in
//! seconds, the conventional exposition unit.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use axum::http::Method;
use dashmap::DashMap;

use crate::router;

/// Logical route names, independent of path parameters. This is the full
/// label space for the `endpoint` dimension: never label by raw path, which
/// is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Index,
    AddMessage,
    DeleteMessage,
    Health,
    Metrics,
    Unknown,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Index => "index",
            Endpoint::AddMessage => "add_message",
            Endpoint::DeleteMessage => "delete_message",
            Endpoint::Health => "health",
            Endpoint::Metrics => "metrics",
            Endpoint::Unknown => "unknown",
        }
    }

    /// Resolve a matched route pattern to its endpoint name. Anything not in
    /// the route table (including requests that matched no route at all)
    /// resolves to `Unknown`.
    pub fn from_route(path: &str) -> Self {
        match path {
            router::ROUTE_INDEX => Endpoint::Index,
            router::ROUTE_ADD => Endpoint::AddMessage,
            router::ROUTE_DELETE => Endpoint::DeleteMessage,
            router::ROUTE_HEALTH => Endpoint::Health,
            router::ROUTE_METRICS => Endpoint::Metrics,
            _ => Endpoint::Unknown,
        }
    }
}

/// One counter cell per observed (method, endpoint, status) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RequestKey {
    method: Method,
    endpoint: Endpoint,
    status: u16,
}

#[derive(Default)]
pub struct RequestCounter {
    map: DashMap<RequestKey, AtomicU64>,
}

impl RequestCounter {
    /// Increment the cell for one completed request.
    pub fn inc(&self, method: &Method, endpoint: Endpoint, status: u16) {
        let key = RequestKey {
            method: method.clone(),
            endpoint,
            status,
        };
        let cell = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        cell.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of one cell (0 if never observed).
    pub fn get(&self, method: &Method, endpoint: Endpoint, status: u16) -> u64 {
        let key = RequestKey {
            method: method.clone(),
            endpoint,
            status,
        };
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let k = r.key();
            let v = r.value().load(Ordering::Relaxed);
            let _ = writeln!(
                out,
                "{}{{endpoint=\"{}\",http_status=\"{}\",method=\"{}\"}} {}",
                name,
                k.endpoint.as_str(),
                k.status,
                k.method,
                v
            );
        }
    }
}

// Fixed buckets in microseconds, rendered as seconds.
// 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
const BUCKETS_MICROS: [u64; 11] = [
    5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000,
    10_000_000,
];
const BUCKET_LABELS: [&str; 11] = [
    "0.005", "0.01", "0.025", "0.05", "0.1", "0.25", "0.5", "1", "2.5", "5", "10",
];

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; 11],
}

impl Default for AtomicHistogram {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

/// Per-endpoint latency histogram, cells created lazily.
#[derive(Default)]
pub struct LatencyHistogram {
    map: DashMap<Endpoint, AtomicHistogram>,
}

impl LatencyHistogram {
    /// Observe one request duration. Cumulative buckets: every bucket whose
    /// upper bound is >= the value is incremented.
    pub fn observe(&self, endpoint: Endpoint, elapsed: Duration) {
        let hist = self.map.entry(endpoint).or_default();
        let micros = elapsed.as_micros() as u64;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Total observation count for an endpoint (0 if never observed).
    pub fn count(&self, endpoint: Endpoint) -> u64 {
        self.map
            .get(&endpoint)
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let ep = r.key().as_str();
            let hist = r.value();

            for (i, le) in BUCKET_LABELS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{endpoint=\"{}\",le=\"{}\"}} {}", name, ep, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{endpoint=\"{}\",le=\"+Inf\"}} {}", name, ep, count);

            let sum_secs = hist.sum_micros.load(Ordering::Relaxed) as f64 / 1e6;
            let _ = writeln!(out, "{}_sum{{endpoint=\"{}\"}} {}", name, ep, sum_secs);
            let _ = writeln!(out, "{}_count{{endpoint=\"{}\"}} {}", name, ep, count);
        }
    }
}

/// Unlabeled integer gauge.
#[derive(Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }
    pub fn dec(&self) {
        self.value.fetch_sub(1, Ordering::Relaxed);
    }
    /// Overwrite the value (used for the message count, which is re-derived
    /// on every list rather than incrementally tracked).
    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        let _ = writeln!(out, "{} {}", name, self.value());
    }
}

/// The full metrics state of the process. Created once at startup, shared
/// through `AppState`, torn down at shutdown. All members are internally
/// thread-safe; concurrent requests may update the same cell.
#[derive(Default)]
pub struct BoardMetrics {
    /// Requests completed, by (method, endpoint, status).
    pub request_count: RequestCounter,
    /// Request latency per endpoint, in seconds.
    pub request_latency: LatencyHistogram,
    /// Database connections currently open by this process. Tracked by local
    /// accounting only, never re-derived from the database.
    pub db_connections: Gauge,
    /// Row count of the messages table as of the last list call.
    pub total_messages: Gauge,
}

impl BoardMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.request_count.render("msgboard_request_count_total", &mut out);
        self.request_latency.render("msgboard_request_latency_seconds", &mut out);
        self.db_connections.render("msgboard_db_connections", &mut out);
        self.total_messages.render("msgboard_total_messages", &mut out);
        out
    }
}
