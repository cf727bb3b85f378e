use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUESTS_ADMITTED: Counter = register_counter!(
        "admission_requests_admitted_total",
        "Requests passed through to the handler"
    )
    .unwrap();
    pub static ref REQUESTS_REJECTED: Counter = register_counter!(
        "admission_requests_rejected_total",
        "Requests rejected with 429"
    )
    .unwrap();
    pub static ref TRACKED_KEYS: Gauge =
        register_gauge!("admission_tracked_keys", "Keys held in the registry as of the last sweep").unwrap();
    pub static ref KEYS_EVICTED: Counter =
        register_counter!("admission_keys_evicted_total", "Idle keys removed by the janitor")
            .unwrap();
    pub static ref SWEEP_DURATION: Histogram = register_histogram!(
        "admission_sweep_duration_seconds",
        "Time spent in one janitor sweep"
    )
    .unwrap();
}
