use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    /// Dispatched API requests by route
    pub static ref REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "gateway_requests_total",
        "API requests dispatched to a handler",
        &["route"]
    )
    .expect("metric can be registered");

    /// Requests rejected by the rate limiter
    pub static ref RATE_LIMITED_TOTAL: IntCounter = register_int_counter!(
        "gateway_rate_limited_total",
        "Requests rejected with 429"
    )
    .expect("metric can be registered");

    /// Upstream provider failures
    pub static ref PROVIDER_ERRORS_TOTAL: IntCounter = register_int_counter!(
        "gateway_provider_errors_total",
        "Upstream provider calls that failed"
    )
    .expect("metric can be registered");
}

/// Routes counted in `gateway_requests_total`
const API_ROUTES: [&str; 3] = ["mediaInfo", "getSeasonList", "getStream"];

/// Register every counter up front so `/metrics` lists them before first use
pub fn init() {
    lazy_static::initialize(&REQUESTS_TOTAL);
    lazy_static::initialize(&RATE_LIMITED_TOTAL);
    lazy_static::initialize(&PROVIDER_ERRORS_TOTAL);

    for route in API_ROUTES {
        REQUESTS_TOTAL.with_label_values(&[route]);
    }
}

pub fn record_request(route: &str) {
    REQUESTS_TOTAL.with_label_values(&[route]).inc();
}
