use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref SUBMISSIONS_EVALUATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "submissions_evaluated_total",
        "Total number of submissions run through the progression engine",
        &["passed"]
    )
    .unwrap();

    pub static ref XP_AWARDED_TOTAL: IntCounter = register_int_counter!(
        "xp_awarded_total",
        "Total XP awarded across all submissions"
    )
    .unwrap();

    pub static ref LEVEL_UPS_TOTAL: IntCounter = register_int_counter!(
        "level_ups_total",
        "Total number of submissions that raised a track level"
    )
    .unwrap();

    pub static ref STREAK_UPDATES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "streak_updates_total",
        "Total number of streak updates",
        &["transition"]
    )
    .unwrap();

    pub static ref DIFFICULTY_RECOMMENDATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "difficulty_recommendations_total",
        "Total number of difficulty recommendations",
        &["adjustment"]
    )
    .unwrap();

    pub static ref PROGRESSION_REJECTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "progression_rejections_total",
        "Total number of inputs rejected by the progression engine",
        &["constraint"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        let _ = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/health", "200"])
            .get();
        let _ = XP_AWARDED_TOTAL.get();
    }

    #[test]
    fn test_render_metrics() {
        STREAK_UPDATES_TOTAL.with_label_values(&["continued"]).inc();

        let output = render_metrics().unwrap();
        assert!(output.contains("streak_updates_total"));
    }
}
