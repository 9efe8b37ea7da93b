use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and describe the exported metrics
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

fn init_metric_descriptions() {
    describe_counter!(
        "phone_finder_queries_total",
        "Total number of listing queries, by resolved intent"
    );
    describe_histogram!(
        "phone_finder_query_results",
        "Number of rows returned per query"
    );
    describe_gauge!(
        "phone_finder_listings",
        "Number of listings currently loaded"
    );
    describe_counter!(
        "phone_finder_reloads_total",
        "Inventory reload attempts, by outcome"
    );
    describe_gauge!(
        "phone_finder_info",
        "Service version information"
    );

    gauge!("phone_finder_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a resolved query
pub fn record_query(intent: &str, results: usize) {
    counter!("phone_finder_queries_total", "intent" => intent.to_string()).increment(1);
    histogram!("phone_finder_query_results", "intent" => intent.to_string())
        .record(results as f64);
}

/// Record the size of the table now being served
pub fn record_listings(count: usize) {
    gauge!("phone_finder_listings").set(count as f64);
}

/// Record a reload attempt
pub fn record_reload(outcome: &str) {
    counter!("phone_finder_reloads_total", "outcome" => outcome.to_string()).increment(1);
}
