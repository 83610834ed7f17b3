// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// 安装 Prometheus 记录器并注册指标描述
///
/// 指标通过 `/actuator/prometheus` 端点输出，不再单独监听端口。
/// 记录器已被安装时（例如测试中多次初始化）返回 `None`。
pub fn init_metrics() -> Option<PrometheusHandle> {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            return None;
        }
    };

    describe_counter!(
        "proximashare_files_uploaded_total",
        "Total number of files uploaded, labelled by visibility"
    );
    describe_counter!(
        "proximashare_files_downloaded_total",
        "Total number of successful file downloads"
    );
    describe_counter!(
        "proximashare_files_expired_total",
        "Total number of expired files removed by the cleanup worker"
    );
    describe_counter!(
        "proximashare_http_requests_total",
        "Total number of HTTP requests, labelled by method and status"
    );

    describe_histogram!(
        "proximashare_http_request_duration_seconds",
        "HTTP request latency in seconds"
    );

    info!("Prometheus recorder installed");
    Some(handle)
}
