// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 记录每个请求的方法、状态码和耗时
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        "proximashare_http_requests_total",
        "method" => method.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("proximashare_http_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());

    response
}
