//! Request filter demonstration.
//!
//! This example shows how a web integration uses request-guard:
//! 1. Build the filter once at startup
//! 2. Decode each request into a context
//! 3. Strip reserved keys from every parameter source
//! 4. Reject tainted redirect destinations
//!
//! Run with: `cargo run --example request_filter_flow`

use request_guard::web::{guard_request, RequestAdapter};
use request_guard::RequestFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let filter = RequestFilter::builder().build();

    let requests = [
        ("req-0001", "page=2&sort=title", ""),
        ("req-0002", "name[%23post_render][]=passthru&name[%23markup]=id", ""),
        (
            "req-0003",
            "destination=node%3Fq%5B%2523post_render%5D%5B%5D%3Dpassthru",
            "",
        ),
        ("req-0004", "destination=node%2F7%3Ftab%3Dedit", "title=Hello"),
    ];

    for (id, query, body) in requests {
        let mut adapter = RequestAdapter::new(id);
        adapter.set_query_string(query);
        adapter.set_form_body(body);

        let guarded = guard_request(&filter, &adapter);

        tracing::info!(
            request_id = %guarded.context.request_id(),
            removed = guarded.outcome.report.total_removed(),
            destination_removed = guarded.outcome.destination_removed,
            remaining = ?guarded.context.params().merged.keys().collect::<Vec<_>>(),
            "request filtered"
        );
    }
}
