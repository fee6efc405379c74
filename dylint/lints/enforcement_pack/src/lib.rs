//! Enforcement pack: Custom lints for request-guard invariants.
//!
//! The filter sees raw, attacker-controlled request parameters. Everything it
//! reports must go through a `LogSink` (or `tracing`) so that output stays
//! structured and carries the request id.
//!
//! ## Implemented Lints
//!
//! - `NO_PRINTLN`: Forbids println!, eprintln!, and dbg! macros in favor of
//!   `tracing` and `RequestLog`.

#![feature(rustc_private)]
#![warn(unused_extern_crates)]

extern crate rustc_ast;
extern crate rustc_lint;
extern crate rustc_session;
extern crate rustc_span;

use rustc_ast::{Expr, ExprKind, MacCall};
use rustc_lint::{EarlyContext, EarlyLintPass};
use rustc_session::{declare_lint_pass, declare_tool_lint};

declare_tool_lint! {
    /// **What it does:** Forbids use of `println!`, `eprintln!`, and `dbg!` macros in library code.
    ///
    /// **Why is this bad?** These macros bypass the configured log sink:
    /// - They write directly to stdout/stderr instead of the `LogSink`
    /// - They drop the `request_id` that correlates sanitization records
    /// - They can echo raw parameter values, where records only carry key names
    ///
    /// **Known problems:** None.
    ///
    /// **Example:**
    /// ```rust,ignore
    /// // Bad - bypasses the log sink
    /// println!("Sanitised GET - keys: {}", removed);
    /// eprintln!("destination rejected: {}", destination);
    /// dbg!(params);
    ///
    /// // Good - request-scoped, best-effort logging
    /// use request_guard::RequestLog;
    /// log.warn(format_args!("Sanitised GET - keys: {}", removed));
    /// ```
    pub enforcement_pack::NO_PRINTLN,
    Deny,
    "use of println!, eprintln!, or dbg! macros; use tracing or RequestLog instead"
}

declare_lint_pass!(NoPrintln => [NO_PRINTLN]);

impl EarlyLintPass for NoPrintln {
    fn check_expr(&mut self, cx: &EarlyContext<'_>, expr: &Expr) {
        if let ExprKind::MacCall(mac) = &expr.kind {
            check_macro(cx, mac, expr.span);
        }
    }
}

fn check_macro(cx: &EarlyContext<'_>, mac: &MacCall, span: rustc_span::Span) {
    let path = &mac.path;

    // Check if this is a single-segment macro call (println, eprintln, dbg)
    if path.segments.len() != 1 {
        return;
    }

    let macro_name = path.segments[0].ident.name.as_str();

    match macro_name {
        "println" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::info!` or `RequestLog` for structured logging");
                diag.note("`println!` bypasses the log sink and drops the request id");
            });
        }
        "eprintln" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::warn!` or `RequestLog` for structured logging");
                diag.note("`eprintln!` bypasses the log sink and drops the request id");
            });
        }
        "dbg" => {
            rustc_lint::LintContext::span_lint(cx, NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::debug!` for diagnostics");
                diag.note("`dbg!` can dump raw request parameters to stderr");
            });
        }
        _ => {}
    }
}

#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn register_lints(_sess: &rustc_session::Session, lint_store: &mut rustc_lint::LintStore) {
    lint_store.register_lints(&[&NO_PRINTLN]);
    lint_store.register_early_pass(|| Box::new(NoPrintln));
}

#[unsafe(no_mangle)]
pub fn dylint_version() -> *mut std::os::raw::c_char {
    std::ffi::CString::new(dylint_linting::DYLINT_VERSION)
        .expect("version string contains null byte")
        .into_raw()
}
