//! Helpers for running the loader against an in-memory environment.

use dotenv::{Diagnostic, ErrorCode, MemoryEnv, ParseOptions, Parser, Report};

/// Parse `source` into an empty in-memory environment.
pub fn load_str(source: &str, options: ParseOptions) -> (Report, MemoryEnv) {
    load_into(source, options, MemoryEnv::new())
}

/// Parse `source` into `env`, returning the report and the resulting env.
pub fn load_into(source: &str, options: ParseOptions, mut env: MemoryEnv) -> (Report, MemoryEnv) {
    let report = Parser::new()
        .parse(source, options, &mut env)
        .unwrap_or_else(|e| panic!("expected {source:?} to load, got: {e}"));
    (report, env)
}

/// Keys of every diagnostic with `code`, in report order.
pub fn keys_with_code(diagnostics: &[Diagnostic], code: ErrorCode) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.code == code)
        .filter_map(|d| d.key.as_ref().map(|k| k.to_string()))
        .collect()
}

/// Assert a report has no diagnostics.
pub fn assert_no_diagnostics(report: &Report) {
    assert!(
        report.is_clean(),
        "Expected no diagnostics, got {}:\n{}",
        report.diagnostics.len(),
        report
            .diagnostics
            .iter()
            .map(|d| format!("  {d}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
