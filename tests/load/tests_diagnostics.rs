//! Recovered and fatal problems reported by a load.

use dotenv::{Environment, Error, ErrorCode, MemoryEnv, ParseOptions, Parser, Position};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{keys_with_code, load_str};
use crate::helpers::source_fixtures::{CYCLE_WITH_BYSTANDERS, THREE_CYCLE, UNDEFINED};

#[test]
fn test_three_cycle_reports_each_key_once() {
    let (report, env) = load_str(THREE_CYCLE, ParseOptions::default());

    let circular = keys_with_code(&report.diagnostics, ErrorCode::E0202);
    assert_eq!(circular.len(), 3);
    for key in ["A", "B", "C"] {
        assert!(circular.contains(&key.to_string()), "missing {key} in {circular:?}");
        assert_eq!(env.get(key).as_deref(), Some(""));
    }
    assert_eq!(report.diagnostics.len(), 3);
    assert_eq!(report.stats.stalls, 1);
}

#[test]
fn test_cycle_does_not_block_other_keys() {
    let (report, env) = load_str(CYCLE_WITH_BYSTANDERS, ParseOptions::default());

    assert_eq!(
        keys_with_code(&report.diagnostics, ErrorCode::E0202),
        ["LOOP_B", "LOOP_A"]
    );
    assert_eq!(env.get("GOOD").as_deref(), Some("fine"));
    assert_eq!(env.get("USES_GOOD").as_deref(), Some("fine!"));
    assert_eq!(env.get("LOOP_A").as_deref(), Some(""));
}

#[test]
fn test_undefined_variable_expands_to_empty() {
    let (report, env) = load_str(UNDEFINED, ParseOptions::default());

    assert_eq!(keys_with_code(&report.diagnostics, ErrorCode::E0201), ["MISSING"]);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].position, Position::new(0, 2));
    assert_eq!(env.get("A").as_deref(), Some(""));
}

#[test]
fn test_every_undefined_occurrence_is_reported() {
    let (report, env) = load_str("A=$NOPE-$NOPE\nB=${ALSO_NOPE}\n", ParseOptions::default());

    assert_eq!(
        keys_with_code(&report.diagnostics, ErrorCode::E0201),
        ["NOPE", "NOPE", "ALSO_NOPE"]
    );
    assert_eq!(env.get("A").as_deref(), Some("-"));
}

#[test]
fn test_undefined_and_circular_are_batched_in_order() {
    let (report, _) = load_str("A=${MISSING}${B}\nB=${A}\n", ParseOptions::default());

    let codes: Vec<_> = report.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E0201, ErrorCode::E0202, ErrorCode::E0202]);
}

#[rstest]
#[case("NOEQUALS\n", ErrorCode::E0102)]
#[case("9LIVES=cat\n", ErrorCode::E0101)]
#[case("A=\"open\n", ErrorCode::E0103)]
#[case("A='x' trailing\n", ErrorCode::E0104)]
fn test_syntax_errors_are_fatal(#[case] source: &str, #[case] code: ErrorCode) {
    let mut env = MemoryEnv::new();
    let err = Parser::new()
        .parse(&format!("GOOD=1\n{source}"), ParseOptions::default(), &mut env)
        .unwrap_err();

    assert!(matches!(err, Error::Syntax(_)));
    assert_eq!(err.diagnostics()[0].code, code);
    // Nothing is registered when the source is malformed.
    assert!(env.is_empty());
}

#[test]
fn test_syntax_error_lists_every_bad_line() {
    let err = Parser::new()
        .parse("BAD ONE\nOK=1\n2BAD=x\n", ParseOptions::default(), &mut MemoryEnv::new())
        .unwrap_err();

    let lines: Vec<_> = err.diagnostics().iter().map(|d| d.position.line).collect();
    assert_eq!(lines, [0, 2]);
}

#[test]
fn test_diagnostics_do_not_leak_between_parses() {
    let mut parser = Parser::new();
    let mut env = MemoryEnv::new();

    let _ = parser.parse("BROKEN\n", ParseOptions::default(), &mut env);
    let report = parser
        .parse("A=1\n", ParseOptions::default(), &mut env)
        .unwrap();

    assert!(report.is_clean());
}
