//! Overwrite policy against pre-existing variables and duplicate keys.

use dotenv::{Environment, MemoryEnv, ParseOptions};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{load_into, load_str};

fn existing() -> MemoryEnv {
    [("EXISTING", "original")].into_iter().collect()
}

#[test]
fn test_without_overwrite_existing_variable_is_kept() {
    let (report, env) = load_into("EXISTING=from-file\n", ParseOptions::default(), existing());

    assert_eq!(env.get("EXISTING").as_deref(), Some("original"));
    assert!(!report.entries[0].applied);
    assert_eq!(report.entries[0].value, "from-file");
}

#[test]
fn test_with_overwrite_source_value_wins() {
    let options = ParseOptions::default().overwrite(true);
    let (report, env) = load_into("EXISTING=from-file\n", options, existing());

    assert_eq!(env.get("EXISTING").as_deref(), Some("from-file"));
    assert!(report.entries[0].applied);
}

#[rstest]
#[case(false, "first")]
#[case(true, "second")]
fn test_duplicate_keys_follow_overwrite(#[case] overwrite: bool, #[case] expected: &str) {
    let options = ParseOptions::default().overwrite(overwrite);
    let (report, env) = load_str("KEY=first\nKEY=second\n", options);

    assert_eq!(report.entries.len(), 1);
    assert_eq!(env.get("KEY").as_deref(), Some(expected));
}

#[test]
fn test_redefinition_is_resolved_against_winning_value() {
    let options = ParseOptions::default().overwrite(true);
    let (_, env) = load_str("B=old\nA=${B}\nB=new\n", options);

    assert_eq!(env.get("A").as_deref(), Some("new"));
}

#[test]
fn test_local_definition_shadows_environment_for_references() {
    let (_, env) = load_into("EXISTING=file\nUSE=${EXISTING}\n", ParseOptions::default(), existing());

    // The file's binding is what other values see; registration alone
    // honours the overwrite switch.
    assert_eq!(env.get("USE").as_deref(), Some("file"));
    assert_eq!(env.get("EXISTING").as_deref(), Some("original"));
}
