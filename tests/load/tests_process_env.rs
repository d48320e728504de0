//! Loading into the real process environment.
//!
//! These tests mutate global state, so they run serially and use key names
//! no other test touches.

use std::io::Write;

use dotenv::{Error, Loader, ParseOptions, Parser, ProcessEnv};
use serial_test::serial;
use tempfile::NamedTempFile;

fn dotenv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_load_sets_process_variables() {
    temp_env::with_vars_unset(["DOTENV_T_HOST", "DOTENV_T_URL"], || {
        let file = dotenv_file("DOTENV_T_HOST=db.local\nDOTENV_T_URL=postgres://${DOTENV_T_HOST}/app\n");

        let report = dotenv::from_path(file.path()).unwrap();

        assert!(report.is_clean());
        assert_eq!(std::env::var("DOTENV_T_HOST").unwrap(), "db.local");
        assert_eq!(std::env::var("DOTENV_T_URL").unwrap(), "postgres://db.local/app");
    });
}

#[test]
#[serial]
fn test_existing_process_variable_is_kept_without_overwrite() {
    temp_env::with_var("DOTENV_T_KEEP", Some("from-shell"), || {
        let file = dotenv_file("DOTENV_T_KEEP=from-file\n");

        let report = Loader::new().path(file.path()).load().unwrap();

        assert!(!report.entries[0].applied);
        assert_eq!(std::env::var("DOTENV_T_KEEP").unwrap(), "from-shell");
    });
}

#[test]
#[serial]
fn test_existing_process_variable_is_replaced_with_overwrite() {
    temp_env::with_var("DOTENV_T_REPLACE", Some("from-shell"), || {
        let file = dotenv_file("DOTENV_T_REPLACE=from-file\n");

        Loader::new().path(file.path()).overwrite(true).load().unwrap();

        assert_eq!(std::env::var("DOTENV_T_REPLACE").unwrap(), "from-file");
    });
}

#[test]
#[serial]
fn test_process_variables_feed_interpolation() {
    temp_env::with_vars(
        [("DOTENV_T_BASE", Some("/opt/app")), ("DOTENV_T_BIN", None)],
        || {
            let report = Parser::new()
                .parse("DOTENV_T_BIN=${DOTENV_T_BASE}/bin\n", ParseOptions::default(), &mut ProcessEnv)
                .unwrap();

            assert!(report.is_clean());
            assert_eq!(std::env::var("DOTENV_T_BIN").unwrap(), "/opt/app/bin");
            // External variables are read, never rewritten.
            assert_eq!(report.entries.len(), 1);
            assert_eq!(std::env::var("DOTENV_T_BASE").unwrap(), "/opt/app");
        },
    );
}

#[test]
#[serial]
fn test_syntax_error_registers_nothing() {
    temp_env::with_var_unset("DOTENV_T_NEVER", || {
        let file = dotenv_file("DOTENV_T_NEVER=1\nnot a definition\n");

        let err = dotenv::from_path(file.path()).unwrap_err();

        assert!(matches!(err, Error::Syntax(_)));
        assert!(std::env::var_os("DOTENV_T_NEVER").is_none());
    });
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_utf8_process_variable_is_not_undefined() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let raw = OsStr::from_bytes(b"caf\xe9");
    temp_env::with_vars(
        [("DOTENV_T_LATIN1", Some(raw)), ("DOTENV_T_MENU", None)],
        || {
            let report = Parser::new()
                .parse("DOTENV_T_MENU=${DOTENV_T_LATIN1}\n", ParseOptions::default(), &mut ProcessEnv)
                .unwrap();

            assert!(report.is_clean());
            assert_eq!(report.get("DOTENV_T_MENU"), Some("caf\u{FFFD}"));
        },
    );
}

#[test]
fn test_missing_file() {
    let err = dotenv::from_path("/definitely/not/here/.env").unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}
