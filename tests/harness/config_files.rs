//! Suite and configuration files

use std::fs;

use respcheck::{Error, HarnessConfig, Suite, ADDR_ENV, CONFIG_FILE_NAME};

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        "addr = \"10.0.0.5:6379\"\nreset_command = \"FLUSHALL\"\n",
    )
    .unwrap();

    let config = HarnessConfig::from_file(&path).unwrap();
    // RESPCHECK_ADDR, when set, takes precedence over the file.
    if std::env::var_os(ADDR_ENV).is_none() {
        assert_eq!(config.addr, "10.0.0.5:6379");
    }
    assert_eq!(config.reset_command, "FLUSHALL");
    assert_eq!(config.read_timeout_ms, HarnessConfig::default().read_timeout_ms);
}

#[test]
fn unknown_config_key_is_rejected() {
    let result = HarnessConfig::from_toml_str("adress = \"x\"\n");
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn unequal_sequences_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(
        &path,
        r#"
name = "broken"

[[case]]
name = "short delays"
cmds = ["HSET k f v", "HSTRLEN k f"]
expect = [{ integer = 1 }, { integer = 1 }]
delays_ms = [0]
"#,
    )
    .unwrap();

    match Suite::from_file(&path) {
        Err(Error::InvalidCase { case, reason }) => {
            assert_eq!(case, "short delays");
            assert!(reason.contains("2 commands"), "reason: {}", reason);
        }
        other => panic!("Expected InvalidCase, got {:?}", other),
    }
}

#[test]
fn missing_suite_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Suite::from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn blank_case_name_is_rejected() {
    let result = Suite::from_toml_str(
        r#"
name = "hstrlen"

[[case]]
name = ""
cmds = ["HSTRLEN k f"]
expect = [{ integer = 0 }]
"#,
    );
    assert!(matches!(result, Err(Error::InvalidCase { .. })));
}
