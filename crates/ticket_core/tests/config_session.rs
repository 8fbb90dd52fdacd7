use std::fs;
use std::path::PathBuf;
use ticket_core::config::{DEFAULT_DATA_FILE, DEFAULT_LOCK_PORT};
use ticket_core::{default_log_level, AppConfig, AppSession, ConfigError, SessionError};

#[test]
fn missing_config_file_yields_defaults_next_to_it() {
    let dir = tempfile::tempdir().unwrap();

    let config = AppConfig::load(dir.path().join("app.properties")).unwrap();

    assert_eq!(config.data_file, dir.path().join(DEFAULT_DATA_FILE));
    assert_eq!(config.lock_port, DEFAULT_LOCK_PORT);
    assert_eq!(config.log_level, default_log_level());
    assert_eq!(config.log_dir, dir.path().join("logs"));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(
        &path,
        "data_file=data/ticket.properties\nlock_port=40000\nlog_level=WARN\n\
         log_dir=/var/log/ticket\nlnf=windows\n",
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.data_file, dir.path().join("data/ticket.properties"));
    assert_eq!(config.lock_port, 40000);
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.log_dir, PathBuf::from("/var/log/ticket"));
}

#[test]
fn warning_is_accepted_as_log_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(&path, "log_level=warning\n").unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.log_level, "warn");
}

#[test]
fn legacy_keys_fill_data_file_and_lock_port() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(
        &path,
        "lnf=windows\nruta_favicon=img/favicon.png\n\
         fichero_datos=datos/loteria.prp\npuerto_bloqueo=54400\n",
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.data_file, dir.path().join("datos/loteria.prp"));
    assert_eq!(config.lock_port, 54400);
    assert!(config.unknown_keys.is_empty());
}

#[test]
fn current_keys_win_over_legacy_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(
        &path,
        "fichero_datos=old.prp\ndata_file=new.properties\n\
         puerto_bloqueo=54400\nlock_port=40001\nunused_key=1\n",
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.data_file, dir.path().join("new.properties"));
    assert_eq!(config.lock_port, 40001);
    assert_eq!(config.unknown_keys, vec!["unused_key".to_string()]);
}

#[test]
fn malformed_config_values_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.properties");

    fs::write(&path, "lock_port=seventy\n").unwrap();
    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "lock_port",
            ..
        }
    ));

    fs::write(&path, "log_level=chatty\n").unwrap();
    let err = AppConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("log_level"));
}

#[test]
fn session_is_exclusive_until_released() {
    let first = AppSession::acquire(0).unwrap();
    let port = first.port();
    assert_ne!(port, 0);

    let err = AppSession::acquire(port).unwrap_err();
    assert!(matches!(err, SessionError::AlreadyRunning { port: p } if p == port));

    first.release();
    let second = AppSession::acquire(port).unwrap();
    assert_eq!(second.port(), port);
}
