//! Unit tests for session configuration.

use super::*;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct KeyDir {
    dir: TempDir,
}

impl KeyDir {
    fn with_key(&self, len: usize) -> PathBuf {
        let path = self.dir.path().join("session_key");
        std::fs::write(&path, vec![b'a'; len]).expect("write key file");
        path
    }

    fn missing(&self) -> PathBuf {
        self.dir.path().join("absent")
    }
}

#[fixture]
fn key_dir() -> KeyDir {
    KeyDir {
        dir: tempfile::tempdir().expect("temp dir"),
    }
}

fn settings(key_file: PathBuf) -> AppSettings {
    AppSettings {
        bind_addr: None,
        database_path: None,
        pool_max_size: None,
        session_key_file: Some(key_file),
        cookie_secure: true,
        same_site: None,
        allow_ephemeral_session_key: false,
        admin_username: None,
        admin_password: None,
    }
}

#[rstest]
fn key_file_is_loaded(key_dir: KeyDir) {
    let path = key_dir.with_key(SESSION_KEY_MIN_LEN);

    let session = session_settings(&settings(path), BuildMode::Release).expect("valid config");
    assert!(session.cookie_secure);
    assert_eq!(session.same_site, SameSite::Lax);
    assert_eq!(session.key.master(), Key::derive_from(&[b'a'; 64]).master());
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn short_key_is_rejected(key_dir: KeyDir, #[case] mode: BuildMode) {
    let path = key_dir.with_key(SESSION_KEY_MIN_LEN - 1);

    let err = session_settings(&settings(path), mode)
        .err()
        .expect("short key");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 63, min_len: 64, .. }
    ));
}

#[rstest]
fn missing_key_without_allowance_fails(key_dir: KeyDir) {
    let err = session_settings(&settings(key_dir.missing()), BuildMode::Debug)
        .err()
        .expect("missing key");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn missing_key_with_allowance_is_ephemeral_in_debug(key_dir: KeyDir) {
    let mut config = settings(key_dir.missing());
    config.allow_ephemeral_session_key = true;

    let first = session_settings(&config, BuildMode::Debug).expect("ephemeral key");
    let second = session_settings(&config, BuildMode::Debug).expect("ephemeral key");
    assert_ne!(first.key.master(), second.key.master());
}

#[rstest]
fn release_refuses_ephemeral_allowance(key_dir: KeyDir) {
    let mut config = settings(key_dir.with_key(SESSION_KEY_MIN_LEN));
    config.allow_ephemeral_session_key = true;

    let err = session_settings(&config, BuildMode::Release)
        .err()
        .expect("allowance refused");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
#[case(Some("Strict"), true, SameSite::Strict)]
#[case(Some("lax"), false, SameSite::Lax)]
#[case(Some("NONE"), true, SameSite::None)]
#[case(None, false, SameSite::Lax)]
fn same_site_parsing(
    #[case] value: Option<&str>,
    #[case] secure: bool,
    #[case] expected: SameSite,
) {
    assert_eq!(parse_same_site(value, secure).expect("valid"), expected);
}

#[rstest]
fn same_site_none_requires_secure_cookie() {
    let err = parse_same_site(Some("none"), false).expect_err("insecure");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn unknown_same_site_is_rejected() {
    let err = parse_same_site(Some("sometimes"), true).expect_err("unknown");
    assert!(matches!(err, SessionConfigError::InvalidSameSite { .. }));
}
