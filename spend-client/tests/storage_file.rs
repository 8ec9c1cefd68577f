mod common;

use common::{grants, login_response};
use spend_client::storage::{ColorScheme, Preferences, keys};
use spend_client::{ClientConfig, Console, FileStorage, Storage};
use tempfile::TempDir;

fn console_in(dir: &TempDir) -> anyhow::Result<Console> {
    let config = ClientConfig::new("http://localhost:8080").with_storage_dir(dir.path());
    Ok(Console::new(config)?)
}

#[tokio::test]
async fn test_session_survives_restart() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let console = console_in(&temp_dir)?;
    console
        .session()
        .login(&login_response(grants(&[(1, "users", "view")])))?;
    drop(console);

    let console = console_in(&temp_dir)?;
    let session = console.session();
    assert!(session.is_authenticated());
    assert_eq!(session.role().as_deref(), Some("super_admin"));
    assert_eq!(session.username().as_deref(), Some("Avery Stone"));
    assert!(session.has_permission("users", "view"));
    Ok(())
}

#[tokio::test]
async fn test_secure_keys_are_not_plain_text() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let console = console_in(&temp_dir)?;
    console.session().login(&login_response(Vec::new()))?;

    let raw = FileStorage::open(temp_dir.path(), "local-storage")?;
    assert_eq!(raw.get(keys::TOKEN).as_deref(), Some("token-abc"));
    assert_ne!(raw.get(keys::ROLE).as_deref(), Some("super_admin"));
    let content = std::fs::read_to_string(raw.file_path())?;
    assert!(!content.contains("avery@smartspend.test"));
    Ok(())
}

#[tokio::test]
async fn test_preferences_survive_logout() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let console = console_in(&temp_dir)?;
    console.session().login(&login_response(Vec::new()))?;
    console.save_preferences(&Preferences {
        dark_mode: true,
        color_scheme: ColorScheme::Green,
    })?;

    console.session().sign_out();
    drop(console);

    let console = console_in(&temp_dir)?;
    assert!(!console.session().is_authenticated());
    let preferences = console.preferences();
    assert!(preferences.dark_mode);
    assert_eq!(preferences.color_scheme, ColorScheme::Green);
    Ok(())
}
