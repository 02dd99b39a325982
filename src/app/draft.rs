use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

/// Registers the session draft stamp at its well-known path, the
/// installable-session analog of the original page. Callers treat a
/// failure as log-and-continue; it is never surfaced to the user.
pub(crate) fn register(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create draft directory {}", parent.display()))?;
    }
    let stamp = json!({
        "app": "payrollui",
        "version": env!("CARGO_PKG_VERSION"),
        "state": "registered",
    });
    let body = serde_json::to_vec_pretty(&stamp).context("failed to encode draft stamp")?;
    fs::write(path, body)
        .with_context(|| format!("failed to write draft stamp {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_writes_the_stamp() {
        let dir = std::env::temp_dir().join("payrollui-draft-test");
        let path = dir.join("session.json");
        let _ = fs::remove_dir_all(&dir);
        register(&path).expect("registration");
        let body = fs::read_to_string(&path).expect("stamp readable");
        assert!(body.contains("registered"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn registration_failure_is_an_ordinary_error() {
        // A path under a file cannot be created; the caller logs this.
        let dir = std::env::temp_dir().join("payrollui-draft-blocked");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("test dir");
        let blocker = dir.join("blocker");
        fs::write(&blocker, b"x").expect("blocker file");
        let path = blocker.join("nested").join("session.json");
        assert!(register(&path).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
