//! Common test utilities for toolbelt tests

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory containing an executable script
pub fn create_script(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let script_path = dir.path().join(name);
    std::fs::write(&script_path, content).expect("Failed to write script");

    // Make script executable on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&script_path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script_path, perms).expect("Failed to set permissions");
    }

    (dir, script_path)
}

/// Script that writes to both streams and exits non-zero
pub const MIXED_OUTPUT_SCRIPT: &str = r#"#!/bin/sh
echo out
echo err 1>&2
exit 3
"#;

/// Script that emits a marker and then blocks for a long time
pub const SLOW_SCRIPT: &str = r#"#!/bin/sh
echo started
sleep 30
"#;

/// Script that ignores SIGTERM, for exercising the forced-kill path
pub const STUBBORN_SCRIPT: &str = r#"#!/bin/sh
trap '' TERM
echo stubborn
sleep 30
"#;
