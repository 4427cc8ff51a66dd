use std::path::Path;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("OCR executable not found at {0}")]
    NotFound(String),
    #[error("OCR executable failed to run: {0}")]
    Failed(String),
}

/// Confirm the configured OCR binary is installed and runnable.
///
/// Called once at startup, before any image is touched. A concrete path
/// (anything with a directory component) must exist on disk; a bare command
/// name is resolved through `PATH` by the spawn itself. The binary must then
/// exit successfully when invoked with `--version`.
///
/// Returns a human-readable confirmation message including the version line
/// the engine reported.
pub fn verify_install(exe: &Path) -> Result<String, VerifyError> {
    if exe.components().count() > 1 && !exe.exists() {
        return Err(VerifyError::NotFound(exe.display().to_string()));
    }

    let output = Command::new(exe).arg("--version").output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VerifyError::NotFound(exe.display().to_string())
        } else {
            VerifyError::Failed(e.to_string())
        }
    })?;

    if !output.status.success() {
        return Err(VerifyError::Failed(format!(
            "`{} --version` exited with {}: {}",
            exe.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // Tesseract prints its version banner on stdout or stderr depending on
    // the release; take whichever has content.
    let banner = if output.stdout.is_empty() { &output.stderr } else { &output.stdout };
    let version_line = String::from_utf8_lossy(banner)
        .lines()
        .next()
        .unwrap_or("unknown version")
        .trim()
        .to_string();

    Ok(format!("OCR engine is properly installed ({version_line})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_absolute_path_is_not_found() {
        let exe = PathBuf::from("/definitely/not/here/tesseract");
        match verify_install(&exe) {
            Err(VerifyError::NotFound(p)) => assert!(p.contains("tesseract")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_bare_command_is_not_found() {
        let exe = PathBuf::from("receiptscan-no-such-binary");
        assert!(matches!(verify_install(&exe), Err(VerifyError::NotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn working_binary_reports_version_line() {
        // `true` exits 0 and prints nothing; message falls back to a stub.
        let msg = verify_install(Path::new("/bin/true")).unwrap();
        assert!(msg.contains("properly installed"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_binary_is_reported() {
        assert!(matches!(
            verify_install(Path::new("/bin/false")),
            Err(VerifyError::Failed(_))
        ));
    }
}
