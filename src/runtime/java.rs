use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A `java` binary that answered `-version`.
pub struct JavaRuntime {
    pub bin: PathBuf,
    /// Major version parsed from the version banner, when recognizable.
    pub major: Option<u32>,
}

/// Locate a working `java`.
///
/// `$JAVA_HOME/bin/java` wins when JAVA_HOME is set and the binary runs;
/// a broken JAVA_HOME logs a warning and falls back to `java` on PATH.
pub async fn resolve_java() -> Result<JavaRuntime> {
    if let Ok(java_home) = std::env::var("JAVA_HOME") {
        let candidate = PathBuf::from(&java_home).join("bin").join("java");
        match version_banner(&candidate).await {
            Ok(banner) => {
                info!("using java at [{}]", candidate.display());
                return Ok(runtime_from_banner(candidate, &banner));
            }
            Err(e) => {
                warn!(
                    "JAVA_HOME is set [{}] but java -version failed to run ({}); trying PATH",
                    java_home, e
                );
            }
        }
    }

    let candidate = PathBuf::from("java");
    match version_banner(&candidate).await {
        Ok(banner) => {
            info!("using java from PATH");
            Ok(runtime_from_banner(candidate, &banner))
        }
        Err(_) => {
            bail!("failed to execute java; either set JAVA_HOME or have java in PATH")
        }
    }
}

fn runtime_from_banner(bin: PathBuf, banner: &str) -> JavaRuntime {
    let major = parse_java_major(banner);
    match major {
        Some(major) => debug!("java major version {}", major),
        None => debug!("unrecognized java version banner: {}", banner),
    }
    JavaRuntime { bin, major }
}

/// Run `java -version` and return the first banner line (printed to stderr).
async fn version_banner(bin: &Path) -> Result<String> {
    let out = Command::new(bin).arg("-version").output().await?;
    if !out.status.success() {
        bail!("java -version exited with {}", out.status);
    }
    let text = String::from_utf8_lossy(&out.stderr);
    text.lines()
        .next()
        .map(|line| line.to_string())
        .ok_or_else(|| anyhow!("java -version produced no output"))
}

/// Pull the major version out of a `java -version` banner.
///
/// Handles the quoted form (`openjdk version "21.0.2" ...`), unquoted
/// builds (`openjdk 21.0.2 ...`), and the legacy `"1.8.0_x"` scheme.
pub fn parse_java_major(banner: &str) -> Option<u32> {
    let version = if let Some(quoted) = banner.split('"').nth(1) {
        quoted
    } else {
        banner
            .split_whitespace()
            .find(|tok| tok.chars().next().is_some_and(|c| c.is_ascii_digit()))?
    };

    let leading_number = |s: &str| -> Option<u32> {
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        s[..end].parse().ok()
    };

    if let Some(rest) = version.strip_prefix("1.") {
        // Legacy "1.8.0_402" form: the major is the second field.
        leading_number(rest.split('.').next()?)
    } else {
        leading_number(version.split('.').next()?)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_java_major;

    #[test]
    fn test_parse_modern_quoted() {
        assert_eq!(
            parse_java_major("openjdk version \"21.0.2\" 2024-01-16"),
            Some(21)
        );
    }

    #[test]
    fn test_parse_modern_unquoted() {
        assert_eq!(parse_java_major("openjdk 17.0.9 2023-10-17"), Some(17));
    }

    #[test]
    fn test_parse_legacy_1_8() {
        assert_eq!(parse_java_major("java version \"1.8.0_402\""), Some(8));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_java_major("not java"), None);
        assert_eq!(parse_java_major("openjdk version \"abc\""), None);
    }
}
