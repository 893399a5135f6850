// Emulator launch — command-line construction and spawn.

use std::path::Path;
use std::process::Stdio;

use anyhow::Result;
use tokio::process::Command;
use tracing::debug;

use super::supervisor::EmulatorProcess;
use crate::config::LocalDbConfig;

/// Arguments passed to `java`, in the order the emulator documents them.
pub fn build_args(config: &LocalDbConfig) -> Vec<String> {
    let mut args = vec![
        "-Djava.library.path=DynamoDBLocal_lib".to_string(),
        "-jar".to_string(),
        "DynamoDBLocal.jar".to_string(),
        "-port".to_string(),
        config.port.to_string(),
    ];

    if config.in_memory {
        args.push("-inMemory".to_string());
    }
    if let Some(db_path) = &config.db_path {
        args.push("-dbPath".to_string());
        args.push(db_path.display().to_string());
    }
    if config.shared_db {
        args.push("-sharedDb".to_string());
    }
    args.extend(config.extra_args.iter().cloned());
    args
}

/// Spawn the emulator under `java_bin` with the unpack dir as working
/// directory. Output is discarded unless `debug` passes it through.
pub fn spawn_emulator(java_bin: &Path, config: &LocalDbConfig) -> Result<EmulatorProcess> {
    let args = build_args(config);
    debug!("launching {} {}", java_bin.display(), args.join(" "));

    let mut cmd = Command::new(java_bin);
    cmd.args(&args).current_dir(&config.unpack_dir);
    if config.debug {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }

    EmulatorProcess::spawn(cmd)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::build_args;
    use crate::config::LocalDbConfig;

    #[test]
    fn test_build_args_defaults() {
        let config = LocalDbConfig::default();
        let args = build_args(&config);
        assert_eq!(
            args,
            vec![
                "-Djava.library.path=DynamoDBLocal_lib",
                "-jar",
                "DynamoDBLocal.jar",
                "-port",
                "8000",
            ]
        );
    }

    #[test]
    fn test_build_args_in_memory_and_shared() {
        let config = LocalDbConfig {
            port: 9001,
            in_memory: true,
            shared_db: true,
            ..LocalDbConfig::default()
        };
        let args = build_args(&config);
        assert!(args.contains(&"-inMemory".to_string()));
        assert!(args.contains(&"-sharedDb".to_string()));
        assert!(args.windows(2).any(|w| w == ["-port", "9001"]));
    }

    #[test]
    fn test_build_args_db_path_and_extras() {
        let config = LocalDbConfig {
            db_path: Some(PathBuf::from("/tmp/ddb-data")),
            extra_args: vec!["-delayTransientStatuses".to_string()],
            ..LocalDbConfig::default()
        };
        let args = build_args(&config);
        assert!(args.windows(2).any(|w| w == ["-dbPath", "/tmp/ddb-data"]));
        // Forwarded args come last.
        assert_eq!(args.last().unwrap(), "-delayTransientStatuses");
    }
}
