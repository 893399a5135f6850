use std::path::PathBuf;

use serde::Deserialize;

/// Tarball published by AWS for the us-west-2 region. Other regional
/// mirrors are listed in the DynamoDB Local documentation.
pub const DEFAULT_DOWNLOAD_URL: &str =
    "https://s3.us-west-2.amazonaws.com/dynamodb-local/dynamodb_local_latest.tar.gz";

/// Port the emulator listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8000;

/// How long to wait for the emulator to answer on its port after spawn.
pub const REACHABLE_TIMEOUT_SECS: u64 = 3;

/// Delay between readiness probe attempts.
pub const REACHABLE_POLL_INTERVAL_MS: u64 = 100;

/// How long a stopped emulator gets to exit after SIGTERM before SIGKILL.
pub const KILL_WAIT_SECS: u64 = 5;

/// Default install root under the system temp directory.
pub fn default_unpack_dir() -> PathBuf {
    std::env::temp_dir().join("ddb_local")
}

/// Configuration for a local emulator instance.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalDbConfig {
    /// Where to download the distribution tarball from.
    pub source_url: String,
    /// Where to install the emulator. Reused across runs once populated.
    pub unpack_dir: PathBuf,
    /// If true, the emulator's stdout/stderr are passed through.
    pub debug: bool,
    /// Port for the emulator to listen on.
    pub port: u16,
    /// Keep all data in memory; lost on shutdown. Mutually exclusive with `db_path`.
    pub in_memory: bool,
    /// Directory where the emulator stores its database file. Defaults to the
    /// unpack dir when unset.
    pub db_path: Option<PathBuf>,
    /// Share one database file across all credentials and regions.
    pub shared_db: bool,
    /// Additional arguments forwarded to the emulator verbatim.
    pub extra_args: Vec<String>,
}

impl Default for LocalDbConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_DOWNLOAD_URL.to_string(),
            unpack_dir: default_unpack_dir(),
            debug: false,
            port: DEFAULT_PORT,
            in_memory: false,
            db_path: None,
            shared_db: false,
            extra_args: Vec::new(),
        }
    }
}
