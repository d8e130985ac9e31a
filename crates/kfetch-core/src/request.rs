//! Request configuration resolved from command-line flags.

use std::path::PathBuf;

/// Output path used when `-f` is not given and the config file sets none.
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";

/// HTTP method used when `-m` is not given and the config file sets none.
pub const DEFAULT_METHOD: &str = "GET";

/// Everything needed to perform one request. Built once at startup and
/// consumed by a single transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// Target URL, passed to libcurl untouched.
    pub url: String,
    /// File receiving the response body (created or truncated).
    pub output_path: PathBuf,
    /// Request method sent as-is (`CURLOPT_CUSTOMREQUEST`).
    pub method: String,
    /// Optional request body (`CURLOPT_POSTFIELDS`).
    pub body: Option<String>,
    /// Raw `Name: value` header lines, in the order given. Duplicates are kept.
    pub headers: Vec<String>,
    /// Optional CA bundle overriding the system trust store.
    pub ca_path: Option<PathBuf>,
}

impl RequestConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            method: DEFAULT_METHOD.to_string(),
            body: None,
            headers: Vec::new(),
            ca_path: None,
        }
    }

    /// True for `HEAD`, which libcurl must be told not to expect a body for.
    pub fn is_head(&self) -> bool {
        self.method.eq_ignore_ascii_case("HEAD")
    }
}
