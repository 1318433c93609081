//! JSON output formatting

use std::io;
use std::path::PathBuf;

use serde::Serialize;

use crate::find::FindMatch;
use crate::outline::Outline;

/// Per-document result for `--json` output.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<FindMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentReport {
    pub fn failed(path: PathBuf, error: impl ToString) -> Self {
        Self {
            path,
            outline: None,
            matches: None,
            error: Some(error.to_string()),
        }
    }
}

/// Print any serializable value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
