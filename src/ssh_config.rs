use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::models::HostRecord;

/// Parse the whole SSH config text into records, in file order.
///
/// Blocks are groups of non-blank lines separated by blank lines. A block
/// whose first line is not a `Host <name>` line is skipped. Unknown keys are
/// ignored. Nothing here fails: odd input yields partial records.
pub fn parse_all(content: &str) -> Vec<HostRecord> {
    let mut records = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    // The trailing empty line flushes the last block
    for line in content.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !block.is_empty() {
                if let Some(record) = parse_block(&block) {
                    records.push(record);
                }
                block.clear();
            }
        } else {
            block.push(line);
        }
    }

    records
}

fn parse_block(block: &[&str]) -> Option<HostRecord> {
    let (first, rest) = block.split_first()?;

    let Some(host) = parse_host_line(first) else {
        tracing::warn!("Skipping block without a Host line: {:?}", first);
        return None;
    };

    let mut record = HostRecord {
        host,
        hostname: String::new(),
        user: None,
        port: None,
        identity_file: None,
    };

    for line in rest {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = match line.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim_start()),
            None => (line, ""),
        };
        let value = (!value.is_empty()).then(|| value.to_string());

        match key.to_lowercase().as_str() {
            "hostname" => record.hostname = value.unwrap_or_default(),
            "user" => record.user = value,
            "port" => record.port = value,
            "identityfile" => record.identity_file = value,
            _ => tracing::debug!("Ignoring key {:?} for host {:?}", key, record.host),
        }
    }

    Some(record)
}

// `Host <name>`: keyword is case-insensitive, the name is everything after
// the first separator character.
fn parse_host_line(line: &str) -> Option<String> {
    let line = line.trim_start();
    let keyword = line.get(..4)?;
    if !keyword.eq_ignore_ascii_case("host") {
        return None;
    }

    let mut rest = line[4..].chars();
    match rest.next() {
        Some(c) if c.is_whitespace() => Some(rest.as_str().to_string()),
        _ => None,
    }
}

/// Render records as SSH config text, sorted by host.
pub fn serialize_all(records: &[HostRecord]) -> String {
    let mut sorted: Vec<&HostRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.host.cmp(&b.host));

    let mut out = String::new();
    for record in sorted {
        out.push_str(&format!("Host {}\n", record.host));
        push_optional(&mut out, "HostName", Some(record.hostname.as_str()));
        push_optional(&mut out, "User", record.user.as_deref());
        push_optional(&mut out, "Port", record.port.as_deref());
        push_optional(&mut out, "IdentityFile", record.identity_file.as_deref());
        out.push('\n');
    }
    out
}

fn push_optional(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        out.push_str(&format!("  {} {}\n", key, value));
    }
}

const MAX_SYMLINK_HOPS: usize = 40;

// Follow the link chain by hand: unlike `canonicalize` this also works when
// the final target does not exist yet.
fn resolve_symlinks(path: &Path) -> PathBuf {
    let mut target = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        let Ok(link) = fs::read_link(&target) else {
            break;
        };
        target = match target.parent() {
            Some(parent) if link.is_relative() => parent.join(link),
            _ => link,
        };
    }
    target
}

/// The SSH client config file, re-read on every call.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> Result<Vec<HostRecord>> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => Error::NotUtf8 {
                path: self.path.clone(),
            },
            _ => self.io_error(e),
        })?;
        let records = parse_all(&content);

        tracing::debug!("Parsed {} hosts from {:?}", records.len(), self.path);
        Ok(records)
    }

    /// Replace the whole file with `records`.
    ///
    /// The new content is written to a temp file next to the target and
    /// renamed over it, so readers see either the old or the new file.
    pub fn write_all(&self, records: &[HostRecord]) -> Result<()> {
        let content = serialize_all(records);

        // Write through a symlinked config instead of replacing the link
        let target = resolve_symlinks(&self.path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        if let Ok(meta) = fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.io_error(e))?;
        }
        tmp.write_all(content.as_bytes())
            .map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&target).map_err(|e| self.io_error(e.error))?;

        tracing::info!("Wrote {} hosts to {:?}", records.len(), target);
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}
