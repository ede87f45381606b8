//! Import/export of hosts as `host,hostname,user,port` lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::manager::HostManager;
use crate::models::{HostRecord, NewHost};

pub fn format_line(record: &HostRecord) -> String {
    format!(
        "{},{},{},{}",
        record.host,
        record.hostname,
        record.user.as_deref().unwrap_or_default(),
        record.port.as_deref().unwrap_or_default()
    )
}

pub fn export_lines(records: &[HostRecord]) -> Vec<String> {
    records.iter().map(format_line).collect()
}

/// Parse one import line. Blank lines give `Ok(None)`.
///
/// Trailing empty fields are dropped, so `a,b,,` omits user and port (and
/// the defaults apply), while `a,b,,2222` keeps an empty user.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<NewHost>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    let (host, hostname) = match fields.as_slice() {
        [host, hostname, ..] if !host.is_empty() && !hostname.is_empty() => (*host, *hostname),
        _ => {
            return Err(Error::MalformedImportLine {
                line: line_no,
                content: line.to_string(),
            })
        }
    };

    let mut new_host = NewHost::new(host, hostname);
    if let Some(user) = fields.get(2) {
        new_host = new_host.user(*user);
    }
    if let Some(port) = fields.get(3) {
        new_host = new_host.port(*port);
    }
    Ok(Some(new_host))
}

/// Force-add every line of `path`, calling `on_added` after each commit.
///
/// Stops at the first failure, including one returned by `on_added`. Hosts
/// committed before it stay in the file.
pub fn import_file(
    manager: &HostManager,
    path: &Path,
    mut on_added: impl FnMut(&HostRecord) -> io::Result<()>,
) -> Result<usize> {
    let import_error = |source| Error::Import {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(import_error)?;
    let mut imported = 0;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(import_error)?;
        let Some(new_host) = parse_line(&line, index + 1)? else {
            continue;
        };

        let record = manager.add(new_host, true)?;
        on_added(&record).map_err(Error::Output)?;
        imported += 1;
    }

    tracing::info!("Imported {} hosts from {:?}", imported, path);
    Ok(imported)
}
