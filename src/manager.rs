use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{HostRecord, NewHost};
use crate::ssh_config::ConfigStore;

/// Record operations on top of the config file. Every call re-reads the
/// file; every mutation rewrites it whole.
#[derive(Debug, Clone)]
pub struct HostManager {
    store: ConfigStore,
}

impl HostManager {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Records in file order. Not sorted: the file may have been hand-edited.
    pub fn list(&self) -> Result<Vec<HostRecord>> {
        let records = self.store.read_all()?;

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.host.as_str()) {
                tracing::warn!("Duplicate host found in SSH config: {}", record.host);
            }
        }

        Ok(records)
    }

    pub fn find_by_host(&self, host: &str) -> Result<Option<HostRecord>> {
        Ok(self.list()?.into_iter().find(|r| r.host == host))
    }

    /// Insert a host, applying the `root`/`22` defaults for omitted fields.
    ///
    /// Empty or blank `host`/`hostname` is rejected before the file is read.
    /// Without `force` an existing host is an error and the file is left
    /// untouched. With `force` every record for that host is replaced, so
    /// this is also the modify path.
    pub fn add(&self, new_host: NewHost, force: bool) -> Result<HostRecord> {
        if new_host.host.trim().is_empty() || new_host.hostname.trim().is_empty() {
            return Err(Error::InvalidHost {
                host: new_host.host,
                hostname: new_host.hostname,
            });
        }

        let mut records = self.list()?;

        if !force && records.iter().any(|r| r.host == new_host.host) {
            tracing::warn!("Refusing to overwrite existing host {}", new_host.host);
            return Err(Error::DuplicateHost(new_host.host));
        }

        let record = new_host.into_record();
        if let Some(port) = &record.port {
            if port.parse::<u16>().is_err() {
                tracing::warn!("Port {:?} for host {} is not a valid port", port, record.host);
            }
        }

        let before = records.len();
        records.retain(|r| r.host != record.host);
        if records.len() != before {
            tracing::info!("Replacing existing host {}", record.host);
        }

        records.push(record.clone());
        self.store.write_all(&records)?;

        tracing::info!("Added host {} -> {}", record.host, record.hostname);
        Ok(record)
    }

    /// Remove every record for `host`. Returns how many were removed; an
    /// absent host is not an error.
    pub fn delete(&self, host: &str) -> Result<usize> {
        let mut records = self.list()?;

        let before = records.len();
        records.retain(|r| r.host != host);
        let removed = before - records.len();

        self.store.write_all(&records)?;

        tracing::info!("Deleted {} record(s) for host {}", removed, host);
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.write_all(&[])
    }
}
