use serde::{Deserialize, Serialize};

pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PORT: &str = "22";

/// One `Host` block of the SSH config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub host: String,
    pub hostname: String,
    pub user: Option<String>,
    pub port: Option<String>,
    pub identity_file: Option<String>,
}

/// Input to `HostManager::add`. `None` fields get the defaults,
/// `Some("")` is kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHost {
    pub host: String,
    pub hostname: String,
    pub user: Option<String>,
    pub port: Option<String>,
    pub identity_file: Option<String>,
}

impl NewHost {
    pub fn new(host: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn identity_file(mut self, identity_file: impl Into<String>) -> Self {
        self.identity_file = Some(identity_file.into());
        self
    }

    pub(crate) fn into_record(self) -> HostRecord {
        HostRecord {
            host: self.host,
            hostname: self.hostname,
            user: Some(self.user.unwrap_or_else(|| DEFAULT_USER.to_string())),
            port: Some(self.port.unwrap_or_else(|| DEFAULT_PORT.to_string())),
            identity_file: self.identity_file,
        }
    }
}
