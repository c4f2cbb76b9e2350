//! Cluster target domain type

use url::Url;

use crate::error::CoreError;

/// A CDE virtual cluster endpoint and the label derived from it
///
/// The label is the endpoint's hostname with every `.` replaced by `_`,
/// which makes it safe to use as a directory and file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterTarget {
    url: String,
    label: String,
}

impl ClusterTarget {
    /// Parse an endpoint URL and derive its label
    ///
    /// # Errors
    /// Returns an error if the URL is malformed or has no hostname.
    pub fn parse(url: &str) -> Result<Self, CoreError> {
        let parsed = Url::parse(url).map_err(|e| CoreError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| CoreError::MissingHost(url.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            label: cluster_label(host),
        })
    }

    /// The endpoint exactly as supplied
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Filesystem-safe label for output paths and log messages
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for ClusterTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.url, self.label)
    }
}

/// Turn a hostname into a cluster label
pub fn cluster_label(host: &str) -> String {
    host.replace('.', "_")
}
