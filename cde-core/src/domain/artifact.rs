//! Log artifact location

use std::path::{Path, PathBuf};

use super::log_type::{path_segment, sanitize_log_type};

/// Default output root, relative to the working directory
pub const DEFAULT_OUTPUT_ROOT: &str = "logs";

/// Identity of one downloaded log artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    pub cluster_label: String,
    pub job_id: String,
    pub log_type: String,
}

impl ArtifactKey {
    pub fn new(
        cluster_label: impl Into<String>,
        job_id: impl Into<String>,
        log_type: impl Into<String>,
    ) -> Self {
        Self {
            cluster_label: cluster_label.into(),
            job_id: job_id.into(),
            log_type: log_type.into(),
        }
    }

    /// Directory that holds the artifact file
    ///
    /// Job id and log type each become exactly one path component.
    pub fn directory(&self, root: &Path) -> PathBuf {
        root.join(&self.cluster_label)
            .join(path_segment(&self.job_id))
            .join(sanitize_log_type(&self.log_type))
    }

    /// Full path of the artifact file
    ///
    /// `<root>/<cluster-label>/<job-id>/<sanitized-log-type>/<cluster-label>.log`
    pub fn path(&self, root: &Path) -> PathBuf {
        self.directory(root)
            .join(format!("{}.log", self.cluster_label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_layout() {
        let key = ArtifactKey::new("a_example_com", "7", "driver/stdout");
        assert_eq!(
            key.path(Path::new(DEFAULT_OUTPUT_ROOT)),
            PathBuf::from("logs/a_example_com/7/driver-stdout/a_example_com.log")
        );
    }

    #[test]
    fn test_path_is_deterministic() {
        let root = Path::new("out");
        let a = ArtifactKey::new("c_example_com", "42", "executor/stderr");
        let b = ArtifactKey::new("c_example_com", "42", "executor/stderr");
        assert_eq!(a.path(root), b.path(root));
    }

    #[test]
    fn test_dot_segments_stay_inside_job_directory() {
        let root = Path::new("logs");
        let parent = ArtifactKey::new("c", "1", "..").path(root);
        let current = ArtifactKey::new("c", "1", ".").path(root);
        let other_job = ArtifactKey::new("c", "2", "..").path(root);

        assert_eq!(parent, PathBuf::from("logs/c/1/__/c.log"));
        assert_ne!(parent, current);
        assert_ne!(parent, other_job);
        assert_eq!(
            ArtifactKey::new("c", "..", "driver/stdout").path(root),
            PathBuf::from("logs/c/__/driver-stdout/c.log")
        );
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let root = Path::new("out");
        let stdout = ArtifactKey::new("c", "1", "driver/stdout").path(root);
        let stderr = ArtifactKey::new("c", "1", "driver/stderr").path(root);
        let other_job = ArtifactKey::new("c", "2", "driver/stdout").path(root);
        let other_cluster = ArtifactKey::new("d", "1", "driver/stdout").path(root);

        assert_ne!(stdout, stderr);
        assert_ne!(stdout, other_job);
        assert_ne!(stdout, other_cluster);
    }
}
