//! Configuration system for j2k.
//!
//! Loads config from:
//! 1. Global: ~/.config/j2k/config.toml
//! 2. Per-project: .j2k/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [render]
//! comments = "discard"
//!
//! [batch]
//! parallel = true
//! threads = 4
//! ```

use crate::error::{Error, Result};
use j2k_syntax::{CommentConverter, Discard, Verbatim};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What happens to Java comments attached to the tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CommentMode {
    /// Keep comments as written.
    #[default]
    Verbatim,
    /// Drop every comment.
    Discard,
}

impl CommentMode {
    pub fn converter(self) -> &'static dyn CommentConverter {
        match self {
            CommentMode::Verbatim => &Verbatim,
            CommentMode::Discard => &Discard,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<CommentMode>,
}

impl RenderConfig {
    pub fn comments(&self) -> CommentMode {
        self.comments.unwrap_or_default()
    }
}

/// Batch rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Render units on the rayon pool. Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    /// Size of a dedicated pool; the global pool is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl BatchConfig {
    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads.filter(|&n| n > 0)
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct J2kConfig {
    pub render: RenderConfig,
    pub batch: BatchConfig,
}

impl J2kConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/j2k/config.toml,
    /// then merges with per-project config from .j2k/config.toml.
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path)? {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".j2k").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = config.merge(project);
        }

        Ok(config)
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("j2k").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Merge another config into this one.
    /// Only values `other` actually sets take precedence.
    pub fn merge(self, other: Self) -> Self {
        Self {
            render: RenderConfig {
                comments: other.render.comments.or(self.render.comments),
            },
            batch: BatchConfig {
                parallel: other.batch.parallel.or(self.batch.parallel),
                threads: other.batch.threads.or(self.batch.threads),
            },
        }
    }

    /// The configuration with every default filled in.
    pub fn resolved(&self) -> Self {
        Self {
            render: RenderConfig {
                comments: Some(self.render.comments()),
            },
            batch: BatchConfig {
                parallel: Some(self.batch.parallel()),
                threads: self.batch.threads(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_project_config(dir: &TempDir, content: &str) {
        let j2k_dir = dir.path().join(".j2k");
        std::fs::create_dir_all(&j2k_dir).unwrap();
        let mut file = std::fs::File::create(j2k_dir.join("config.toml")).unwrap();
        writeln!(file, "{content}").unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = J2kConfig::default();
        assert_eq!(config.render.comments(), CommentMode::Verbatim);
        assert!(config.batch.parallel());
        assert_eq!(config.batch.threads(), None);
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        write_project_config(
            &dir,
            r#"
[render]
comments = "discard"

[batch]
parallel = false
threads = 2
"#,
        );

        let config = J2kConfig::load(dir.path()).unwrap();
        assert_eq!(config.render.comments(), CommentMode::Discard);
        assert!(!config.batch.parallel());
        assert_eq!(config.batch.threads(), Some(2));
    }

    #[test]
    fn test_partial_config_keeps_lower_layers() {
        let global: J2kConfig = toml::from_str(
            r#"
[batch]
parallel = false
threads = 8
"#,
        )
        .unwrap();
        let project: J2kConfig = toml::from_str(
            r#"
[batch]
threads = 2
"#,
        )
        .unwrap();

        let config = J2kConfig::default().merge(global).merge(project);
        assert!(!config.batch.parallel());
        assert_eq!(config.batch.threads(), Some(2));
        assert_eq!(config.render.comments(), CommentMode::Verbatim);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_project_config(&dir, "[render]\ncomments = \"shout\"");

        let err = J2kConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }), "{err}");
    }

    #[test]
    fn test_zero_threads_means_global_pool() {
        let config: J2kConfig = toml::from_str("[batch]\nthreads = 0").unwrap();
        assert_eq!(config.batch.threads(), None);
    }

    #[test]
    fn test_resolved_serializes_every_default() {
        let text = toml::to_string(&J2kConfig::default().resolved()).unwrap();
        assert!(text.contains("comments = \"verbatim\""), "{text}");
        assert!(text.contains("parallel = true"), "{text}");
        assert!(!text.contains("threads"), "{text}");
    }
}
