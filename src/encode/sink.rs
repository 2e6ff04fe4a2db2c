use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::{
    encode::png::Composite,
    foundation::error::{PhotostripError, PhotostripResult},
};

/// Describes a finished strip handed to a [`CompositeSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkMeta {
    /// Topic of the frame the strip was built with.
    pub topic: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_unix_ms: u64,
}

impl SinkMeta {
    /// Stamp `topic` with the current wall-clock time.
    pub fn now(topic: impl Into<String>) -> Self {
        let created_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            topic: topic.into(),
            created_unix_ms,
        }
    }

    /// `photostrip-<topic>-<millis>.png`
    pub fn file_name(&self) -> String {
        format!(
            "photostrip-{}-{}.png",
            topic_slug(&self.topic),
            self.created_unix_ms
        )
    }
}

fn topic_slug(topic: &str) -> String {
    let slug: String = topic
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect();
    if slug.is_empty() {
        "frame".to_string()
    } else {
        slug
    }
}

/// Consumer of finished strips (file save, upload, ...).
pub trait CompositeSink {
    fn deliver(&mut self, meta: &SinkMeta, composite: &Composite) -> PhotostripResult<()>;
}

/// Keeps delivered strips in memory, for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    delivered: Vec<(SinkMeta, Composite)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> &[(SinkMeta, Composite)] {
        &self.delivered
    }
}

impl CompositeSink for InMemorySink {
    fn deliver(&mut self, meta: &SinkMeta, composite: &Composite) -> PhotostripResult<()> {
        self.delivered.push((meta.clone(), composite.clone()));
        Ok(())
    }
}

/// Writes each strip as a PNG into a directory.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
    overwrite: bool,
    written: Vec<PathBuf>,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
            written: Vec::new(),
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl CompositeSink for DirSink {
    fn deliver(&mut self, meta: &SinkMeta, composite: &Composite) -> PhotostripResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(meta.file_name());
        if !self.overwrite && path.exists() {
            return Err(PhotostripError::validation(format!(
                "output '{}' already exists",
                path.display()
            )));
        }
        std::fs::write(&path, &composite.blob)
            .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = composite.blob.len(), "saved photo strip");
        self.written.push(path);
        Ok(())
    }
}
