use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    foundation::error::PhotostripResult, layout::analyzer::AnalyzerOpts,
    render::merge::CompositorOpts,
};

/// File-level configuration; every field is optional in JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhotostripConfig {
    pub analyzer: AnalyzerOpts,
    pub compositor: CompositorOpts,
}

impl PhotostripConfig {
    pub fn from_json_str(s: &str) -> PhotostripResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse config JSON")?;
        cfg.analyzer.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PhotostripResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.analyzer.validate()?;
        Ok(cfg)
    }
}
