use std::{borrow::Cow, fmt, path::PathBuf, str::FromStr, sync::Arc};

use anyhow::Context;
use base64::{Engine, engine::general_purpose::STANDARD as B64};

use crate::foundation::error::{PhotostripError, PhotostripResult};

/// Where an image's encoded bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// `data:image/png;base64,...`
    DataUri(String),
    /// Local file.
    Path(PathBuf),
    /// Already-loaded encoded bytes (PNG, JPEG, ...).
    Bytes(Arc<[u8]>),
}

impl ImageSource {
    /// Wrap encoded image bytes held in memory.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Interpret a user-supplied string as a data URI or a file path.
    ///
    /// Remote `http(s)` locations are rejected; fetching is left to the caller.
    pub fn parse(s: &str) -> PhotostripResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhotostripError::validation(
                "image source must not be empty",
            ));
        }
        if has_prefix_ignore_case(trimmed, "data:") {
            return Ok(Self::DataUri(trimmed.to_string()));
        }
        if has_prefix_ignore_case(trimmed, "http://") || has_prefix_ignore_case(trimmed, "https://")
        {
            return Err(PhotostripError::validation(format!(
                "remote image sources are not supported: '{trimmed}'"
            )));
        }
        Ok(Self::Path(PathBuf::from(trimmed)))
    }

    /// Read the encoded bytes behind this source.
    pub fn load_bytes(&self) -> PhotostripResult<Cow<'_, [u8]>> {
        match self {
            Self::Bytes(b) => Ok(Cow::Borrowed(&b[..])),
            Self::Path(p) => {
                let bytes =
                    std::fs::read(p).with_context(|| format!("read image '{}'", p.display()))?;
                Ok(Cow::Owned(bytes))
            }
            Self::DataUri(uri) => decode_data_uri(uri).map(Cow::Owned),
        }
    }
}

impl FromStr for ImageSource {
    type Err = PhotostripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::DataUri(uri) => {
                let header = uri.split(',').next().unwrap_or("data:");
                write!(f, "{header},<{} chars>", uri.len())
            }
        }
    }
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn decode_data_uri(uri: &str) -> PhotostripResult<Vec<u8>> {
    if !has_prefix_ignore_case(uri, "data:") {
        return Err(PhotostripError::validation(
            "data URI must start with 'data:'",
        ));
    }
    let rest = &uri["data:".len()..];
    let Some((meta, payload)) = rest.split_once(',') else {
        return Err(PhotostripError::validation(
            "data URI is missing ',' separator",
        ));
    };
    let is_base64 = meta
        .split(';')
        .any(|p| p.trim().eq_ignore_ascii_case("base64"));
    if !is_base64 {
        return Err(PhotostripError::validation(
            "only base64-encoded data URIs are supported",
        ));
    }
    let bytes = B64
        .decode(payload.trim())
        .context("decode base64 data URI payload")?;
    Ok(bytes)
}
