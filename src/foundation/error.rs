pub type PhotostripResult<T> = Result<T, PhotostripError>;

#[derive(thiserror::Error, Debug)]
pub enum PhotostripError {
    /// The frame could not be decoded or its pixels could not be read.
    #[error("analysis error: {0}")]
    Analysis(String),

    /// A photo or the frame failed to decode, or the output could not be encoded.
    #[error("composition error: {0}")]
    Composition(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotostripError {
    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Re-tag a lower-level failure as an analysis error, keeping its context chain.
    pub(crate) fn into_analysis(self) -> Self {
        match self {
            Self::Analysis(_) => self,
            other => Self::Analysis(format!("{other:#}")),
        }
    }

    /// Re-tag a lower-level failure as a composition error, keeping its context chain.
    pub(crate) fn into_composition(self) -> Self {
        match self {
            Self::Composition(_) => self,
            other => Self::Composition(format!("{other:#}")),
        }
    }
}
