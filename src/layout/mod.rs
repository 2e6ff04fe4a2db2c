pub(crate) mod analyzer;
