pub(crate) mod composite;
pub(crate) mod fit;
pub(crate) mod merge;
pub(crate) mod surface;
