pub(crate) mod layout;
pub(crate) mod pipeline;
pub(crate) mod placeholder;
pub(crate) mod raster;
pub(crate) mod source;
