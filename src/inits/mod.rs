pub(crate) mod firstk;
pub(crate) mod precomputed;
pub(crate) mod randomsample;
