pub(crate) mod precomputed;
