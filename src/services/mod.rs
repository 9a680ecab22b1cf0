pub mod cleanup;
pub mod metrics;
pub mod normalizer;
pub mod provider;
pub mod rate_limit;
