pub mod trust_policy;

pub use trust_policy::TrustPolicy;
