pub mod pinned_roots_trust;
pub mod policy_verifier;
pub mod trust_all;

pub use pinned_roots_trust::PinnedRootsTrust;
pub use policy_verifier::{install_trust_policy, PolicyVerifier};
pub use trust_all::TrustAll;
