pub(crate) mod engine_errors;
pub(crate) mod engine_model;
pub(crate) mod nav_engine;
pub(crate) mod sanity_guard;

pub use engine_errors::EngineError;
pub use engine_model::{EngineState, NavSample, NavTag, RedemptionBasis, WithdrawalMode};
pub use nav_engine::NavEngine;
pub use sanity_guard::SanityGuard;
