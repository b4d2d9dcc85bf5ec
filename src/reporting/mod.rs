pub(crate) mod ownership_model;
pub(crate) mod ownership_reporter;

pub use ownership_model::OwnershipReport;
pub use ownership_reporter::{calculate_ownership_reports, current_nav};
