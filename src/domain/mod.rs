pub mod bundle;
pub mod link;
pub mod summary;

pub use bundle::{ConfigBundle, Provider};
pub use link::LinkCandidate;
pub use summary::SummaryResult;
