pub mod age;
pub mod comments;
pub mod config;
pub mod discovery;
pub mod duration;
pub mod enrichment;
pub mod error;
pub mod harvest;
pub mod provider;
pub mod record;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod topic;

pub use config::Config;
pub use error::{HarvestError, Result};
pub use harvest::{HarvestOutcome, HarvestReport, HarvestRequest};
pub use provider::VideoProvider;
pub use record::{Count, EnrichedVideoRecord};
pub use topic::Topic;
