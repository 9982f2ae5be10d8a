pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::memory::{InMemoryRegistry, InMemoryRoster};
pub use config::roster_file::RosterFile;
pub use crate::core::{
    engine::{DistributionEngine, DistributionReport, PreparedDistribution},
    shuffle::SeededShuffler,
    strategy::AllocationStrategy,
};
pub use domain::model::{AllocationPlan, AllocationRequest, Gender, Group, Nationality, Person};
pub use domain::ports::{GroupRegistry, Roster};
pub use utils::error::{DistributeError, Result};
