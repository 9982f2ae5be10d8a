pub mod engine;
pub mod materializer;
pub mod nationality;
pub mod naming;
pub mod shuffle;
pub mod strategy;

pub use crate::domain::model::{AllocationPlan, AllocationRequest, Group, Person, ReservedNameSet};
pub use crate::domain::ports::{GroupRegistry, Roster};
pub use crate::utils::error::Result;
