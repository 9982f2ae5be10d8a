use crate::core::materializer::GroupMaterializer;
use crate::core::naming::reserve;
use crate::core::shuffle::SeededShuffler;
use crate::core::strategy::AllocationStrategy;
use crate::domain::model::{AllocationPlan, AllocationRequest, Group, ReservedNameSet};
use crate::domain::ports::{GroupRegistry, Roster};
use crate::utils::error::{DistributeError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionPhase {
    Validating,
    Reserving,
    Allocating,
    Materializing,
    Done,
}

impl fmt::Display for DistributionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Reserving => "reserving",
            Self::Allocating => "allocating",
            Self::Materializing => "materializing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Allocation computed but not yet written anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedDistribution {
    pub seed: u64,
    pub strategy: AllocationStrategy,
    pub names: ReservedNameSet,
    pub plan: AllocationPlan,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub seed: u64,
    pub strategy: AllocationStrategy,
    pub groups: Vec<Group>,
}

impl DistributionReport {
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn member_counts(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.members.len()).collect()
    }
}

/// Splits the visible roster into named groups.
///
/// Validation, name reservation and allocation never touch the registry,
/// so any failure up to that point leaves it unchanged. Only the final
/// materialization writes.
pub struct DistributionEngine {
    shuffler: SeededShuffler,
}

impl DistributionEngine {
    pub fn new(shuffler: SeededShuffler) -> Self {
        Self { shuffler }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SeededShuffler::new(seed))
    }

    pub fn seed(&self) -> u64 {
        self.shuffler.seed()
    }

    /// Runs every step except materialization.
    pub fn prepare<R, G>(
        &self,
        roster: &R,
        registry: &G,
        request: &AllocationRequest,
    ) -> Result<PreparedDistribution>
    where
        R: Roster,
        G: GroupRegistry,
    {
        enter(DistributionPhase::Validating);
        let people = roster.filtered_people();
        if request.group_count > people.len() {
            tracing::warn!(
                "Requested {} groups but only {} people are in the roster",
                request.group_count,
                people.len()
            );
            return Err(DistributeError::GroupCountExceedsRoster {
                requested: request.group_count,
                available: people.len(),
            });
        }
        // 同一人出現兩次時，materialize 會在半途失敗
        let mut seen = HashSet::with_capacity(people.len());
        if let Some(dup) = people.iter().find(|p| !seen.insert(*p)) {
            return Err(DistributeError::DuplicatePerson {
                name: dup.name.clone(),
            });
        }

        enter(DistributionPhase::Reserving);
        let names = reserve(&request.name_prefix, request.group_count, registry)?;

        enter(DistributionPhase::Allocating);
        let strategy =
            AllocationStrategy::from_policy(request.balance_by_gender, request.balance_by_nationality);
        tracing::info!(
            "Distributing {} people into {} groups ({}, seed {})",
            people.len(),
            request.group_count,
            strategy,
            self.seed()
        );
        let shuffled = self.shuffler.shuffle(&people);
        let plan = strategy.allocate(shuffled, request.group_count)?;

        Ok(PreparedDistribution {
            seed: self.seed(),
            strategy,
            names,
            plan,
        })
    }

    pub fn run<R, G>(
        &self,
        roster: &R,
        registry: &mut G,
        request: &AllocationRequest,
    ) -> Result<DistributionReport>
    where
        R: Roster,
        G: GroupRegistry,
    {
        let prepared = self.prepare(roster, registry, request)?;

        enter(DistributionPhase::Materializing);
        let groups =
            GroupMaterializer::new(registry, roster).materialize(prepared.plan, &prepared.names)?;

        enter(DistributionPhase::Done);
        tracing::info!("Created {} groups", groups.len());
        Ok(DistributionReport {
            seed: prepared.seed,
            strategy: prepared.strategy,
            groups,
        })
    }

    pub fn distribute<R, G>(
        &self,
        roster: &R,
        registry: &mut G,
        request: &AllocationRequest,
    ) -> Result<Vec<Group>>
    where
        R: Roster,
        G: GroupRegistry,
    {
        self.run(roster, registry, request).map(|report| report.groups)
    }
}

impl Default for DistributionEngine {
    fn default() -> Self {
        Self::new(SeededShuffler::from_wall_clock())
    }
}

fn enter(phase: DistributionPhase) {
    tracing::debug!("Distribution phase: {}", phase);
}
