use crate::domain::model::{AllocationPlan, Group, ReservedNameSet};
use crate::domain::ports::{GroupRegistry, Roster};
use crate::utils::error::{DistributeError, Result};
use std::collections::BTreeSet;

/// Turns an allocation plan into real groups on the registry.
///
/// There is no compensating rollback: if a step fails, groups and
/// memberships already written by this call stay in the registry.
pub struct GroupMaterializer<'a, G: GroupRegistry, R: Roster> {
    registry: &'a mut G,
    roster: &'a R,
}

impl<'a, G: GroupRegistry, R: Roster> GroupMaterializer<'a, G, R> {
    pub fn new(registry: &'a mut G, roster: &'a R) -> Self {
        Self { registry, roster }
    }

    pub fn materialize(
        &mut self,
        plan: AllocationPlan,
        reserved: &ReservedNameSet,
    ) -> Result<Vec<Group>> {
        if plan.group_count() != reserved.len() {
            return Err(DistributeError::invalid_argument(
                "reserved_names",
                format!(
                    "Plan has {} groups but {} names were reserved",
                    plan.group_count(),
                    reserved.len()
                ),
            ));
        }

        let mut created = Vec::with_capacity(plan.group_count());
        for (name, members) in reserved.names().iter().zip(plan.into_groups()) {
            self.registry
                .create_group(Group::new(name.as_str()))
                .map_err(|e| DistributeError::materialization(format!("creating group {}", name), e))?;

            let group_index = self.registry.index_of_group(name).ok_or_else(|| {
                DistributeError::materialization(
                    format!("locating group {}", name),
                    DistributeError::GroupIndexOutOfRange { index: created.len() },
                )
            })?;

            tracing::info!(
                "Preparing distribution into group {} (index {}), {} person(s)",
                name,
                group_index + 1,
                members.len()
            );

            for person in &members {
                // 每次都重新查詢索引，名單順序可能已經變動
                let person_index = self.roster.index_of(person).ok_or_else(|| {
                    DistributeError::materialization(
                        format!("adding {} to {}", person.name, name),
                        DistributeError::PersonNotFound {
                            name: person.name.clone(),
                        },
                    )
                })?;

                tracing::debug!("Adding {} into group {}", person, name);
                self.registry
                    .add_members(group_index, &BTreeSet::from([person_index]), self.roster)
                    .map_err(|e| {
                        DistributeError::materialization(
                            format!("adding {} to {}", person.name, name),
                            e,
                        )
                    })?;
            }

            let group = self.registry.group_at(group_index).ok_or_else(|| {
                DistributeError::materialization(
                    format!("reading back group {}", name),
                    DistributeError::GroupIndexOutOfRange { index: group_index },
                )
            })?;
            created.push(group);
        }

        Ok(created)
    }
}
