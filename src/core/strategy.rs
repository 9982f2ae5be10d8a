use crate::core::nationality::{rank, tally};
use crate::domain::model::{AllocationPlan, Gender, Nationality, Person};
use crate::utils::error::{DistributeError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub const MESSAGE_COMBINED_NOT_IMPLEMENTED: &str =
    "Gender & Nationality Distribution is not yet implemented";

/// Partitioning policy, selected from the (gender, nationality) flag pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    Unconstrained,
    GenderBalanced,
    NationalityBalanced,
    Combined,
}

impl AllocationStrategy {
    pub fn from_policy(balance_by_gender: bool, balance_by_nationality: bool) -> Self {
        match (balance_by_gender, balance_by_nationality) {
            (false, false) => Self::Unconstrained,
            (false, true) => Self::NationalityBalanced,
            (true, false) => Self::GenderBalanced,
            (true, true) => Self::Combined,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unconstrained => "unconstrained",
            Self::GenderBalanced => "gender-balanced",
            Self::NationalityBalanced => "nationality-balanced",
            Self::Combined => "gender-and-nationality",
        }
    }

    /// Splits `shuffled` into exactly `group_count` member lists.
    pub fn allocate(&self, shuffled: Vec<Person>, group_count: usize) -> Result<AllocationPlan> {
        if group_count == 0 {
            return Err(DistributeError::invalid_argument(
                "group_count",
                "Index should be positive.",
            ));
        }

        let total = shuffled.len();
        let plan = match self {
            Self::Unconstrained => unconstrained(shuffled, group_count),
            Self::GenderBalanced => gender_balanced(shuffled, group_count),
            Self::NationalityBalanced => nationality_balanced(shuffled, group_count),
            Self::Combined => {
                return Err(DistributeError::NotImplemented {
                    message: MESSAGE_COMBINED_NOT_IMPLEMENTED.to_string(),
                })
            }
        };

        debug_assert_eq!(plan.total_members(), total);
        tracing::debug!(
            "{} allocation produced group sizes {:?}",
            self.name(),
            plan.sizes()
        );
        Ok(plan)
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slots are filled from `group_count` down to 1, each taking
/// `remaining / slots_left` people off the tail of the pool.
fn unconstrained(mut pool: Vec<Person>, group_count: usize) -> AllocationPlan {
    let mut plan = AllocationPlan::default();
    for slots_left in (1..=group_count).rev() {
        let chunk = pool.len() / slots_left;
        let members: Vec<Person> = pool.drain(pool.len() - chunk..).rev().collect();
        plan.push_group(members);
    }
    plan
}

/// Round-robin over one rotating index: males first to exhaustion, then
/// females continue from wherever the males stopped.
fn gender_balanced(pool: Vec<Person>, group_count: usize) -> AllocationPlan {
    let (males, females): (Vec<Person>, Vec<Person>) =
        pool.into_iter().partition(|p| p.gender == Gender::Male);

    round_robin(
        males.into_iter().rev().chain(females.into_iter().rev()),
        group_count,
    )
}

/// Most common nationality first, spread across the same rotating index
/// that every later nationality keeps advancing.
fn nationality_balanced(pool: Vec<Person>, group_count: usize) -> AllocationPlan {
    let ranked = rank(tally(&pool));

    let mut by_nationality: HashMap<Nationality, Vec<Person>> = HashMap::new();
    for person in pool {
        by_nationality
            .entry(person.nationality.clone())
            .or_default()
            .push(person);
    }

    let ordered = ranked
        .into_iter()
        .flat_map(|(nationality, _)| by_nationality.remove(&nationality).unwrap_or_default());

    round_robin(ordered, group_count)
}

fn round_robin(people: impl Iterator<Item = Person>, group_count: usize) -> AllocationPlan {
    let mut plan = AllocationPlan::with_slots(group_count);
    for (counter, person) in people.enumerate() {
        plan.assign(counter % group_count, person);
    }
    plan
}
