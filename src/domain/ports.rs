use crate::domain::model::{Group, Person};
use crate::utils::error::Result;
use std::collections::BTreeSet;

/// The working roster a distribution runs against.
pub trait Roster {
    /// People currently visible through the roster filter, in display order.
    fn filtered_people(&self) -> Vec<Person>;

    /// Position of `person` in the current filtered ordering.
    fn index_of(&self, person: &Person) -> Option<usize>;

    fn len(&self) -> usize {
        self.filtered_people().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Storage of all known groups. Group names are unique.
pub trait GroupRegistry {
    fn exists_by_name(&self, name: &str) -> bool;

    /// Fails with `DuplicateGroupName` when a group of that name already exists.
    fn create_group(&mut self, group: Group) -> Result<()>;

    fn index_of_group(&self, name: &str) -> Option<usize>;

    /// Adds the roster people at `person_indices` to the group at `group_index`.
    fn add_members(
        &mut self,
        group_index: usize,
        person_indices: &BTreeSet<usize>,
        roster: &dyn Roster,
    ) -> Result<()>;

    fn group_at(&self, index: usize) -> Option<Group>;

    fn groups(&self) -> Vec<Group>;
}
