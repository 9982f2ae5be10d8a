use crate::domain::model::{Group, Person};
use crate::domain::ports::{GroupRegistry, Roster};
use crate::utils::error::{DistributeError, Result};
use std::collections::BTreeSet;
use std::fmt;

type PersonFilter = Box<dyn Fn(&Person) -> bool + Send + Sync>;

/// Vec-backed roster with an optional view filter.
#[derive(Default)]
pub struct InMemoryRoster {
    people: Vec<Person>,
    filter: Option<PersonFilter>,
}

impl InMemoryRoster {
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            people,
            filter: None,
        }
    }

    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&Person) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }
}

impl fmt::Debug for InMemoryRoster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRoster")
            .field("people", &self.people.len())
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl Roster for InMemoryRoster {
    fn filtered_people(&self) -> Vec<Person> {
        match &self.filter {
            Some(filter) => self.people.iter().filter(|p| filter(*p)).cloned().collect(),
            None => self.people.clone(),
        }
    }

    fn index_of(&self, person: &Person) -> Option<usize> {
        match &self.filter {
            Some(filter) => self
                .people
                .iter()
                .filter(|p| filter(*p))
                .position(|p| p == person),
            None => self.people.iter().position(|p| p == person),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    groups: Vec<Group>,
}

impl InMemoryRegistry {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }
}

impl GroupRegistry for InMemoryRegistry {
    fn exists_by_name(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    fn create_group(&mut self, group: Group) -> Result<()> {
        if self.groups.iter().any(|g| g.is_same_group(&group)) {
            return Err(DistributeError::DuplicateGroupName { name: group.name });
        }
        self.groups.push(group);
        Ok(())
    }

    fn index_of_group(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    fn add_members(
        &mut self,
        group_index: usize,
        person_indices: &BTreeSet<usize>,
        roster: &dyn Roster,
    ) -> Result<()> {
        let people = roster.filtered_people();
        let group = self
            .groups
            .get_mut(group_index)
            .ok_or(DistributeError::GroupIndexOutOfRange { index: group_index })?;

        // 先檢查所有索引，避免只加入一部分成員
        let mut to_add = Vec::with_capacity(person_indices.len());
        for &index in person_indices {
            let person = people.get(index).ok_or_else(|| DistributeError::PersonNotFound {
                name: format!("#{}", index),
            })?;
            if group.contains(person) {
                return Err(DistributeError::DuplicatePerson {
                    name: person.name.clone(),
                });
            }
            to_add.push(person.clone());
        }

        group.members.extend(to_add);
        Ok(())
    }

    fn group_at(&self, index: usize) -> Option<Group> {
        self.groups.get(index).cloned()
    }

    fn groups(&self) -> Vec<Group> {
        self.groups.clone()
    }
}
