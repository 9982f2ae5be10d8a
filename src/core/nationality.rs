use crate::domain::model::{Nationality, Person};
use std::collections::HashMap;

/// Head count per nationality, kept in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NationalityTally {
    entries: Vec<(Nationality, usize)>,
}

impl NationalityTally {
    pub fn count(&self, nationality: &Nationality) -> usize {
        self.entries
            .iter()
            .find(|(n, _)| n == nationality)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Nationality, usize)] {
        &self.entries
    }
}

pub fn tally(people: &[Person]) -> NationalityTally {
    let mut positions: HashMap<&Nationality, usize> = HashMap::new();
    let mut entries: Vec<(Nationality, usize)> = Vec::new();

    for person in people {
        match positions.get(&person.nationality) {
            Some(&pos) => entries[pos].1 += 1,
            None => {
                positions.insert(&person.nationality, entries.len());
                entries.push((person.nationality.clone(), 1));
            }
        }
    }

    NationalityTally { entries }
}

/// Sorts by descending head count. Equal counts keep tally order.
pub fn rank(tally: NationalityTally) -> Vec<(Nationality, usize)> {
    let mut ranked = tally.entries;
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
