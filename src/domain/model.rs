use crate::utils::error::{DistributeError, Result};
use crate::utils::validation::{validate_country_code, validate_non_empty_string};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Location assigned to groups created by a distribution run.
pub const DEFAULT_GROUP_LOCATION: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl FromStr for Gender {
    type Err = DistributeError;

    // 大小寫需完全相符
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MALE" | "M" => Ok(Gender::Male),
            "FEMALE" | "F" => Ok(Gender::Female),
            other => Err(DistributeError::invalid_argument(
                "gender",
                format!("Gender should be MALE, FEMALE, M or F, got '{}'", other),
            )),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = DistributeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nationality(String);

impl Nationality {
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        validate_country_code("nationality", &code)?;
        Ok(Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nationality {
    type Error = DistributeError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Nationality> for String {
    fn from(value: Nationality) -> Self {
        value.0
    }
}

impl fmt::Display for Nationality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A roster entry. Identity and contact fields are opaque to allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub gender: Gender,
    pub nationality: Nationality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>, gender: Gender, nationality: Nationality) -> Self {
        Self {
            name: name.into(),
            gender,
            nationality,
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.gender, self.nationality)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub members: Vec<Person>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: DEFAULT_GROUP_LOCATION.to_string(),
            tags: BTreeSet::new(),
            members: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Two groups are the same group when their names match.
    pub fn is_same_group(&self, other: &Group) -> bool {
        self.name == other.name
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.members.contains(person)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub group_count: usize,
    pub name_prefix: String,
    pub balance_by_gender: bool,
    pub balance_by_nationality: bool,
}

impl AllocationRequest {
    pub fn new(group_count: usize, name_prefix: impl Into<String>) -> Result<Self> {
        let name_prefix = name_prefix.into();
        crate::utils::validation::validate_positive_number("group_count", group_count, 1)?;
        validate_non_empty_string("name_prefix", &name_prefix)?;
        Ok(Self {
            group_count,
            name_prefix,
            balance_by_gender: false,
            balance_by_nationality: false,
        })
    }

    pub fn balance_by_gender(mut self, enabled: bool) -> Self {
        self.balance_by_gender = enabled;
        self
    }

    pub fn balance_by_nationality(mut self, enabled: bool) -> Self {
        self.balance_by_nationality = enabled;
        self
    }
}

impl fmt::Display for AllocationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} groups named {}1..{}{} (gender: {}, nationality: {})",
            self.group_count,
            self.name_prefix,
            self.name_prefix,
            self.group_count,
            self.balance_by_gender,
            self.balance_by_nationality
        )
    }
}

/// Ordered member lists, one per prospective group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationPlan {
    groups: Vec<Vec<Person>>,
}

impl AllocationPlan {
    pub fn with_slots(group_count: usize) -> Self {
        Self {
            groups: vec![Vec::new(); group_count],
        }
    }

    pub fn assign(&mut self, slot: usize, person: Person) {
        self.groups[slot].push(person);
    }

    pub fn push_group(&mut self, members: Vec<Person>) {
        self.groups.push(members);
    }

    pub fn groups(&self) -> &[Vec<Person>] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn total_members(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    pub fn into_groups(self) -> Vec<Vec<Person>> {
        self.groups
    }
}

/// Group names checked collision-free as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservedNameSet {
    names: Vec<String>,
}

impl ReservedNameSet {
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
