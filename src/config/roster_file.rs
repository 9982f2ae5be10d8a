use crate::adapters::memory::{InMemoryRegistry, InMemoryRoster};
use crate::domain::model::{Group, Person};
use crate::utils::error::{DistributeError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<GroupEntry> for Group {
    fn from(entry: GroupEntry) -> Self {
        let group = match entry.location {
            Some(location) => Group::new(entry.name).with_location(location),
            None => Group::new(entry.name),
        };
        entry.tags.into_iter().fold(group, Group::with_tag)
    }
}

/// Roster and pre-existing groups loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

impl RosterFile {
    /// 依副檔名選擇 CSV 或 TOML 解析
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Self::from_csv_str(&std::fs::read_to_string(path)?),
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            other => Err(DistributeError::ConfigError {
                message: format!(
                    "Unsupported roster file extension '{}', expected .toml or .csv",
                    other
                ),
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Header: `name,gender,nationality[,email,phone]`. CSV files carry no groups.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let people = reader
            .deserialize::<Person>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            people,
            groups: Vec::new(),
        })
    }

    // 替換環境變數 (例如 ${COHORT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = match Regex::new(r"\$\{([^}]+)\}") {
            Ok(re) => re,
            Err(_) => return content.to_string(),
        };

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn into_adapters(self) -> (InMemoryRoster, InMemoryRegistry) {
        let groups = self.groups.into_iter().map(Group::from).collect();
        (InMemoryRoster::new(self.people), InMemoryRegistry::new(groups))
    }
}

impl Validate for RosterFile {
    fn validate(&self) -> Result<()> {
        let mut people = HashSet::new();
        for person in &self.people {
            validate_non_empty_string("people.name", &person.name)?;
            if !people.insert(person) {
                return Err(DistributeError::DuplicatePerson {
                    name: person.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            validate_non_empty_string("groups.name", &group.name)?;
            if !seen.insert(group.name.as_str()) {
                return Err(DistributeError::DuplicateGroupName {
                    name: group.name.clone(),
                });
            }
        }
        Ok(())
    }
}
