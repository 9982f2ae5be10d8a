use group_distributor::core::strategy::MESSAGE_COMBINED_NOT_IMPLEMENTED;
use group_distributor::{
    AllocationRequest, AllocationStrategy, DistributeError, DistributionEngine, Gender, Group,
    GroupRegistry, InMemoryRegistry, InMemoryRoster, Nationality, Person, Roster, SeededShuffler,
};
use std::collections::{BTreeSet, HashSet};

fn person(name: &str, gender: &str, nationality: &str) -> Person {
    Person::new(
        name,
        gender.parse::<Gender>().unwrap(),
        Nationality::new(nationality).unwrap(),
    )
}

fn typical_people() -> Vec<Person> {
    vec![
        person("Alice Pauline", "FEMALE", "SG"),
        person("Benson Meier", "MALE", "MY"),
        person("Carl Kurz", "MALE", "US"),
        person("Daniel Meier", "MALE", "SG"),
        person("Elle Meyer", "FEMALE", "SG"),
        person("Fiona Kunz", "FEMALE", "SG"),
        person("George Best", "MALE", "US"),
    ]
}

fn member_names(groups: &[Group]) -> Vec<String> {
    let mut names: Vec<String> = groups
        .iter()
        .flat_map(|g| g.members.iter().map(|p| p.name.clone()))
        .collect();
    names.sort();
    names
}

#[test]
fn test_every_policy_places_everyone_once() {
    let roster = InMemoryRoster::new(typical_people());
    let mut expected: Vec<String> = typical_people().into_iter().map(|p| p.name).collect();
    expected.sort();

    for (gender, nationality) in [(false, false), (true, false), (false, true)] {
        let mut registry = InMemoryRegistry::default();
        let request = AllocationRequest::new(3, "T13-")
            .unwrap()
            .balance_by_gender(gender)
            .balance_by_nationality(nationality);

        let groups = DistributionEngine::with_seed(96259561)
            .distribute(&roster, &mut registry, &request)
            .unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(member_names(&groups), expected);
        assert_eq!(registry.groups().len(), 3);
        assert!(registry.exists_by_name("T13-1"));
        assert!(registry.exists_by_name("T13-3"));
    }
}

#[test]
fn test_scenario_unconstrained_two_groups_of_two() {
    let roster = InMemoryRoster::new(vec![
        person("A", "MALE", "SG"),
        person("B", "FEMALE", "SG"),
        person("C", "MALE", "US"),
        person("D", "FEMALE", "MY"),
    ]);
    for seed in [0, 1, 42, 1_700_000_000] {
        let mut registry = InMemoryRegistry::default();
        let request = AllocationRequest::new(2, "G").unwrap();
        let groups = DistributionEngine::with_seed(seed)
            .distribute(&roster, &mut registry, &request)
            .unwrap();
        let sizes: Vec<usize> = groups.iter().map(|g| g.members.len()).collect();
        assert_eq!(sizes, vec![2, 2]);
    }
}

#[test]
fn test_scenario_gender_balanced_pairs() {
    let roster = InMemoryRoster::new(vec![
        person("A", "MALE", "SG"),
        person("B", "FEMALE", "SG"),
        person("C", "MALE", "US"),
        person("D", "FEMALE", "MY"),
    ]);
    for seed in [0, 1, 42, 1_700_000_000] {
        let mut registry = InMemoryRegistry::default();
        let request = AllocationRequest::new(2, "G")
            .unwrap()
            .balance_by_gender(true);
        let groups = DistributionEngine::with_seed(seed)
            .distribute(&roster, &mut registry, &request)
            .unwrap();
        for group in &groups {
            let males = group
                .members
                .iter()
                .filter(|p| p.gender == Gender::Male)
                .count();
            assert_eq!(males, 1);
            assert_eq!(group.members.len(), 2);
        }
    }
}

#[test]
fn test_nationality_balanced_spreads_largest_nationality() {
    let roster = InMemoryRoster::new(typical_people());
    let mut registry = InMemoryRegistry::default();
    let request = AllocationRequest::new(4, "N")
        .unwrap()
        .balance_by_nationality(true);

    let groups = DistributionEngine::with_seed(5)
        .distribute(&roster, &mut registry, &request)
        .unwrap();

    // 4 SG across 4 groups: exactly one each
    for group in &groups {
        let sg = group
            .members
            .iter()
            .filter(|p| p.nationality.code() == "SG")
            .count();
        assert_eq!(sg, 1);
    }
}

#[test]
fn test_combined_policy_leaves_registry_untouched() {
    let roster = InMemoryRoster::new(typical_people());
    let mut registry = InMemoryRegistry::new(vec![Group::new("Existing")]);
    let before = registry.groups();
    let request = AllocationRequest::new(2, "C")
        .unwrap()
        .balance_by_gender(true)
        .balance_by_nationality(true);

    let err = DistributionEngine::with_seed(1)
        .distribute(&roster, &mut registry, &request)
        .unwrap_err();

    match err {
        DistributeError::NotImplemented { message } => {
            assert_eq!(message, MESSAGE_COMBINED_NOT_IMPLEMENTED)
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(registry.groups(), before);
}

#[test]
fn test_duplicate_name_aborts_before_any_write() {
    let roster = InMemoryRoster::new(typical_people());
    let mut registry = InMemoryRegistry::new(vec![Group::new("T3").with_location("COM1")]);
    let before = registry.groups();
    let request = AllocationRequest::new(3, "T").unwrap();

    let err = DistributionEngine::with_seed(1)
        .distribute(&roster, &mut registry, &request)
        .unwrap_err();

    assert!(matches!(err, DistributeError::DuplicateGroupName { ref name } if name == "T3"));
    assert!(err.is_recoverable());
    assert_eq!(registry.groups(), before);
    assert!(!registry.exists_by_name("T1"));
}

#[test]
fn test_group_count_exceeds_roster() {
    let roster = InMemoryRoster::new(typical_people()[..3].to_vec());
    let mut registry = InMemoryRegistry::default();
    let request = AllocationRequest::new(4, "T").unwrap();

    let err = DistributionEngine::with_seed(1)
        .distribute(&roster, &mut registry, &request)
        .unwrap_err();
    assert!(matches!(err, DistributeError::GroupCountExceedsRoster { .. }));
    assert!(registry.groups().is_empty());
}

#[test]
fn test_filtered_roster_only_distributes_visible_people() {
    let mut roster = InMemoryRoster::new(typical_people());
    roster.set_filter(|p| p.nationality.code() != "US");
    let mut registry = InMemoryRegistry::default();
    let request = AllocationRequest::new(5, "F").unwrap();

    let groups = DistributionEngine::with_seed(11)
        .distribute(&roster, &mut registry, &request)
        .unwrap();
    assert_eq!(groups.iter().map(|g| g.members.len()).sum::<usize>(), 5);
    assert!(groups
        .iter()
        .flat_map(|g| g.members.iter())
        .all(|p| p.nationality.code() != "US"));
}

#[test]
fn test_shuffle_is_deterministic_for_a_seed() {
    let people = typical_people();
    let shuffler = SeededShuffler::new(42);
    assert_eq!(shuffler.shuffle(&people), shuffler.shuffle(&people));

    let report_a = DistributionEngine::with_seed(42)
        .run(
            &InMemoryRoster::new(people.clone()),
            &mut InMemoryRegistry::default(),
            &AllocationRequest::new(3, "D").unwrap(),
        )
        .unwrap();
    let report_b = DistributionEngine::new(SeededShuffler::new(42))
        .run(
            &InMemoryRoster::new(people),
            &mut InMemoryRegistry::default(),
            &AllocationRequest::new(3, "D").unwrap(),
        )
        .unwrap();
    assert_eq!(report_a.groups, report_b.groups);
    assert_eq!(report_a.strategy, AllocationStrategy::Unconstrained);
    assert_eq!(report_a.seed, 42);
}

/// Registry whose name check misses a group that another writer creates
/// before materialization reaches it.
#[derive(Default)]
struct RacingRegistry {
    inner: InMemoryRegistry,
    raced_name: String,
}

impl GroupRegistry for RacingRegistry {
    fn exists_by_name(&self, name: &str) -> bool {
        self.inner.exists_by_name(name)
    }

    fn create_group(&mut self, group: Group) -> group_distributor::Result<()> {
        if group.name == self.raced_name && !self.inner.exists_by_name(&self.raced_name) {
            self.inner.create_group(Group::new(self.raced_name.clone()))?;
        }
        self.inner.create_group(group)
    }

    fn index_of_group(&self, name: &str) -> Option<usize> {
        self.inner.index_of_group(name)
    }

    fn add_members(
        &mut self,
        group_index: usize,
        person_indices: &BTreeSet<usize>,
        roster: &dyn Roster,
    ) -> group_distributor::Result<()> {
        self.inner.add_members(group_index, person_indices, roster)
    }

    fn group_at(&self, index: usize) -> Option<Group> {
        self.inner.group_at(index)
    }

    fn groups(&self) -> Vec<Group> {
        self.inner.groups()
    }
}

#[test]
fn test_race_between_check_and_create_is_surfaced_without_rollback() {
    let roster = InMemoryRoster::new(typical_people());
    let mut registry = RacingRegistry {
        inner: InMemoryRegistry::default(),
        raced_name: "R2".to_string(),
    };
    let request = AllocationRequest::new(3, "R").unwrap();

    let err = DistributionEngine::with_seed(9)
        .distribute(&roster, &mut registry, &request)
        .unwrap_err();

    match &err {
        DistributeError::MaterializationFailure { source, .. } => {
            assert!(matches!(**source, DistributeError::DuplicateGroupName { .. }))
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!err.is_recoverable());

    // R1 was committed with its members before the collision
    let names: HashSet<String> = registry.groups().into_iter().map(|g| g.name).collect();
    assert!(names.contains("R1"));
    assert!(names.contains("R2"));
    assert!(!names.contains("R3"));
    let r1 = registry.group_at(registry.index_of_group("R1").unwrap()).unwrap();
    assert!(!r1.members.is_empty());
}
