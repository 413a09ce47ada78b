use serde::de::value::StrDeserializer;
use serde::de::{self, IntoDeserializer, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    #[serde(rename = "API")]
    Api,
    #[serde(rename = "Database")]
    Database,
    #[serde(rename = "Lakehouse")]
    Lakehouse,
    #[serde(rename = "Report")]
    Report,
    #[serde(rename = "Event Streams")]
    EventStreams,
    #[serde(rename = "CSV File")]
    CsvFile,
    #[serde(rename = "Manual Integration")]
    ManualIntegration,
    #[serde(rename = "Web Services")]
    WebServices,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionKind::Api => "API",
            ConnectionKind::Database => "Database",
            ConnectionKind::Lakehouse => "Lakehouse",
            ConnectionKind::Report => "Report",
            ConnectionKind::EventStreams => "Event Streams",
            ConnectionKind::CsvFile => "CSV File",
            ConnectionKind::ManualIntegration => "Manual Integration",
            ConnectionKind::WebServices => "Web Services",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerRole {
    #[serde(rename = "Business Owner")]
    BusinessOwner,
    #[serde(rename = "IT Owner")]
    ItOwner,
}

impl fmt::Display for OwnerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerRole::BusinessOwner => f.write_str("Business Owner"),
            OwnerRole::ItOwner => f.write_str("IT Owner"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "Group Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    #[serde(rename = "System Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
    #[serde(rename = "Group", alias = "group", default)]
    pub group: String,
    #[serde(rename = "Color", alias = "color", default)]
    pub color: Option<String>,
}

impl System {
    pub fn new(name: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            group: group.to_string(),
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Email", alias = "email", default)]
    pub email: String,
    #[serde(
        rename = "Role",
        alias = "role",
        default,
        deserialize_with = "blank_as_none"
    )]
    pub role: Option<OwnerRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    #[serde(
        rename = "ID",
        alias = "id",
        default,
        deserialize_with = "lenient_id"
    )]
    pub id: Option<u64>,
    #[serde(rename = "Integration Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
    #[serde(rename = "Source System", alias = "source")]
    pub source: String,
    #[serde(rename = "Source Conn", alias = "source_conn")]
    pub source_conn: ConnectionKind,
    #[serde(rename = "Target System", alias = "target")]
    pub target: String,
    #[serde(rename = "Target Conn", alias = "target_conn")]
    pub target_conn: ConnectionKind,
    #[serde(rename = "Business Owner", alias = "business_owner", default)]
    pub business_owner: String,
    #[serde(rename = "IT Owner", alias = "it_owner", default)]
    pub it_owner: String,
}

impl Integration {
    pub fn new(id: u64, name: &str, source: &str, target: &str) -> Self {
        Self {
            id: Some(id),
            name: name.to_string(),
            description: String::new(),
            source: source.to_string(),
            source_conn: ConnectionKind::Api,
            target: target.to_string(),
            target_conn: ConnectionKind::Api,
            business_owner: String::new(),
            it_owner: String::new(),
        }
    }
}

/// Tables saved by spreadsheet tooling write whole-number ids as `3.0` and
/// leave an unassigned id blank or `NaN`.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<u64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative whole number, a blank cell or null")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            u64::try_from(value)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if value.is_nan() {
                return Ok(None);
            }
            if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
                Ok(Some(value as u64))
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(id) = trimmed.parse::<u64>() {
                return Ok(Some(id));
            }
            match trimmed.parse::<f64>() {
                Ok(number) => self.visit_f64(number),
                Err(_) => Err(E::invalid_value(Unexpected::Str(value), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let cell: StrDeserializer<'_, D::Error> = value.into_deserializer();
            T::deserialize(cell).map(Some)
        }
    }
}

/// Immutable copy of the four record tables a query runs against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub systems: Vec<System>,
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotIssue {
    BlankSystemName { index: usize },
    DuplicateSystem(String),
    DuplicateGroup(String),
    DuplicateIntegration(String),
    DanglingGroup { system: String, group: String },
    UnresolvedEndpoint { integration: String, system: String },
    MissingIntegrationId(String),
    MissingOwnerRole(String),
}

impl fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotIssue::BlankSystemName { index } => {
                write!(f, "system row {} has a blank name", index + 1)
            }
            SnapshotIssue::DuplicateSystem(name) => write!(f, "duplicate system `{name}`"),
            SnapshotIssue::DuplicateGroup(name) => write!(f, "duplicate group `{name}`"),
            SnapshotIssue::DuplicateIntegration(name) => {
                write!(f, "duplicate integration name `{name}`")
            }
            SnapshotIssue::DanglingGroup { system, group } => {
                write!(f, "system `{system}` references missing group `{group}`")
            }
            SnapshotIssue::UnresolvedEndpoint {
                integration,
                system,
            } => write!(
                f,
                "integration `{integration}` references unknown system `{system}`"
            ),
            SnapshotIssue::MissingIntegrationId(name) => {
                write!(f, "integration `{name}` has no id")
            }
            SnapshotIssue::MissingOwnerRole(name) => write!(f, "owner `{name}` has no role"),
        }
    }
}

impl Snapshot {
    pub fn group_choices(&self) -> Vec<String> {
        distinct(self.systems.iter().map(|system| system.group.as_str()))
    }

    pub fn system_names(&self) -> Vec<String> {
        distinct(self.systems.iter().map(|system| system.name.as_str()))
    }

    pub fn owner_names(&self, role: OwnerRole) -> Vec<String> {
        distinct(
            self.owners
                .iter()
                .filter(|owner| owner.role == Some(role))
                .map(|owner| owner.name.as_str()),
        )
    }

    pub fn next_integration_id(&self) -> u64 {
        self.integrations
            .iter()
            .filter_map(|integration| integration.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Reports consistency problems without rejecting anything; rebuilding a
    /// graph from an inconsistent snapshot is still valid.
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        for (index, system) in self.systems.iter().enumerate() {
            if system.name.trim().is_empty() {
                issues.push(SnapshotIssue::BlankSystemName { index });
            }
        }
        for name in duplicates(self.systems.iter().map(|s| s.name.as_str())) {
            issues.push(SnapshotIssue::DuplicateSystem(name));
        }
        for name in duplicates(self.groups.iter().map(|g| g.name.as_str())) {
            issues.push(SnapshotIssue::DuplicateGroup(name));
        }
        for name in duplicates(self.integrations.iter().map(|i| i.name.as_str())) {
            issues.push(SnapshotIssue::DuplicateIntegration(name));
        }
        for integration in self.integrations.iter().filter(|i| i.id.is_none()) {
            issues.push(SnapshotIssue::MissingIntegrationId(integration.name.clone()));
        }
        for owner in self.owners.iter().filter(|o| o.role.is_none()) {
            issues.push(SnapshotIssue::MissingOwnerRole(owner.name.clone()));
        }

        let groups: HashSet<&str> = self.groups.iter().map(|g| g.name.as_str()).collect();
        for system in &self.systems {
            if !system.group.is_empty() && !groups.contains(system.group.as_str()) {
                issues.push(SnapshotIssue::DanglingGroup {
                    system: system.name.clone(),
                    group: system.group.clone(),
                });
            }
        }

        let systems: HashSet<&str> = self.systems.iter().map(|s| s.name.as_str()).collect();
        for integration in &self.integrations {
            for endpoint in [&integration.source, &integration.target] {
                if !systems.contains(endpoint.as_str()) {
                    issues.push(SnapshotIssue::UnresolvedEndpoint {
                        integration: integration.name.clone(),
                        system: endpoint.clone(),
                    });
                }
            }
        }

        issues
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

fn duplicates<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(value.to_string());
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(name: &str, role: OwnerRole) -> Owner {
        Owner {
            name: name.to_string(),
            email: format!("{}@example.org", name.to_lowercase()),
            role: Some(role),
        }
    }

    #[test]
    fn connection_kind_names_match_display() {
        let kind: ConnectionKind = serde_json::from_str("\"Event Streams\"").unwrap();
        assert_eq!(kind, ConnectionKind::EventStreams);
        assert_eq!(
            serde_json::to_string(&ConnectionKind::CsvFile).unwrap(),
            format!("\"{}\"", ConnectionKind::CsvFile)
        );
        assert!(serde_json::from_str::<ConnectionKind>("\"api\"").is_err());
        assert!(serde_json::from_str::<ConnectionKind>("\"FTP\"").is_err());
    }

    fn integration_with_id(id: &str) -> serde_json::Result<Integration> {
        serde_json::from_str(&format!(
            r#"{{"id": {id}, "name": "feed", "source": "A", "source_conn": "API", "target": "B", "target_conn": "API"}}"#
        ))
    }

    #[test]
    fn integration_ids_accept_float_and_blank_cells() {
        assert_eq!(integration_with_id("3").unwrap().id, Some(3));
        assert_eq!(integration_with_id("3.0").unwrap().id, Some(3));
        assert_eq!(integration_with_id(r#""7.0""#).unwrap().id, Some(7));
        assert_eq!(integration_with_id(r#""""#).unwrap().id, None);
        assert_eq!(integration_with_id("null").unwrap().id, None);
        assert!(integration_with_id("1.5").is_err());
        assert!(integration_with_id("-2").is_err());
    }

    #[test]
    fn owner_pools_split_by_role() {
        let snapshot = Snapshot {
            owners: vec![
                owner("Ana", OwnerRole::BusinessOwner),
                owner("Raj", OwnerRole::ItOwner),
                owner("Li", OwnerRole::BusinessOwner),
                owner("Ana", OwnerRole::BusinessOwner),
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.owner_names(OwnerRole::BusinessOwner), vec!["Ana", "Li"]);
        assert_eq!(snapshot.owner_names(OwnerRole::ItOwner), vec!["Raj"]);
    }

    #[test]
    fn group_choices_keep_first_seen_order() {
        let snapshot = Snapshot {
            systems: vec![
                System::new("A", "Finance"),
                System::new("B", "Ops"),
                System::new("C", "Finance"),
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.group_choices(), vec!["Finance", "Ops"]);
        assert_eq!(snapshot.system_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn integration_ids_are_never_reused() {
        let mut snapshot = Snapshot::default();
        assert_eq!(snapshot.next_integration_id(), 1);
        snapshot.integrations = vec![
            Integration::new(1, "one", "A", "B"),
            Integration::new(4, "four", "A", "B"),
        ];
        // rows 2 and 3 were deleted; the next id still moves past 4
        assert_eq!(snapshot.next_integration_id(), 5);
    }

    #[test]
    fn validate_reports_without_failing() {
        let snapshot = Snapshot {
            groups: vec![Group {
                name: "X".to_string(),
                description: String::new(),
            }],
            systems: vec![
                System::new("A", "X"),
                System::new("A", "X"),
                System::new("B", "Gone"),
                System::new(" ", ""),
            ],
            integrations: vec![
                Integration::new(1, "feed", "A", "B"),
                Integration::new(2, "feed", "A", "Z"),
            ],
            ..Default::default()
        };
        let issues = snapshot.validate();
        assert!(issues.contains(&SnapshotIssue::BlankSystemName { index: 3 }));
        assert!(issues.contains(&SnapshotIssue::DuplicateSystem("A".to_string())));
        assert!(issues.contains(&SnapshotIssue::DuplicateIntegration("feed".to_string())));
        assert!(issues.contains(&SnapshotIssue::DanglingGroup {
            system: "B".to_string(),
            group: "Gone".to_string(),
        }));
        assert!(issues.contains(&SnapshotIssue::UnresolvedEndpoint {
            integration: "feed".to_string(),
            system: "Z".to_string(),
        }));
        assert_eq!(issues.len(), 5);
    }

    #[test]
    fn unassigned_ids_and_roles_are_reported() {
        let mut unnumbered = Integration::new(1, "draft", "A", "B");
        unnumbered.id = None;
        let snapshot = Snapshot {
            owners: vec![
                owner("Ana", OwnerRole::BusinessOwner),
                Owner {
                    name: "New row".to_string(),
                    email: String::new(),
                    role: None,
                },
            ],
            integrations: vec![Integration::new(4, "feed", "A", "B"), unnumbered],
            ..Default::default()
        };
        assert_eq!(
            snapshot.validate(),
            vec![
                SnapshotIssue::MissingIntegrationId("draft".to_string()),
                SnapshotIssue::MissingOwnerRole("New row".to_string()),
                SnapshotIssue::UnresolvedEndpoint {
                    integration: "feed".to_string(),
                    system: "A".to_string(),
                },
                SnapshotIssue::UnresolvedEndpoint {
                    integration: "feed".to_string(),
                    system: "B".to_string(),
                },
                SnapshotIssue::UnresolvedEndpoint {
                    integration: "draft".to_string(),
                    system: "A".to_string(),
                },
                SnapshotIssue::UnresolvedEndpoint {
                    integration: "draft".to_string(),
                    system: "B".to_string(),
                },
            ]
        );
        assert_eq!(snapshot.next_integration_id(), 5);
        assert_eq!(snapshot.owner_names(OwnerRole::BusinessOwner), vec!["Ana"]);
    }
}
