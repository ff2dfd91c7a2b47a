mod component;
mod project;

pub(crate) use self::component::ComponentRow;
pub(crate) use self::project::{LineRow, ProjectRow};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A stocked part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicComponent {
    pub id: i64,
    /// Manufacturer Part Number.
    pub mpn: String,
    pub description: String,
    /// Units in stock.
    pub count: u32,
    /// Where the stock physically lives (drawer, bin, box).
    pub place: String,
    /// Link to the datasheet PDF, if known.
    pub datasheet: Option<String>,
    pub packaging: Option<String>,
}

/// A part about to be added to the stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewComponent {
    pub mpn: String,
    pub description: String,
    pub place: String,
    pub datasheet: Option<String>,
    pub packaging: Option<String>,
}
impl NewComponent {
    pub fn new(mpn: impl Into<String>) -> Self {
        Self {
            mpn: mpn.into(),
            ..Default::default()
        }
    }
}

/// A partial update to a stocked part. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComponentPatch {
    pub id: Option<i64>,
    pub mpn: Option<String>,
    pub description: Option<String>,
    pub count: Option<u32>,
    pub place: Option<String>,
    pub datasheet: Option<String>,
    pub packaging: Option<String>,
}
impl ComponentPatch {
    pub fn apply(self, component: &mut ElectronicComponent) {
        if let Some(mpn) = self.mpn {
            component.mpn = mpn;
        }
        if let Some(description) = self.description {
            component.description = description;
        }
        if let Some(count) = self.count {
            component.count = count;
        }
        if let Some(place) = self.place {
            component.place = place;
        }
        if self.datasheet.is_some() {
            component.datasheet = self.datasheet;
        }
        if self.packaging.is_some() {
            component.packaging = self.packaging;
        }
    }
}

/// A named build and the components reserved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub opened_at: OffsetDateTime,
    pub components: Vec<ProjectComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectComponent {
    pub id: i64,
    pub quantity: u32,
    pub component: ElectronicComponent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ProjectLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLine {
    pub component_id: i64,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component() -> ElectronicComponent {
        ElectronicComponent {
            id: 7,
            mpn: "NE555".to_string(),
            description: "Timer".to_string(),
            count: 4,
            place: "A1".to_string(),
            datasheet: None,
            packaging: Some("DIP-8".to_string()),
        }
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut target = component();
        let patch: ComponentPatch = serde_json::from_str(r#"{"id": 7, "count": 10, "place": "B2"}"#).unwrap();
        patch.apply(&mut target);
        assert_eq!(target.count, 10);
        assert_eq!(target.place, "B2");
        assert_eq!(target.mpn, "NE555");
        assert_eq!(target.packaging.as_deref(), Some("DIP-8"));
    }

    #[test]
    fn test_new_project_deserializes_camel_case() {
        let project: NewProject =
            serde_json::from_str(r#"{"name": "Clock", "components": [{"componentId": 3, "quantity": 2}]}"#).unwrap();
        assert_eq!(project.components, vec![ProjectLine { component_id: 3, quantity: 2 }]);
    }

    #[test]
    fn test_project_serializes_rfc3339() {
        let project = Project {
            id: 1,
            name: "Clock".to_string(),
            opened_at: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            components: vec![],
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["openedAt"], "2023-11-14T22:13:20Z");
    }
}
