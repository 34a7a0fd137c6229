//! Label payloads and representations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ids::LabelId, repository::Identified};

/// Body of `POST /labels`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
}

/// Body of `PUT /labels/{id}`
///
/// `id` is never read from JSON; the dispatcher stamps the path identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelUpdate {
    #[serde(default, skip_deserializing)]
    pub id: Option<LabelId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
}

impl Identified<LabelId> for LabelUpdate {
    fn set_id(&mut self, id: LabelId) {
        self.id = Some(id);
    }

    fn id(&self) -> Option<&LabelId> {
        self.id.as_ref()
    }
}

/// Label as returned by list and create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSummary {
    pub id: LabelId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Label as returned by get and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelOut {
    #[serde(flatten)]
    pub summary: LabelSummary,
}

impl From<LabelSummary> for LabelOut {
    fn from(summary: LabelSummary) -> Self {
        Self { summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_optional_fields() {
        let create: LabelCreate = serde_json::from_str(r#"{"name":"Garage"}"#).unwrap();
        assert_eq!(create.name, "Garage");
        assert!(create.description.is_empty());
        assert!(create.color.is_empty());
    }

    #[test]
    fn test_update_ignores_body_id() {
        let update: LabelUpdate =
            serde_json::from_str(r#"{"id":"other-id","name":"Attic"}"#).unwrap();
        assert_eq!(update.id, None);
        assert_eq!(update.name, "Attic");
    }

    #[test]
    fn test_out_flattens_summary_in_camel_case() {
        let now = Utc::now();
        let out = LabelOut::from(LabelSummary {
            id: LabelId::new(),
            name: "Kitchen".to_string(),
            description: String::new(),
            color: "#ff0000".to_string(),
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["name"], "Kitchen");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("summary").is_none());
        assert!(json.get("group").is_none());
    }
}
