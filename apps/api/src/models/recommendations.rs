use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lenient;

/// Reach / target / safe buckets produced by the University Stage.
///
/// Bucket sizes are whatever the model returned. The prompt asks for three
/// universities in total but nothing here validates or truncates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecommendationSet {
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub reach: Vec<UniversityPick>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub target: Vec<UniversityPick>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub safe: Vec<UniversityPick>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniversityPick {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Deserialize)]
struct PickFields {
    #[serde(default, deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    reason: Option<String>,
}

// A bare string in a bucket is read as a name without a reason.
impl<'de> Deserialize<'de> for UniversityPick {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(name) => Ok(UniversityPick {
                name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
                reason: None,
            }),
            other => {
                let fields: PickFields =
                    serde_json::from_value(other).map_err(serde::de::Error::custom)?;
                Ok(UniversityPick {
                    name: fields.name,
                    reason: fields.reason,
                })
            }
        }
    }
}

impl UniversityPick {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed university")
    }

    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or("No reason given")
    }
}

impl UniversityRecommendationSet {
    /// Names from the reach bucket, in order, skipping unnamed entries.
    pub fn reach_names(&self) -> Vec<&str> {
        self.reach
            .iter()
            .filter_map(|pick| pick.name.as_deref())
            .collect()
    }

    pub fn total(&self) -> usize {
        self.reach.len() + self.target.len() + self.safe.len()
    }
}
