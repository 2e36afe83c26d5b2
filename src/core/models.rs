use indexmap::IndexMap;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

/// One row of the course table, keyed on the wire the way the backend exposes
/// its spreadsheet columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "Course_Name", default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(rename = "Category", default, deserialize_with = "null_as_empty")]
    pub category: String,

    /// Kept exactly as the backend sent it; fractional values survive a save.
    #[serde(rename = "ECs", default, deserialize_with = "finite_number")]
    pub credits: Option<f64>,

    /// Free text such as "1, 3"; never parsed here.
    #[serde(rename = "Quarter", default, deserialize_with = "null_as_empty")]
    pub quarter: String,

    #[serde(rename = "Year", default, deserialize_with = "lenient_int")]
    pub year: Option<i64>,

    #[serde(rename = "Selected__Y_N", default, deserialize_with = "null_as_false")]
    pub selected: bool,

    #[serde(rename = "Notes", default, deserialize_with = "null_as_empty")]
    pub notes: String,

    #[serde(rename = "Prerequisite", default, deserialize_with = "null_as_empty")]
    pub prerequisite: String,
}

/// A field of [`CourseRecord`] together with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseField {
    Name(String),
    Category(String),
    Credits(Option<f64>),
    Quarter(String),
    Year(Option<i64>),
    Selected(bool),
    Notes(String),
    Prerequisite(String),
}

impl CourseRecord {
    pub fn credits_or_zero(&self) -> f64 {
        self.credits.unwrap_or(0.0)
    }

    /// Returns a copy of this record with a single field replaced.
    pub fn with_field(&self, field: CourseField) -> Self {
        let mut next = self.clone();
        match field {
            CourseField::Name(value) => next.name = value,
            CourseField::Category(value) => next.category = value,
            CourseField::Credits(value) => next.credits = value,
            CourseField::Quarter(value) => next.quarter = value,
            CourseField::Year(value) => next.year = value,
            CourseField::Selected(value) => next.selected = value,
            CourseField::Notes(value) => next.notes = value,
            CourseField::Prerequisite(value) => next.prerequisite = value,
        }
        next
    }
}

/// Category vocabulary and overflow bucket, as served by `GET /settings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub required_ecs: IndexMap<String, i64>,
    #[serde(default)]
    pub overflow_target: String,
}

impl Settings {
    /// Category names in the order the backend serialized them.
    pub fn categories(&self) -> Vec<String> {
        self.required_ecs.keys().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendStatus {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Required_ECs", default)]
    pub required_ecs: f64,
    #[serde(rename = "Selected_ECs", default)]
    pub selected_ecs: f64,
    #[serde(rename = "Remaining_ECs", default)]
    pub remaining_ecs: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    pub total_selected_ecs: f64,
    #[serde(default)]
    pub rows: Vec<SummaryRow>,
    #[serde(default)]
    pub overflow_target: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn finite_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.filter(|v| v.is_finite()))
}

// The backend stores numbers in a spreadsheet and hands them back as floats.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).map(|v| v.round() as i64))
}
