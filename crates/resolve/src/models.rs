use serde::Serialize;

/// Ordered equivalent part numbers, as listed by the source table.
pub type SubstitutionList = Vec<String>;

/// Outcome of resolving a part query to a datasheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasheetResult {
    pub query: String,
    pub description: String,
    /// Absent when the part is listed but has no downloadable sheet.
    pub datasheet_url: Option<String>,
}

/// Outcome of resolving an exact designator to its substitutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionResult {
    /// The designator that was searched for.
    pub base: String,
    pub transistor_url: String,
    pub substitution_url: String,
    pub mpns: SubstitutionList,
}
