use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The four levels of the territorial hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// Województwo, the top-level division.
    #[serde(rename = "wojewodztwo")]
    Region,
    /// Powiat.
    #[serde(rename = "powiat")]
    County,
    /// Gmina (urban, rural or urban-rural).
    #[serde(rename = "gmina")]
    Municipality,
    /// Miasto na prawach powiatu: a city holding county rights.
    #[serde(rename = "miasto")]
    City,
}

impl UnitType {
    pub const ALL: [UnitType; 4] = [
        UnitType::Region,
        UnitType::County,
        UnitType::Municipality,
        UnitType::City,
    ];

    /// Map a dataset type code to a unit type.
    ///
    /// Accepts the Polish labels used by the generated dataset, the raw
    /// `typ_JST` registry codes, and the English names. Anything else
    /// (e.g. `dzielnica`) has no counterpart.
    pub fn from_source_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        match code.as_str() {
            "wojewodztwo" | "w" | "region" => Some(Self::Region),
            "powiat" | "p" | "county" => Some(Self::County),
            "gmina" | "gw" | "gm" | "gmw" | "municipality" => Some(Self::Municipality),
            "miasto" | "mnp" | "city" => Some(Self::City),
            _ => None,
        }
    }

    /// The label used in the dataset and in serialized output.
    pub fn source_label(self) -> &'static str {
        match self {
            Self::Region => "wojewodztwo",
            Self::County => "powiat",
            Self::Municipality => "gmina",
            Self::City => "miasto",
        }
    }

    /// County and municipality names are ambiguous without their region.
    pub fn shows_parent(self) -> bool {
        matches!(self, Self::County | Self::Municipality)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_label())
    }
}

/// One record of the reference dataset, as produced by the spreadsheet
/// conversion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUnitRecord {
    #[serde(deserialize_with = "de_flex_id")]
    pub id: Option<String>,
    pub name: String,
    pub parent_id: Option<String>,
    pub level: Option<u8>,
    pub kind: Option<String>,
    #[serde(rename = "type")]
    pub type_code: String,
    pub has_description: bool,
    pub email: Option<String>,
    pub office_name: Option<String>,
    #[serde(alias = "region")]
    pub voivodeship: Option<String>,
    pub county: Option<String>,
}

/// Width TERYT codes are padded to when a spreadsheet stored them as numbers.
const NUMERIC_ID_WIDTH: usize = 7;

/// Accept the id as a JSON string or number.
fn de_flex_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<FlexId>::deserialize(d)? {
        None => None,
        Some(FlexId::Text(s)) => Some(s),
        Some(FlexId::Number(n)) => Some(format!(
            "{:0>width$}",
            n.to_string(),
            width = NUMERIC_ID_WIDTH
        )),
    })
}

/// A unit of the territorial hierarchy, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritorialUnit {
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw contact field; may hold several addresses separated by `;` or `,`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
}

/// Why a dataset record did not become a unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("unknown type code {0:?}")]
    UnknownType(String),
    #[error("blank name")]
    BlankName,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// `fullName` of a unit: the name plus its region for ambiguous types.
pub fn full_name(
    name: &str,
    unit_type: UnitType,
    parent_name: Option<&str>,
    context_label: &str,
) -> String {
    match parent_name {
        Some(parent) if unit_type.shows_parent() => {
            format!("{name} ({context_label} {parent})")
        }
        _ => name.to_string(),
    }
}

impl TerritorialUnit {
    /// A unit without source metadata, as used by the fallback list.
    pub fn new(
        name: &str,
        unit_type: UnitType,
        parent_name: Option<&str>,
        context_label: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            unit_type,
            parent_name: parent_name.map(str::to_string),
            full_name: full_name(name, unit_type, parent_name, context_label),
            id: None,
            email: None,
            office_name: None,
            region: parent_name.map(str::to_string),
            county: None,
        }
    }

    /// Build a unit from a dataset record.
    pub fn from_record(record: RawUnitRecord, context_label: &str) -> Result<Self, SkipReason> {
        let unit_type = UnitType::from_source_code(&record.type_code)
            .ok_or_else(|| SkipReason::UnknownType(record.type_code.clone()))?;
        let name = record.name.trim();
        if name.is_empty() {
            return Err(SkipReason::BlankName);
        }
        let parent_name = non_empty(record.voivodeship);
        Ok(Self {
            full_name: full_name(name, unit_type, parent_name.as_deref(), context_label),
            name: name.to_string(),
            unit_type,
            region: parent_name.clone(),
            parent_name,
            id: non_empty(record.id),
            email: non_empty(record.email),
            office_name: non_empty(record.office_name),
            county: non_empty(record.county),
        })
    }
}
