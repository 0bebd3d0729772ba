use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle status of a controlled document.
///
/// Unlike the roster's derived audit status, this is a stored field: it is
/// persisted exactly as entered or imported. Wire names are the fixed
/// vocabulary of the upstream table service; unknown values round-trip
/// verbatim through `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocStatus {
    Current,
    UnderReview,
    Obsolete,
    Other(String),
}

impl DocStatus {
    pub fn parse_wire(value: &str) -> Self {
        match value.trim() {
            "Vigente" => Self::Current,
            "En Revisión" => Self::UnderReview,
            "Obsoleto" => Self::Obsolete,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn wire_name(&self) -> &str {
        match self {
            Self::Current => "Vigente",
            Self::UnderReview => "En Revisión",
            Self::Obsolete => "Obsoleto",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for DocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl Serialize for DocStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for DocStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse_wire(&s))
    }
}

/// One row of the controlled-document register.
///
/// Serde renames match the upstream table columns, so these records go over
/// the wire and into bulk exports without a separate mapping layer.
/// `None` on a date field is the explicit missing marker for values the
/// importer could not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "revision")]
    pub revision: String,
    #[serde(rename = "fecha_emision")]
    pub issue_date: Option<NaiveDate>,
    #[serde(rename = "proxima_revision")]
    pub next_review_date: Option<NaiveDate>,
    #[serde(rename = "area")]
    pub area: String,
    #[serde(rename = "estatus")]
    pub status: DocStatus,
    #[serde(rename = "tipo_documento")]
    pub document_type: String,
    #[serde(rename = "link_documento")]
    pub link: String,
    #[serde(rename = "responsable")]
    pub owner: String,
}
