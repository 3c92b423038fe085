//! Organ identifiers, metadata records and the keyword table used to map
//! exported mesh names onto organs.

use crate::error::ViewerError;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganId {
    Heart,
    Lungs,
    Brain,
    Skeleton,
    Tusk,
    Trunk,
    Body,
}

impl OrganId {
    pub const ALL: [OrganId; 7] = [
        OrganId::Heart,
        OrganId::Lungs,
        OrganId::Brain,
        OrganId::Skeleton,
        OrganId::Tusk,
        OrganId::Trunk,
        OrganId::Body,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrganId::Heart => "heart",
            OrganId::Lungs => "lungs",
            OrganId::Brain => "brain",
            OrganId::Skeleton => "skeleton",
            OrganId::Tusk => "tusk",
            OrganId::Trunk => "trunk",
            OrganId::Body => "body",
        }
    }
}

impl fmt::Display for OrganId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrganId::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown organ id '{s}'"))
    }
}

/// Keyword table checked in order; the first keyword contained in the
/// (lowercased) part name wins. English and Indonesian names.
pub const KEYWORD_TABLE: [(&str, OrganId); 12] = [
    ("heart", OrganId::Heart),
    ("jantung", OrganId::Heart),
    ("lung", OrganId::Lungs),
    ("paru", OrganId::Lungs),
    ("brain", OrganId::Brain),
    ("otak", OrganId::Brain),
    ("skeleton", OrganId::Skeleton),
    ("tulang", OrganId::Skeleton),
    ("tusk", OrganId::Tusk),
    ("gading", OrganId::Tusk),
    ("trunk", OrganId::Trunk),
    ("belalai", OrganId::Trunk),
];

pub fn match_keyword(name: &str) -> Option<OrganId> {
    if name.is_empty() {
        return None;
    }
    let lower = name.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(kw, _)| lower.contains(kw))
        .map(|(_, id)| *id)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganRecord {
    pub id: OrganId,
    pub display_name: String,
    #[serde(default)]
    pub short_desc: String,
    #[serde(default)]
    pub long_desc: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct OrganCatalog {
    records: FnvHashMap<OrganId, OrganRecord>,
}

impl OrganCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from records; on duplicate ids the first record wins.
    pub fn from_records(records: impl IntoIterator<Item = OrganRecord>) -> Self {
        let mut map = FnvHashMap::default();
        for r in records {
            if map.contains_key(&r.id) {
                log::warn!("[meta] duplicate organ id '{}' ignored", r.id);
                continue;
            }
            map.insert(r.id, r);
        }
        Self { records: map }
    }

    /// Parse the static metadata file (a JSON array of records).
    ///
    /// Unknown ids are skipped with a warning rather than failing the whole
    /// file, so one bad entry does not hide every description.
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| ViewerError::MetadataUnavailable(e.to_string()))?;
        let mut records = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<OrganRecord>(value) {
                Ok(r) => records.push(r),
                Err(e) => log::warn!("[meta] skipping record: {}", e),
            }
        }
        Ok(Self::from_records(records))
    }

    pub fn get(&self, id: OrganId) -> Option<&OrganRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
