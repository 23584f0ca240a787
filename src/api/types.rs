use serde::{Deserialize, Serialize};

use super::ApiType;
use crate::error::{CompanyInfoError, Result};

/// Search kind, which also names the MOF endpoint path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Number,
    Name,
}

impl SearchKind {
    /// Path segment on the MOF API
    pub fn path(&self) -> &'static str {
        match self {
            Self::Number => "num",
            Self::Name => "name",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "number" | "num" => Some(Self::Number),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Response format requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// CSV, Shift-JIS (`type=01`)
    CsvShiftJis,
    /// CSV, Unicode (`type=02`)
    CsvUnicode,
    /// XML, Unicode (`type=12`)
    XmlUnicode,
    /// gBizINFO always answers JSON; there is no wire parameter
    Json,
}

impl ResponseType {
    /// Value of the `type` wire parameter
    pub fn code(&self) -> &'static str {
        match self {
            Self::CsvShiftJis => "01",
            Self::CsvUnicode => "02",
            Self::XmlUnicode => "12",
            Self::Json => "json",
        }
    }

    /// Default format for a backend
    pub fn default_for(api: ApiType) -> Self {
        match api {
            ApiType::Mof => Self::XmlUnicode,
            ApiType::Meti => Self::Json,
        }
    }

    /// Resolve a user-facing format name against a backend
    pub fn for_format(api: ApiType, format: &str) -> Result<Self> {
        let format = format.to_lowercase();
        match (api, format.as_str()) {
            (ApiType::Mof, "csv-sjis") => Ok(Self::CsvShiftJis),
            (ApiType::Mof, "csv") => Ok(Self::CsvUnicode),
            (ApiType::Mof, "xml") => Ok(Self::XmlUnicode),
            (ApiType::Meti, "json") => Ok(Self::Json),
            (ApiType::Mof, _) => Err(CompanyInfoError::Config(format!(
                "format '{}' is not supported by the mof API (valid: csv-sjis, csv, xml)",
                format
            ))),
            (ApiType::Meti, _) => Err(CompanyInfoError::Config(format!(
                "format '{}' is not supported by the meti API (valid: json)",
                format
            ))),
        }
    }

    /// Whether the backend can serve this format
    pub fn is_supported_by(&self, api: ApiType) -> bool {
        match api {
            ApiType::Mof => !matches!(self, Self::Json),
            ApiType::Meti => matches!(self, Self::Json),
        }
    }
}

/// Corporate kind codes accepted by the `kind` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorporateKind {
    Government,
    LocalGovernment,
    RegisteredCorporation,
    ForeignCorporation,
}

impl CorporateKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Government => "01",
            Self::LocalGovernment => "02",
            Self::RegisteredCorporation => "03",
            Self::ForeignCorporation => "04",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Government),
            "02" => Some(Self::LocalGovernment),
            "03" => Some(Self::RegisteredCorporation),
            "04" => Some(Self::ForeignCorporation),
            _ => None,
        }
    }

    /// Parse a comma-separated `kind` value such as `"03,04"`
    pub fn parse_list(value: &str) -> Result<Vec<Self>> {
        let kinds = value
            .split(',')
            .map(|code| {
                let code = code.trim();
                Self::from_code(code).ok_or_else(|| {
                    CompanyInfoError::InvalidInput(format!(
                        "unknown corporate kind '{}' (valid: 01, 02, 03, 04)",
                        code
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if kinds.len() > 4 {
            return Err(CompanyInfoError::InvalidInput(format!(
                "at most 4 corporate kinds may be given, got {}",
                kinds.len()
            )));
        }
        Ok(kinds)
    }
}

/// Name search match mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Prefix match (API default)
    #[serde(rename = "1")]
    PrefixMatch,
    #[serde(rename = "2")]
    PartialMatch,
}

impl SearchMode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::PrefixMatch => "1",
            Self::PartialMatch => "2",
        }
    }
}

/// Character set searched by a name search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchTarget {
    /// JIS level 1-2, fuzzy match
    #[serde(rename = "1")]
    JisLevel12,
    /// JIS level 1-4, exact match
    #[serde(rename = "2")]
    JisLevel14,
    /// Registered English names
    #[serde(rename = "3")]
    English,
}

impl SearchTarget {
    pub fn code(&self) -> &'static str {
        match self {
            Self::JisLevel12 => "1",
            Self::JisLevel14 => "2",
            Self::English => "3",
        }
    }
}

/// `"0"` / `"1"` switch used by history, change and close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "0")]
    Exclude,
    #[serde(rename = "1")]
    Include,
}

impl Flag {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Exclude => "0",
            Self::Include => "1",
        }
    }
}

/// Options for a number search on the MOF API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberSearchOptions {
    /// Include change history (`history`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Flag>,
}

/// Options for a name search on the MOF API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameSearchOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SearchTarget>,
    /// Prefecture code, or prefecture + municipality code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Comma-separated corporate kind codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<Flag>,
    /// Designation date range start, YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Designation date range end, YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Page of a divided result set (1-99999)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divide: Option<String>,
}

/// Options for a number search on the gBizINFO API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetiNumberSearchOptions {
    /// Also fetch the seven sub-resources
    #[serde(default)]
    pub detail: bool,
}

/// Number search options, tagged by the backend they belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberOptions {
    Mof(NumberSearchOptions),
    Meti(MetiNumberSearchOptions),
}

impl NumberOptions {
    pub fn backend(&self) -> ApiType {
        match self {
            Self::Mof(_) => ApiType::Mof,
            Self::Meti(_) => ApiType::Meti,
        }
    }

    /// Default options for a backend
    pub fn default_for(api: ApiType) -> Self {
        match api {
            ApiType::Mof => Self::Mof(NumberSearchOptions::default()),
            ApiType::Meti => Self::Meti(MetiNumberSearchOptions::default()),
        }
    }

    /// Parse a JSON options object using the schema of `api`
    pub fn from_json(api: ApiType, json: &str) -> Result<Self> {
        match api {
            ApiType::Mof => Ok(Self::Mof(serde_json::from_str(json)?)),
            ApiType::Meti => Ok(Self::Meti(serde_json::from_str(json)?)),
        }
    }
}

impl From<NumberSearchOptions> for NumberOptions {
    fn from(options: NumberSearchOptions) -> Self {
        Self::Mof(options)
    }
}

impl From<MetiNumberSearchOptions> for NumberOptions {
    fn from(options: MetiNumberSearchOptions) -> Self {
        Self::Meti(options)
    }
}

/// gBizINFO detail categories, in composite order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubResource {
    Certification,
    Commendation,
    Finance,
    Patent,
    Procurement,
    Subsidy,
    Workplace,
}

impl SubResource {
    pub const ALL: [SubResource; 7] = [
        Self::Certification,
        Self::Commendation,
        Self::Finance,
        Self::Patent,
        Self::Procurement,
        Self::Subsidy,
        Self::Workplace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certification => "certification",
            Self::Commendation => "commendation",
            Self::Finance => "finance",
            Self::Patent => "patent",
            Self::Procurement => "procurement",
            Self::Subsidy => "subsidy",
            Self::Workplace => "workplace",
        }
    }
}
