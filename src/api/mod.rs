pub mod builder;
pub mod client;
pub mod encoding;
pub mod fanout;
pub mod http_client;
pub mod request;
pub mod types;

use std::fmt;

pub use client::{ClientConfig, CompanyInfoClient};
pub use http_client::{HttpGet, HttpResponse, ReqwestHttpClient};
pub use request::RequestDescriptor;

/// Backends supported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiType {
    /// National Tax Agency corporate number API (財務省・国税庁)
    #[default]
    Mof,
    /// gBizINFO business profile API (経済産業省)
    Meti,
}

impl ApiType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mof" | "nta" => Some(Self::Mof),
            "meti" | "gbiz" => Some(Self::Meti),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mof => "mof",
            Self::Meti => "meti",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mof => "法人番号システム Web-API",
            Self::Meti => "gBizINFO API",
        }
    }

    /// Default base URL for the backend
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Mof => "https://api.houjin-bangou.nta.go.jp",
            Self::Meti => "https://info.gbiz.go.jp",
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
