//! Request construction for both backends. Nothing here performs I/O.

use log::debug;

use super::client::ClientConfig;
use super::encoding::{contains_japanese, encode_name};
use super::request::RequestDescriptor;
use super::types::{
    CorporateKind, MetiNumberSearchOptions, NameSearchOptions, NumberOptions, NumberSearchOptions,
    SearchKind, SearchTarget, SubResource,
};
use super::ApiType;
use crate::error::{CompanyInfoError, Result};

/// gBizINFO authentication header
pub const METI_TOKEN_HEADER: &str = "X-hojinInfo-api-token";

const METI_HOJIN_PATH: &str = "/hojin/v1/hojin";

/// Lowest MOF protocol version that serves name search
const MIN_NAME_SEARCH_VERSION: f64 = 2.0;

/// One gBizINFO sub-resource request of a detailed lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRequest {
    pub resource: SubResource,
    /// Path relative to the base URL, used in failure placeholders
    pub path: String,
    pub request: RequestDescriptor,
}

/// Requests needed to answer one number search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupPlan {
    Single(RequestDescriptor),
    Detailed {
        base: RequestDescriptor,
        details: Vec<SubRequest>,
    },
}

/// Build the request plan for a number search.
///
/// The options must carry the same backend tag as the configuration.
pub fn number_search(
    config: &ClientConfig,
    number: &str,
    options: &NumberOptions,
) -> Result<LookupPlan> {
    validate_config(config)?;

    match (config.api_type, options) {
        (ApiType::Mof, NumberOptions::Mof(options)) => {
            Ok(LookupPlan::Single(mof_number(config, number, options)))
        }
        (ApiType::Meti, NumberOptions::Meti(options)) => Ok(meti_number(config, number, options)),
        (api, options) => Err(CompanyInfoError::Config(format!(
            "{} number search options cannot be used with the {} API",
            options.backend(),
            api
        ))),
    }
}

/// Build the MOF number search request
pub fn mof_number(
    config: &ClientConfig,
    number: &str,
    options: &NumberSearchOptions,
) -> RequestDescriptor {
    RequestDescriptor::get(mof_endpoint(config, SearchKind::Number))
        .param("id", config.credential.as_str())
        .param("number", number)
        .param("type", config.response_type.code())
        .param_opt("history", options.history.as_ref().map(|h| h.code()))
}

/// Build the gBizINFO lookup, fanning out to sub-resources when `detail` is set
pub fn meti_number(
    config: &ClientConfig,
    number: &str,
    options: &MetiNumberSearchOptions,
) -> LookupPlan {
    let base_path = format!("{}/{}", METI_HOJIN_PATH, number);
    let base = meti_request(config, &base_path);

    if !options.detail {
        return LookupPlan::Single(base);
    }

    let details = SubResource::ALL
        .iter()
        .map(|resource| {
            let path = format!("{}/{}", base_path, resource.as_str());
            SubRequest {
                resource: *resource,
                request: meti_request(config, &path),
                path,
            }
        })
        .collect();

    LookupPlan::Detailed { base, details }
}

/// Build the MOF name search request.
///
/// A name containing Japanese script with no explicit `target` is searched
/// against JIS level 1-2 (fuzzy match).
pub fn name_search(
    config: &ClientConfig,
    name: &str,
    options: &NameSearchOptions,
) -> Result<RequestDescriptor> {
    if config.api_type != ApiType::Mof {
        return Err(CompanyInfoError::UnsupportedOperation {
            operation: "name search",
            backend: config.api_type,
        });
    }
    validate_config(config)?;

    let version = config.version_number();
    if version.map_or(true, |v| v < MIN_NAME_SEARCH_VERSION) {
        return Err(CompanyInfoError::Config(format!(
            "name search requires API version {} or later (configured: {})",
            MIN_NAME_SEARCH_VERSION, config.version
        )));
    }

    if let Some(kind) = options.kind.as_deref().filter(|k| !k.is_empty()) {
        CorporateKind::parse_list(kind)?;
    }

    let japanese = contains_japanese(name);
    let target = match options.target {
        Some(target) => Some(target),
        None if japanese => Some(SearchTarget::JisLevel12),
        None => None,
    };
    let encoded = encode_name(name);
    debug!(
        "Name search: japanese={}, target={:?}, encoded name={}",
        japanese, target, encoded
    );

    let request = RequestDescriptor::get(mof_endpoint(config, SearchKind::Name))
        .param("id", config.credential.as_str())
        .param("type", config.response_type.code())
        .param_opt("mode", options.mode.as_ref().map(|m| m.code()))
        .param_opt("target", target.as_ref().map(|t| t.code()))
        .param_opt("address", options.address.as_deref())
        .param_opt("kind", options.kind.as_deref())
        .param_opt("change", options.change.as_ref().map(|f| f.code()))
        .param_opt("close", options.close.as_ref().map(|f| f.code()))
        .param_opt("from", options.from.as_deref())
        .param_opt("to", options.to.as_deref())
        .param_opt("divide", options.divide.as_deref())
        .raw_param("name", encoded);

    Ok(request)
}

fn validate_config(config: &ClientConfig) -> Result<()> {
    if config.credential.trim().is_empty() {
        return Err(CompanyInfoError::Config(match config.api_type {
            ApiType::Mof => "application ID is empty (set MOF_APPLICATION_ID)".to_string(),
            ApiType::Meti => "API token is empty (set METI_API_TOKEN)".to_string(),
        }));
    }
    if !config.response_type.is_supported_by(config.api_type) {
        return Err(CompanyInfoError::Config(format!(
            "response type {:?} is not supported by the {} API",
            config.response_type, config.api_type
        )));
    }
    Ok(())
}

fn mof_endpoint(config: &ClientConfig, kind: SearchKind) -> String {
    format!("{}/{}/{}", config.base_url(), config.version, kind.path())
}

fn meti_request(config: &ClientConfig, path: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("{}{}", config.base_url(), path))
        .header(METI_TOKEN_HEADER, config.credential.as_str())
        .header("Content-Type", "application/json")
}
