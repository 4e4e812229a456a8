//! Typed view over the traits applied to a shape.
//!
//! Every trait stays available raw by id. The handful of traits the
//! generator reasons about are decoded once at load time into typed
//! fields, so callers check presence through an accessor instead of
//! re-parsing JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::ShapeId;
use crate::error::CodegenError;

pub const HTTP_API_KEY_AUTH: &str = "smithy.api#httpApiKeyAuth";
pub const HTTP_BASIC_AUTH: &str = "smithy.api#httpBasicAuth";
pub const HTTP_BEARER_AUTH: &str = "smithy.api#httpBearerAuth";
pub const HTTP_DIGEST_AUTH: &str = "smithy.api#httpDigestAuth";
pub const SIGV4: &str = "aws.auth#sigv4";
pub const SIGV4A: &str = "aws.auth#sigv4a";
pub const AUTH: &str = "smithy.api#auth";
pub const OPTIONAL_AUTH: &str = "smithy.api#optionalAuth";
pub const AUTH_DEFINITION: &str = "smithy.api#authDefinition";
pub const ENDPOINT_RULE_SET: &str = "smithy.rules#endpointRuleSet";
pub const CLIENT_CONTEXT_PARAMS: &str = "smithy.rules#clientContextParams";

/// Auth traits recognized without a trait definition in the model.
pub const BUILTIN_AUTH_DEFINITIONS: [&str; 6] = [
    HTTP_API_KEY_AUTH,
    HTTP_BASIC_AUTH,
    HTTP_BEARER_AUTH,
    HTTP_DIGEST_AUTH,
    SIGV4,
    SIGV4A,
];

/// Where an API key is placed on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

impl fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKeyLocation::Header => write!(f, "header"),
            ApiKeyLocation::Query => write!(f, "query"),
        }
    }
}

/// `@httpApiKeyAuth` value. `name` and `in` are required, `scheme` is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpApiKeyAuthTrait {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ApiKeyLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

/// `@clientContextParams` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContextParam {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// `@endpointRuleSet` value. Only the parameter set is interpreted here;
/// each parameter node is compiled later by
/// [`ParameterDescriptor::compile`](crate::endpoint::ParameterDescriptor::compile).
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRuleSet {
    pub version: Option<String>,
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Traits {
    raw: BTreeMap<ShapeId, Value>,
    http_api_key_auth: Option<HttpApiKeyAuthTrait>,
    auth: Option<Vec<ShapeId>>,
    endpoint_rule_set: Option<EndpointRuleSet>,
    client_context_params: Option<BTreeMap<String, ClientContextParam>>,
}

impl Traits {
    /// Decode the raw trait map of the shape `owner`.
    pub fn from_raw(owner: &str, raw: BTreeMap<String, Value>) -> Result<Self, CodegenError> {
        let mut traits = Traits::default();
        for (id, value) in raw {
            let location = format!("{owner} @{id}");
            match id.as_str() {
                HTTP_API_KEY_AUTH => {
                    let decoded = serde_json::from_value(value.clone())
                        .map_err(|e| CodegenError::malformed(&location, e.to_string()))?;
                    traits.http_api_key_auth = Some(decoded);
                }
                AUTH => {
                    let ids: Vec<String> = serde_json::from_value(value.clone())
                        .map_err(|e| CodegenError::malformed(&location, e.to_string()))?;
                    let ids = ids
                        .iter()
                        .map(|s| ShapeId::parse(s))
                        .collect::<Result<Vec<_>, _>>()?;
                    traits.auth = Some(ids);
                }
                ENDPOINT_RULE_SET => {
                    traits.endpoint_rule_set = Some(decode_rule_set(&location, &value)?);
                }
                CLIENT_CONTEXT_PARAMS => {
                    let decoded = serde_json::from_value(value.clone())
                        .map_err(|e| CodegenError::malformed(&location, e.to_string()))?;
                    traits.client_context_params = Some(decoded);
                }
                _ => {}
            }
            traits.raw.insert(ShapeId::parse(&id)?, value);
        }
        Ok(traits)
    }

    pub fn has(&self, trait_id: &str) -> bool {
        self.raw.contains_key(trait_id)
    }

    pub fn get(&self, trait_id: &str) -> Option<&Value> {
        self.raw.get(trait_id)
    }

    /// Ids of every applied trait, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &ShapeId> {
        self.raw.keys()
    }

    pub fn http_api_key_auth(&self) -> Option<&HttpApiKeyAuthTrait> {
        self.http_api_key_auth.as_ref()
    }

    /// Like [`http_api_key_auth`](Self::http_api_key_auth), for callers
    /// that already established the trait is applied to `owner`.
    pub fn expect_http_api_key_auth(
        &self,
        owner: &ShapeId,
    ) -> Result<&HttpApiKeyAuthTrait, CodegenError> {
        self.http_api_key_auth
            .as_ref()
            .ok_or_else(|| CodegenError::MissingTrait {
                shape: owner.clone(),
                trait_id: HTTP_API_KEY_AUTH,
            })
    }

    /// `@auth` scheme list, in declared priority order.
    pub fn auth(&self) -> Option<&[ShapeId]> {
        self.auth.as_deref()
    }

    pub fn optional_auth(&self) -> bool {
        self.has(OPTIONAL_AUTH)
    }

    pub fn endpoint_rule_set(&self) -> Option<&EndpointRuleSet> {
        self.endpoint_rule_set.as_ref()
    }

    pub fn client_context_params(&self) -> Option<&BTreeMap<String, ClientContextParam>> {
        self.client_context_params.as_ref()
    }
}

fn decode_rule_set(location: &str, value: &Value) -> Result<EndpointRuleSet, CodegenError> {
    let obj = value
        .as_object()
        .ok_or_else(|| CodegenError::malformed(location, "rule set is not an object"))?;
    let version = match obj.get("version") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(CodegenError::malformed(location, "`version` must be a string")),
    };
    let parameters = match obj.get("parameters") {
        None => Map::new(),
        Some(Value::Object(params)) => params.clone(),
        Some(_) => {
            return Err(CodegenError::malformed(
                location,
                "`parameters` must be an object",
            ))
        }
    };
    Ok(EndpointRuleSet {
        version,
        parameters,
    })
}
