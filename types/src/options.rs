//! Connector configuration supplied by the host

use crate::error::{ConnectorError, Result};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

pub const DEFAULT_APP_HOST: &str = "https://us.posthog.com";

/// Options entered by the user when configuring the data source
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorOptions {
    /// Base URL of the analytics instance
    #[serde(default = "default_app_host")]
    pub app_host: String,
    /// Project to query
    #[serde(default)]
    pub project_id: String,
    /// Personal API key with query read access
    #[serde(default)]
    pub api_key: String,
}

fn default_app_host() -> String {
    DEFAULT_APP_HOST.to_string()
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            app_host: default_app_host(),
            project_id: String::new(),
            api_key: String::new(),
        }
    }
}

impl ConnectorOptions {
    /// Reject options with a blank required field
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("appHost", &self.app_host),
            ("projectId", &self.project_id),
            ("apiKey", &self.api_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConnectorError::InvalidOptions { field });
            }
        }
        Ok(())
    }

    /// `appHost` without trailing slashes
    pub fn base_url(&self) -> &str {
        self.app_host.trim_end_matches('/')
    }
}

/// Input kind of a declared option
#[derive(Tsify, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
}

/// Declaration of one connector option, as shown in the host's settings form
#[derive(Tsify, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct OptionSpec {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secret: bool,
}

/// Option declarations keyed by option name, in form order
pub fn options_schema() -> Vec<(&'static str, OptionSpec)> {
    vec![
        (
            "appHost",
            OptionSpec {
                title: "API Host".into(),
                description: "Base URL of your PostHog instance for private endpoints.".into(),
                option_type: OptionType::String,
                default: Some(DEFAULT_APP_HOST.into()),
                required: true,
                secret: false,
            },
        ),
        (
            "projectId",
            OptionSpec {
                title: "Project ID".into(),
                description: "ID of the PostHog project you're trying to query data from. \
                              You can find this in Settings > Project > General."
                    .into(),
                option_type: OptionType::String,
                default: None,
                required: true,
                secret: false,
            },
        ),
        (
            "apiKey",
            OptionSpec {
                title: "Personal API Key".into(),
                description: "API key with access to the project and Read access to Query scope. \
                              You can create one in Settings > User > Personal API keys."
                    .into(),
                option_type: OptionType::String,
                default: None,
                required: true,
                secret: true,
            },
        ),
    ]
}
