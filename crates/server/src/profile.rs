//! Profile records from the external random user API.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use mcp::Gender;
use reqwest::Url;
use serde_json::Value;

use crate::config::ProfileApiConfig;
use crate::error::{Error, Result, ToolError};

/// A synthetic person, reduced to the fields the tools display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub title: String,
    pub first: String,
    pub last: String,
    pub country: String,
    pub age: String,
    pub phone: String,
    pub photo: String,
    pub street_number: String,
    pub street_name: String,
}

impl UserProfile {
    /// Extract a profile from one raw API record.
    ///
    /// Fields are looked up in display order; the first absent key is
    /// reported as [`ToolError::MissingField`].
    pub fn from_json(record: &Value) -> std::result::Result<Self, ToolError> {
        Ok(Self {
            title: field(record, &["name", "title"])?,
            first: field(record, &["name", "first"])?,
            last: field(record, &["name", "last"])?,
            country: field(record, &["location", "country"])?,
            age: field(record, &["dob", "age"])?,
            phone: field(record, &["phone"])?,
            photo: field(record, &["picture", "large"])?,
            street_number: field(record, &["location", "street", "number"])?,
            street_name: field(record, &["location", "street", "name"])?,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.title, self.first, self.last)
    }

    pub fn street_address(&self) -> String {
        format!("{} {}", self.street_number, self.street_name)
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Full Name: {}", self.full_name())?;
        writeln!(f, "Country: {}", self.country)?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Photo: {}", self.photo)?;
        writeln!(f, "Phone: {}", self.phone)?;
        write!(f, "Street Address: {}", self.street_address())
    }
}

/// Render one raw record as display text.
pub fn format_profile(record: &Value) -> std::result::Result<String, ToolError> {
    UserProfile::from_json(record).map(|profile| profile.to_string())
}

fn field(record: &Value, path: &[&str]) -> std::result::Result<String, ToolError> {
    let mut value = record;
    for key in path {
        value = value
            .get(key)
            .ok_or_else(|| ToolError::MissingField((*key).to_string()))?;
    }

    Ok(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Which profiles to ask the API for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileQuery {
    One,
    Many(u32),
    ByGender(Gender),
}

/// Source of raw profile records.
///
/// This is the seam between the tool logic and the network; tests supply
/// canned records through it.
pub trait ProfileSource: Send + Sync {
    /// Fetch the `results` array for a query.
    fn fetch(
        &self,
        query: ProfileQuery,
    ) -> impl Future<Output = std::result::Result<Vec<Value>, ToolError>> + Send;
}

/// The public randomuser.me API.
#[derive(Debug, Clone)]
pub struct RandomUserApi {
    client: reqwest::Client,
    base_url: Url,
}

impl RandomUserApi {
    /// Build a client from configuration.
    pub fn new(config: &ProfileApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::ProfileApiUrl(format!("{}: {e}", config.base_url)))?;

        if !config.verify_tls {
            tracing::warn!(
                url = %base_url,
                "TLS certificate verification is disabled for the profile API"
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn url(&self, query: ProfileQuery) -> Url {
        let mut url = self.base_url.clone();
        match query {
            ProfileQuery::One => {}
            ProfileQuery::Many(count) => {
                url.query_pairs_mut()
                    .append_pair("results", &count.to_string());
            }
            ProfileQuery::ByGender(gender) => {
                url.query_pairs_mut().append_pair("gender", gender.as_str());
            }
        }
        url
    }
}

impl ProfileSource for RandomUserApi {
    async fn fetch(&self, query: ProfileQuery) -> std::result::Result<Vec<Value>, ToolError> {
        let url = self.url(query);
        tracing::debug!(%url, "fetching profiles");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ToolError::Request(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ToolError::InvalidResponse(e.to_string()))?;

        results(body)
    }
}

fn results(body: Value) -> std::result::Result<Vec<Value>, ToolError> {
    match body {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(ToolError::InvalidResponse(
                "response has no results array".into(),
            )),
        },
        _ => Err(ToolError::InvalidResponse(
            "response is not a JSON object".into(),
        )),
    }
}
