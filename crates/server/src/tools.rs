//! Tool catalog and dispatch.

use mcp::catalog::{DEFAULT_COUNT, MAX_COUNT, MIN_COUNT};
use mcp::{Gender, Tool, ToolName};
use serde_json::{Map, Value, json};

use crate::error::ToolError;
use crate::profile::{ProfileQuery, ProfileSource, format_profile};

/// The static catalog served by `GET /mcp/tools`.
///
/// The schemas are for discovery only; arguments are checked by hand in
/// [`ToolService::call`].
pub fn catalog() -> Vec<Tool> {
    ToolName::ALL.into_iter().map(definition).collect()
}

fn definition(name: ToolName) -> Tool {
    let (description, input_schema) = match name {
        ToolName::GetRandomUser => (
            "Fetch a single random user profile.",
            json!({"type": "object", "properties": {}}),
        ),
        ToolName::GetMultipleUsers => (
            "Fetch multiple random user profiles (default 5).",
            json!({
                "type": "object",
                "properties": {
                    "count": {
                        "type": "integer",
                        "default": DEFAULT_COUNT,
                        "minimum": MIN_COUNT,
                        "maximum": MAX_COUNT
                    }
                },
                "required": []
            }),
        ),
        ToolName::GetUserByGender => (
            "Fetch a random user profile by gender.",
            json!({
                "type": "object",
                "properties": {
                    "gender": {"type": "string", "enum": ["male", "female"]}
                },
                "required": ["gender"]
            }),
        ),
    };

    Tool {
        name: name.as_str().to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Executes catalog tools against a profile source.
#[derive(Debug)]
pub struct ToolService<S> {
    source: S,
}

impl<S: ProfileSource> ToolService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn tools(&self) -> Vec<Tool> {
        catalog()
    }

    /// Route a named call to its operation.
    pub async fn call(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<String, ToolError> {
        let tool: ToolName = name
            .parse()
            .map_err(|_| ToolError::NotFound(name.to_string()))?;

        match tool {
            ToolName::GetRandomUser => self.get_random_user().await,
            ToolName::GetMultipleUsers => {
                let count = count_argument(arguments)?;
                self.get_multiple_users(count).await
            }
            ToolName::GetUserByGender => {
                let gender = gender_argument(arguments)?;
                self.get_user_by_gender(gender).await
            }
        }
    }

    pub async fn get_random_user(&self) -> Result<String, ToolError> {
        let records = self.source.fetch(ProfileQuery::One).await?;
        first_profile(&records)
    }

    /// Fetch `count` profiles in one upstream call, separated by blank lines.
    pub async fn get_multiple_users(&self, count: i64) -> Result<String, ToolError> {
        let count = u32::try_from(count)
            .ok()
            .filter(|_| (MIN_COUNT..=MAX_COUNT).contains(&count))
            .ok_or(ToolError::CountOutOfRange(count))?;

        let records = self.source.fetch(ProfileQuery::Many(count)).await?;
        if records.is_empty() {
            return Err(ToolError::InvalidResponse("no profiles returned".into()));
        }
        // The block count is whatever upstream sent; a short page is passed through.
        if records.len() != count as usize {
            tracing::warn!(
                requested = count,
                returned = records.len(),
                "profile API returned a different number of records"
            );
        }

        let profiles = records
            .iter()
            .map(format_profile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles.join("\n\n"))
    }

    pub async fn get_user_by_gender(&self, gender: Gender) -> Result<String, ToolError> {
        let records = self.source.fetch(ProfileQuery::ByGender(gender)).await?;
        first_profile(&records)
    }
}

fn first_profile(records: &[Value]) -> Result<String, ToolError> {
    let record = records
        .first()
        .ok_or_else(|| ToolError::InvalidResponse("no profiles returned".into()))?;
    format_profile(record)
}

/// `count` defaults when absent or null; anything else must be an integer.
fn count_argument(arguments: &Map<String, Value>) -> Result<i64, ToolError> {
    match arguments.get("count") {
        None | Some(Value::Null) => Ok(DEFAULT_COUNT),
        Some(value) => match (value.as_i64(), value.as_u64()) {
            (Some(count), _) => Ok(count),
            // Larger than i64::MAX.
            (None, Some(_)) => Err(ToolError::CountOutOfRange(i64::MAX)),
            (None, None) => Err(ToolError::CountNotInteger),
        },
    }
}

fn gender_argument(arguments: &Map<String, Value>) -> Result<Gender, ToolError> {
    match arguments.get("gender") {
        None | Some(Value::Null) => Err(ToolError::GenderRequired),
        Some(Value::String(s)) if s.is_empty() => Err(ToolError::GenderRequired),
        Some(Value::String(s)) => s.parse().map_err(|_| ToolError::InvalidGender),
        Some(_) => Err(ToolError::InvalidGender),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::tests::sample_record;
    use std::sync::Mutex;

    /// Returns canned records and remembers the queries it saw.
    #[derive(Default)]
    struct FakeSource {
        queries: Mutex<Vec<ProfileQuery>>,
        failure: Option<ToolError>,
    }

    impl FakeSource {
        fn failing(error: ToolError) -> Self {
            Self {
                failure: Some(error),
                ..Default::default()
            }
        }

        fn queries(&self) -> Vec<ProfileQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl ProfileSource for FakeSource {
        async fn fetch(&self, query: ProfileQuery) -> Result<Vec<Value>, ToolError> {
            self.queries.lock().unwrap().push(query);
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            let count = match query {
                ProfileQuery::Many(count) => count,
                _ => 1,
            };
            Ok((0..count).map(|i| sample_record(&format!("User{i}"))).collect())
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("arguments must be an object"),
        }
    }

    #[test]
    fn catalog_lists_three_tools_with_schemas() {
        let tools = catalog();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["get_random_user", "get_multiple_users", "get_user_by_gender"]
        );
        assert_eq!(tools[1].input_schema["properties"]["count"]["maximum"], 10);
        assert_eq!(tools[2].input_schema["required"], json!(["gender"]));
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let service = ToolService::new(FakeSource::default());
        let err = service.call("get_weather", &Map::new()).await.unwrap_err();
        assert_eq!(err, ToolError::NotFound("get_weather".into()));
        assert!(service.source.queries().is_empty());
    }

    #[tokio::test]
    async fn random_user_formats_first_record() {
        let service = ToolService::new(FakeSource::default());
        let text = service.call("get_random_user", &Map::new()).await.unwrap();
        assert!(text.starts_with("Full Name: Ms User0 Lindqvist\n"));
        assert_eq!(text.lines().count(), 6);
        assert_eq!(service.source.queries(), [ProfileQuery::One]);
    }

    #[tokio::test]
    async fn multiple_users_joins_blocks_with_blank_line() {
        let service = ToolService::new(FakeSource::default());
        for count in [1, 3, 10] {
            let text = service
                .call("get_multiple_users", &args(json!({"count": count})))
                .await
                .unwrap();
            let blocks: Vec<&str> = text.split("\n\n").collect();
            assert_eq!(blocks.len(), count as usize);
            assert!(blocks.iter().all(|b| b.lines().count() == 6));
        }
    }

    #[tokio::test]
    async fn multiple_users_defaults_to_five() {
        let service = ToolService::new(FakeSource::default());
        service.call("get_multiple_users", &Map::new()).await.unwrap();
        service
            .call("get_multiple_users", &args(json!({"count": null})))
            .await
            .unwrap();
        assert_eq!(
            service.source.queries(),
            [ProfileQuery::Many(5), ProfileQuery::Many(5)]
        );
    }

    #[tokio::test]
    async fn count_out_of_range_never_reaches_upstream() {
        let service = ToolService::new(FakeSource::default());
        for count in [json!(0), json!(11), json!(-3), json!(u64::MAX)] {
            let err = service
                .call("get_multiple_users", &args(json!({"count": count})))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Error: Count must be between 1 and 10");
        }
        assert!(service.source.queries().is_empty());
    }

    #[tokio::test]
    async fn non_integer_count_is_rejected() {
        let service = ToolService::new(FakeSource::default());
        for count in [json!("3"), json!(2.5)] {
            let err = service
                .call("get_multiple_users", &args(json!({"count": count})))
                .await
                .unwrap_err();
            assert_eq!(err, ToolError::CountNotInteger);
        }
    }

    #[tokio::test]
    async fn gender_is_validated() {
        let service = ToolService::new(FakeSource::default());

        let err = service
            .call("get_user_by_gender", &args(json!({"gender": "other"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error: Gender must be 'male' or 'female'");

        for arguments in [json!({}), json!({"gender": ""}), json!({"gender": null})] {
            let err = service
                .call("get_user_by_gender", &args(arguments))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Error: Gender parameter is required");
        }

        let err = service
            .call("get_user_by_gender", &args(json!({"gender": 1})))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::InvalidGender);
        assert!(service.source.queries().is_empty());
    }

    #[tokio::test]
    async fn gender_filter_is_forwarded() {
        let service = ToolService::new(FakeSource::default());
        service
            .call("get_user_by_gender", &args(json!({"gender": "female"})))
            .await
            .unwrap();
        assert_eq!(
            service.source.queries(),
            [ProfileQuery::ByGender(Gender::Female)]
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_passed_through() {
        let service = ToolService::new(FakeSource::failing(ToolError::Request(
            "connection refused".into(),
        )));
        let err = service.call("get_random_user", &Map::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Error: Request failed - connection refused");
    }

    #[tokio::test]
    async fn one_bad_record_fails_the_whole_listing() {
        struct Partial;
        impl ProfileSource for Partial {
            async fn fetch(&self, _query: ProfileQuery) -> Result<Vec<Value>, ToolError> {
                let mut broken = sample_record("B");
                broken.as_object_mut().unwrap().remove("phone");
                Ok(vec![sample_record("A"), broken])
            }
        }

        let service = ToolService::new(Partial);
        let err = service.get_multiple_users(2).await.unwrap_err();
        assert_eq!(err.to_string(), "Error: Missing data field - phone");
    }

    #[tokio::test]
    async fn empty_results_are_invalid() {
        struct Empty;
        impl ProfileSource for Empty {
            async fn fetch(&self, _query: ProfileQuery) -> Result<Vec<Value>, ToolError> {
                Ok(Vec::new())
            }
        }

        let service = ToolService::new(Empty);
        let err = service.get_random_user().await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidResponse(_)));

        let err = service.get_multiple_users(3).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: Invalid response - no profiles returned"
        );
    }

    #[tokio::test]
    async fn short_page_is_passed_through() {
        struct Short;
        impl ProfileSource for Short {
            async fn fetch(&self, _query: ProfileQuery) -> Result<Vec<Value>, ToolError> {
                Ok(vec![sample_record("Ada"), sample_record("Bea")])
            }
        }

        let text = ToolService::new(Short).get_multiple_users(3).await.unwrap();
        assert_eq!(text.split("\n\n").count(), 2);
    }
}
