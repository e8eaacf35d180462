//! Keyword routing of user input.
//!
//! A line is sent to the tool service only when it mentions
//! `"random user"`; everything else goes to the LLM untouched. Which tool is
//! chosen is decided by [`RULES`], evaluated top to bottom, first match wins:
//!
//! 1. `"multiple"` or `"users"` → `get_multiple_users`, `count` = first
//!    integer token (default 5)
//! 2. `"female"` → `get_user_by_gender` with `female`
//! 3. `"male"` → `get_user_by_gender` with `male`
//! 4. otherwise → `get_random_user`
//!
//! `"male"` is a substring of `"female"`, so the female rule must stay above
//! the male rule.

use mcp::catalog::DEFAULT_COUNT;
use mcp::{Gender, ToolName};
use serde_json::{Map, Value};

/// Phrase that switches a line from the LLM to the tool service.
pub const TRIGGER: &str = "random user";

/// A tool call decided by the router.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub name: ToolName,
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    fn new(name: ToolName) -> Self {
        Self {
            name,
            arguments: Map::new(),
        }
    }

    fn with_argument(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.to_string(), value.into());
        self
    }
}

/// Where a line of input should go.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Tool(ToolRequest),
    Llm,
}

/// One routing rule: any keyword present selects `build`.
pub struct Rule {
    pub keywords: &'static [&'static str],
    build: fn(&str) -> ToolRequest,
}

impl Rule {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Ordered rules applied to lines containing [`TRIGGER`].
pub const RULES: &[Rule] = &[
    Rule {
        keywords: &["multiple", "users"],
        build: multiple_users,
    },
    Rule {
        keywords: &["female"],
        build: female_user,
    },
    Rule {
        keywords: &["male"],
        build: male_user,
    },
];

/// Classify one line of input.
pub fn route(input: &str) -> Route {
    let text = input.to_lowercase();
    if !text.contains(TRIGGER) {
        return Route::Llm;
    }

    let request = match RULES.iter().find(|rule| rule.matches(&text)) {
        Some(rule) => (rule.build)(&text),
        None => ToolRequest::new(ToolName::GetRandomUser),
    };
    Route::Tool(request)
}

fn multiple_users(text: &str) -> ToolRequest {
    ToolRequest::new(ToolName::GetMultipleUsers).with_argument("count", extract_count(text))
}

fn female_user(_text: &str) -> ToolRequest {
    by_gender(Gender::Female)
}

fn male_user(_text: &str) -> ToolRequest {
    by_gender(Gender::Male)
}

fn by_gender(gender: Gender) -> ToolRequest {
    ToolRequest::new(ToolName::GetUserByGender).with_argument("gender", gender.as_str())
}

/// First whitespace-separated token that parses as an integer.
///
/// No bounds are applied here; the tool service rejects out-of-range counts.
fn extract_count(text: &str) -> i64 {
    text.split_whitespace()
        .find_map(|token| token.parse().ok())
        .unwrap_or(DEFAULT_COUNT)
}
