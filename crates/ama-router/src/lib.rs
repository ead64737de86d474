//! # ama-router
//!
//! HTTP client for the two external classification services:
//! - **Issue routing** (`civic-router`): classifies a civic issue and names the
//!   department and jurisdiction responsible for it.
//! - **Content moderation** (`civic-steward`): returns a verdict on a post,
//!   comment or promise before it is published.
//!
//! Both services are opaque. Failures surface as [`RouterError`]; nothing is
//! retried.

mod error;
mod http;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use error::RouterError;

use crate::http::{check_response, decode_body};

const ROUTING_FUNCTION: &str = "civic-router";
const MODERATION_FUNCTION: &str = "civic-steward";

// ── Types ──────────────────────────────────────────────────────────

/// Where an issue was observed. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl LocationContext {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A form the citizen must file with the department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredForm {
    pub form_id: String,
    pub form_name: String,
    pub template_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office_location: Option<String>,
}

/// Classification of a civic issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    pub issue_type: String,
    pub department_slug: String,
    pub department_name: String,
    pub jurisdiction: String,
    pub severity: f64,
    pub confidence: f64,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    #[serde(default)]
    pub required_forms: Option<Vec<RequiredForm>>,
    #[serde(default)]
    pub estimated_resolution_days: Option<u32>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub next_steps: Option<Vec<String>>,
    #[serde(default)]
    pub processing_time_ms: u64,
}

/// Moderation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approved,
    NeedsRevision,
    Blocked,
    Flagged,
}

impl Verdict {
    /// Whether content with this verdict may be published as is.
    #[must_use]
    pub const fn is_publishable(self) -> bool {
        matches!(self, Self::Approved)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub verdict: Verdict,
    #[serde(default)]
    pub reason: String,
    pub confidence: f64,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub processing_time_ms: u64,
}

#[derive(Serialize)]
struct RoutingRequest<'a> {
    issue_description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a LocationContext>,
    photos: &'a [String],
}

#[derive(Serialize)]
struct ModerationRequest<'a> {
    content_type: &'a str,
    content: &'a str,
}

// ── Client ─────────────────────────────────────────────────────────

/// Client for the routing and moderation functions under one base URL.
pub struct RouterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RouterClient {
    /// Build a client. Functions are reached at `{base_url}/{function}`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NotConfigured`] if `base_url` is blank, or
    /// [`RouterError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RouterError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(RouterError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("ama/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn function_url(&self, function: &str) -> String {
        format!("{}/{function}", self.base_url)
    }

    /// Classify an issue and find the responsible department.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if the request fails, the service answers with
    /// an error, or the body cannot be parsed.
    pub async fn route(
        &self,
        description: &str,
        location: &LocationContext,
        photos: &[String],
    ) -> Result<RoutingResult, RouterError> {
        let request = RoutingRequest {
            issue_description: description,
            location: (!location.is_empty()).then_some(location),
            photos,
        };
        let result: RoutingResult = self.invoke(ROUTING_FUNCTION, &request).await?;
        tracing::debug!(
            issue_type = %result.issue_type,
            department = %result.department_slug,
            confidence = result.confidence,
            "issue routed"
        );
        Ok(result)
    }

    /// Ask for a moderation verdict on a piece of content.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] if the request fails, the service answers with
    /// an error, or the body cannot be parsed.
    pub async fn moderate(
        &self,
        content_type: &str,
        content: &str,
    ) -> Result<ModerationResult, RouterError> {
        let request = ModerationRequest {
            content_type,
            content,
        };
        let result: ModerationResult = self.invoke(MODERATION_FUNCTION, &request).await?;
        if !result.verdict.is_publishable() {
            tracing::warn!(verdict = ?result.verdict, flags = ?result.flags, "content not approved");
        }
        Ok(result)
    }

    async fn invoke<B: Serialize + Sync, T: serde::de::DeserializeOwned>(
        &self,
        function: &str,
        body: &B,
    ) -> Result<T, RouterError> {
        let mut request = self.http.post(self.function_url(function)).json(body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }
        let resp = check_response(request.send().await?).await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        decode_body(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_base_url_is_not_configured() {
        let result = RouterClient::new("  ", None, Duration::from_secs(5));
        assert!(matches!(result, Err(RouterError::NotConfigured)));
    }

    #[test]
    fn function_urls_trim_trailing_slash() {
        let client =
            RouterClient::new("https://fn.example.org/v1/", Some(String::new()), Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.function_url(ROUTING_FUNCTION),
            "https://fn.example.org/v1/civic-router"
        );
        assert_eq!(client.api_key, None);
    }

    #[test]
    fn routing_request_omits_empty_location() {
        let empty = LocationContext::default();
        let body = serde_json::to_value(RoutingRequest {
            issue_description: "Burst pipe",
            location: (!empty.is_empty()).then_some(&empty),
            photos: &[],
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "issue_description": "Burst pipe", "photos": [] })
        );

        let located = LocationContext {
            ward: Some("Kilimani".into()),
            lat: Some(-1.29),
            ..Default::default()
        };
        let body = serde_json::to_value(RoutingRequest {
            issue_description: "Burst pipe",
            location: Some(&located),
            photos: &["https://img.example.org/1.jpg".to_string()],
        })
        .unwrap();
        assert_eq!(
            body["location"],
            serde_json::json!({ "lat": -1.29, "ward": "Kilimani" })
        );
    }

    #[test]
    fn routing_result_minimal_and_full() {
        let minimal: RoutingResult = serde_json::from_str(
            r#"{"issue_type":"water_leak","department_slug":"water","department_name":"Nairobi Water",
                "jurisdiction":"county","severity":3,"confidence":0.82}"#,
        )
        .unwrap();
        assert!(minimal.recommended_actions.is_empty());
        assert_eq!(minimal.required_forms, None);

        let full: RoutingResult = serde_json::from_str(
            r#"{"issue_type":"pothole","department_slug":"roads","department_name":"KURA",
                "jurisdiction":"national","severity":4,"confidence":0.9,
                "recommended_actions":["Photograph the site"],
                "required_forms":[{"form_id":"r1","form_name":"Road damage report","template_url":"https://x/r1.pdf"}],
                "estimated_resolution_days":14,
                "contact_info":{"phone":"0700000000"},
                "next_steps":["Await inspection"],
                "processing_time_ms":412}"#,
        )
        .unwrap();
        assert_eq!(full.estimated_resolution_days, Some(14));
        assert_eq!(full.required_forms.map(|f| f.len()), Some(1));
        assert_eq!(
            full.contact_info.and_then(|c| c.phone).as_deref(),
            Some("0700000000")
        );
    }

    #[test]
    fn verdicts_parse_screaming_case() {
        let result: ModerationResult = serde_json::from_str(
            r#"{"verdict":"NEEDS_REVISION","reason":"Contains a phone number","confidence":0.7,
                "flags":["pii"],"processing_time_ms":90}"#,
        )
        .unwrap();
        assert_eq!(result.verdict, Verdict::NeedsRevision);
        assert!(!result.verdict.is_publishable());
        assert!(Verdict::Approved.is_publishable());
    }
}
