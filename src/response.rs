//! Uniform workflow result shape.
//!
//! Every public workflow entry point resolves to a [`WorkflowResponse`] so
//! that no error crosses the boundary uncaught. Most downstream business
//! failures are reported as `200` with a descriptive title; only malformed
//! input and unexpected system failures escalate the status.

use serde::{Deserialize, Serialize};

/// Human-readable body of a workflow response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Short outcome title, e.g. `"Success"` or `"Mapping Error"`.
    pub title: String,
    /// Longer outcome description.
    pub description: String,
}

/// Structured result returned by every workflow invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    /// HTTP-analogous status code: 200, 400, 404, or 500.
    pub status_code: u16,
    /// Outcome title and description.
    pub body: ResponseBody,
}

impl WorkflowResponse {
    fn with_status(
        status_code: u16,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            body: ResponseBody {
                title: title.into(),
                description: description.into(),
            },
        }
    }

    /// Builds a `200` response, including business-logic soft failures.
    #[must_use]
    pub fn ok(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_status(200, title, description)
    }

    /// Builds a `400` response for malformed trigger input.
    #[must_use]
    pub fn bad_request(description: impl Into<String>) -> Self {
        Self::with_status(400, "Invalid Event", description)
    }

    /// Builds a `404` response for a missing record.
    #[must_use]
    pub fn not_found(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_status(404, title, description)
    }

    /// Builds a `500` response for a system-level failure.
    #[must_use]
    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_status(500, title, description)
    }

    /// Returns `true` when the response reports a `200` status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::WorkflowResponse;

    #[test]
    fn constructors_set_expected_status_codes() {
        assert_eq!(WorkflowResponse::ok("Success", "done").status_code, 200);
        assert_eq!(WorkflowResponse::bad_request("missing id").status_code, 400);
        assert_eq!(
            WorkflowResponse::not_found("Missing", "no row").status_code,
            404
        );
        assert_eq!(
            WorkflowResponse::failure("Processing Error", "boom").status_code,
            500
        );
    }

    #[test]
    fn body_serialises_with_title_and_description() {
        let response = WorkflowResponse::ok("Success", "Timesheet processed successfully");
        let value = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(value["body"]["title"], "Success");
        assert_eq!(value["status_code"], 200);
    }
}
