//! API contract types for the Rebyte REST service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Task resource as returned by the service.
///
/// Only `id` and `status` are guaranteed. Everything else is derived data
/// owned by the server; unrecognized fields are preserved in `extra` so the
/// resource round-trips without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "agentId", alias = "agent_id", skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Task {
    /// Server-supplied failure text: the `error` field, else `message`.
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "task failed".to_string())
    }
}

/// Task creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Prompt cannot be empty"))]
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
    #[serde(rename = "githubUrl", skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(rename = "branchName", skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(rename = "workspaceId", skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

impl CreateTaskRequest {
    /// Create a request with only the prompt set
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            executor: None,
            model: None,
            skills: Vec::new(),
            github_url: None,
            branch_name: None,
            workspace_id: None,
        }
    }
}

/// Follow-up prompt for an existing task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FollowUpRequest {
    #[validate(length(min = 1, message = "Prompt cannot be empty"))]
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
}

/// Task list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListResponse {
    #[serde(default)]
    pub items: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Pagination query for task listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Skill store entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Skill list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillListResponse {
    #[serde(default)]
    pub items: Vec<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Filtering query for the skill store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Agent spawn request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SpawnAgentRequest {
    #[validate(length(min = 1, message = "Agent name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_max_iterations() -> u32 {
    100
}

impl SpawnAgentRequest {
    /// Create a request with the default iteration budget
    pub fn new(name: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            name: name.into(),
            skills,
            prompt: None,
            max_iterations: default_max_iterations(),
        }
    }
}

/// Deployed agent resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(alias = "agent_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Agent list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentListResponse {
    #[serde(default)]
    pub items: Vec<Agent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Filtering query for agent listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Request to run a task on a deployed agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RunTaskRequest {
    #[validate(length(min = 1, message = "Task description cannot be empty"))]
    pub description: String,
    #[serde(default)]
    pub input: serde_json::Map<String, serde_json::Value>,
}

impl RunTaskRequest {
    /// Create a request with an empty input object
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            input: serde_json::Map::new(),
        }
    }
}

/// Error payload attached to non-2xx responses.
///
/// The service emits two shapes: `{"error": {"message": "..."}}` and the
/// flat `{"message": "..."}` / `{"error": "..."}` form. Both decode here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Either a nested error object or a bare string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    Detail(ErrorDetail),
    Text(String),
}

/// Nested error object carrying the server message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ErrorBody {
    /// Best-effort server message, regardless of which shape was sent
    pub fn message(&self) -> String {
        match &self.error {
            Some(ErrorField::Detail(detail)) => {
                if let Some(message) = &detail.message {
                    return message.clone();
                }
            }
            Some(ErrorField::Text(text)) => return text.clone(),
            None => {}
        }
        self.message.clone().unwrap_or_else(|| "unknown error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_task_request_wire_names() {
        let mut request = CreateTaskRequest::new("fix the bug");
        request.github_url = Some("owner/repo".to_string());
        request.branch_name = Some("main".to_string());

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["prompt"], "fix the bug");
        assert_eq!(value["githubUrl"], "owner/repo");
        assert_eq!(value["branchName"], "main");
        assert!(value.get("skills").is_none());
        assert!(value.get("workspaceId").is_none());
    }

    #[test]
    fn test_task_preserves_unknown_fields() {
        let task: Task = serde_json::from_value(json!({
            "id": "task-1",
            "status": "running",
            "vmState": "booted"
        }))
        .unwrap();

        assert_eq!(task.id, "task-1");
        assert_eq!(task.status, "running");
        assert_eq!(task.extra["vmState"], "booted");
    }

    #[test]
    fn test_task_missing_status_defaults_empty() {
        let task: Task = serde_json::from_value(json!({"id": "task-2"})).unwrap();
        assert_eq!(task.status, "");
    }

    #[test]
    fn test_failure_message_prefers_error_field() {
        let task: Task = serde_json::from_value(json!({
            "id": "t",
            "status": "failed",
            "error": "out of disk",
            "message": "see logs"
        }))
        .unwrap();
        assert_eq!(task.failure_message(), "out of disk");

        let task: Task = serde_json::from_value(json!({
            "id": "t",
            "status": "failed",
            "message": "see logs"
        }))
        .unwrap();
        assert_eq!(task.failure_message(), "see logs");

        let task: Task =
            serde_json::from_value(json!({"id": "t", "status": "failed"})).unwrap();
        assert_eq!(task.failure_message(), "task failed");
    }

    #[test]
    fn test_agent_id_alias() {
        let agent: Agent = serde_json::from_value(json!({
            "agent_id": "agent-9",
            "status": "running"
        }))
        .unwrap();
        assert_eq!(agent.id, "agent-9");
    }

    #[test]
    fn test_spawn_agent_default_iterations() {
        let request: SpawnAgentRequest = serde_json::from_value(json!({
            "name": "reviewer",
            "skills": ["code-review"]
        }))
        .unwrap();
        assert_eq!(request.max_iterations, 100);
    }

    #[test]
    fn test_error_body_nested_shape() {
        let body: ErrorBody = serde_json::from_value(json!({
            "error": {"message": "task not found", "code": 404}
        }))
        .unwrap();
        assert_eq!(body.message(), "task not found");
    }

    #[test]
    fn test_error_body_flat_shapes() {
        let body: ErrorBody =
            serde_json::from_value(json!({"message": "rate limited"})).unwrap();
        assert_eq!(body.message(), "rate limited");

        let body: ErrorBody =
            serde_json::from_value(json!({"error": "invalid key"})).unwrap();
        assert_eq!(body.message(), "invalid key");

        let body: ErrorBody = serde_json::from_value(json!({"raw": "<html>"})).unwrap();
        assert_eq!(body.message(), "unknown error");
    }

    #[test]
    fn test_validation_rejects_empty_prompt() {
        use validator::Validate;

        let request = CreateTaskRequest::new("");
        assert!(request.validate().is_err());

        let request = SpawnAgentRequest::new("worker", vec![]);
        assert!(request.validate().is_err());
    }
}
