//! Client API trait for the Rebyte service
//!
//! Defines the seam between callers (CLI, tests) and any transport
//! implementation, plus the status taxonomy and polling loop used to wait
//! for asynchronous tasks to finish.

pub mod status;
pub mod waiter;

pub use status::{StatusClass, StatusVocabulary};
pub use waiter::{wait_for_task, TaskSource, WaitError, WaitOptions};

use async_trait::async_trait;
use rebyte_api_contract::*;
use thiserror::Error;

/// Errors surfaced at the client trait seam
#[derive(Debug, Error)]
pub enum ClientApiError {
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

/// Unified client surface for the task, skill, and agent families
#[async_trait]
pub trait ClientApi: Send + Sync {
    async fn create_task(&self, request: &CreateTaskRequest) -> ClientApiResult<Task>;
    async fn get_task(&self, task_id: &str) -> ClientApiResult<Task>;
    async fn list_tasks(&self, query: &TaskQuery) -> ClientApiResult<TaskListResponse>;
    async fn delete_task(&self, task_id: &str) -> ClientApiResult<()>;
    async fn follow_up(&self, task_id: &str, request: &FollowUpRequest)
        -> ClientApiResult<Task>;
    async fn cancel_task(&self, task_id: &str) -> ClientApiResult<Task>;

    async fn list_skills(&self, query: &SkillQuery) -> ClientApiResult<SkillListResponse>;
    async fn get_skill(&self, skill_id: &str) -> ClientApiResult<Skill>;

    async fn spawn_agent(&self, request: &SpawnAgentRequest) -> ClientApiResult<Agent>;
    async fn list_agents(&self, query: &AgentQuery) -> ClientApiResult<AgentListResponse>;
    async fn get_agent(&self, agent_id: &str) -> ClientApiResult<Agent>;
    async fn terminate_agent(&self, agent_id: &str) -> ClientApiResult<Agent>;
    async fn run_task(&self, agent_id: &str, request: &RunTaskRequest)
        -> ClientApiResult<Task>;
}
