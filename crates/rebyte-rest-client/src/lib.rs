//! REST API client for the Rebyte service
//!
//! This crate provides the HTTP client for the Rebyte task/agent
//! orchestration REST API: configuration, authentication,
//! request/response handling, and the polling conveniences built on
//! `rebyte-client-api`.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use auth::*;
pub use client::*;
pub use config::*;
pub use error::*;

use async_trait::async_trait;
use rebyte_api_contract::*;
use rebyte_client_api::{ClientApi, ClientApiResult};

#[async_trait]
impl ClientApi for client::RestClient {
    async fn create_task(&self, request: &CreateTaskRequest) -> ClientApiResult<Task> {
        self.create_task(request).await.map_err(Into::into)
    }

    async fn get_task(&self, task_id: &str) -> ClientApiResult<Task> {
        self.get_task(task_id).await.map_err(Into::into)
    }

    async fn list_tasks(&self, query: &TaskQuery) -> ClientApiResult<TaskListResponse> {
        self.list_tasks(query).await.map_err(Into::into)
    }

    async fn delete_task(&self, task_id: &str) -> ClientApiResult<()> {
        self.delete_task(task_id).await.map_err(Into::into)
    }

    async fn follow_up(
        &self,
        task_id: &str,
        request: &FollowUpRequest,
    ) -> ClientApiResult<Task> {
        self.follow_up(task_id, request).await.map_err(Into::into)
    }

    async fn cancel_task(&self, task_id: &str) -> ClientApiResult<Task> {
        self.cancel_task(task_id).await.map_err(Into::into)
    }

    async fn list_skills(&self, query: &SkillQuery) -> ClientApiResult<SkillListResponse> {
        self.list_skills(query).await.map_err(Into::into)
    }

    async fn get_skill(&self, skill_id: &str) -> ClientApiResult<Skill> {
        self.get_skill(skill_id).await.map_err(Into::into)
    }

    async fn spawn_agent(&self, request: &SpawnAgentRequest) -> ClientApiResult<Agent> {
        self.spawn_agent(request).await.map_err(Into::into)
    }

    async fn list_agents(&self, query: &AgentQuery) -> ClientApiResult<AgentListResponse> {
        self.list_agents(query).await.map_err(Into::into)
    }

    async fn get_agent(&self, agent_id: &str) -> ClientApiResult<Agent> {
        self.get_agent(agent_id).await.map_err(Into::into)
    }

    async fn terminate_agent(&self, agent_id: &str) -> ClientApiResult<Agent> {
        self.terminate_agent(agent_id).await.map_err(Into::into)
    }

    async fn run_task(&self, agent_id: &str, request: &RunTaskRequest) -> ClientApiResult<Task> {
        self.run_task(agent_id, request).await.map_err(Into::into)
    }
}
