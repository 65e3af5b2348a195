//! Main REST API client implementation

use rebyte_api_contract::*;
use rebyte_client_api::{ClientApiError, WaitError, WaitOptions};
use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{RestClientError, RestClientResult};

/// REST API client for the Rebyte service
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    config: ClientConfig,
}

impl RestClient {
    /// Create a client from an explicit configuration
    pub fn new(config: ClientConfig) -> Self {
        let http_client = HttpClient::builder()
            .user_agent("rebyte-cli/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            config,
        }
    }

    /// Create a client from `REBYTE_API_KEY` / `REBYTE_BASE_URL`
    pub fn from_env() -> RestClientResult<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    // ---- Tasks ----

    /// Create a new task. The server blocks until the VM is ready and the
    /// first prompt has been sent, so the response already carries a status.
    pub async fn create_task(&self, request: &CreateTaskRequest) -> RestClientResult<Task> {
        validate_request(request)?;
        self.post("/v1/tasks", request).await
    }

    /// Get task details with derived status and prompts
    pub async fn get_task(&self, task_id: &str) -> RestClientResult<Task> {
        self.get(&format!("/v1/tasks/{}", task_id)).await
    }

    /// List API-created tasks
    pub async fn list_tasks(&self, query: &TaskQuery) -> RestClientResult<TaskListResponse> {
        self.get(&path_with_query("/v1/tasks", query)).await
    }

    /// Soft-delete a task (204, no body)
    pub async fn delete_task(&self, task_id: &str) -> RestClientResult<()> {
        let response = self.send(Method::DELETE, &format!("/v1/tasks/{}", task_id), None::<&()>).await?;
        self.check_status(response).await?;
        Ok(())
    }

    /// Send a follow-up prompt to an existing task
    pub async fn follow_up(
        &self,
        task_id: &str,
        request: &FollowUpRequest,
    ) -> RestClientResult<Task> {
        validate_request(request)?;
        self.post(&format!("/v1/tasks/{}/prompts", task_id), request).await
    }

    /// Cancel a running task
    pub async fn cancel_task(&self, task_id: &str) -> RestClientResult<Task> {
        self.request(Method::POST, &format!("/v1/tasks/{}/cancel", task_id), None::<&()>)
            .await
    }

    // ---- Skills ----

    /// List available skills from the skill store
    pub async fn list_skills(&self, query: &SkillQuery) -> RestClientResult<SkillListResponse> {
        self.get(&path_with_query("/v1/skills", query)).await
    }

    /// Get detailed information about a specific skill
    pub async fn get_skill(&self, skill_id: &str) -> RestClientResult<Skill> {
        self.get(&format!("/v1/skills/{}", skill_id)).await
    }

    // ---- Agents ----

    /// Spawn a cloud agent with the requested skills
    pub async fn spawn_agent(&self, request: &SpawnAgentRequest) -> RestClientResult<Agent> {
        validate_request(request)?;
        self.post("/v1/agents", request).await
    }

    /// List deployed agents
    pub async fn list_agents(&self, query: &AgentQuery) -> RestClientResult<AgentListResponse> {
        self.get(&path_with_query("/v1/agents", query)).await
    }

    /// Get information about a deployed agent
    pub async fn get_agent(&self, agent_id: &str) -> RestClientResult<Agent> {
        self.get(&format!("/v1/agents/{}", agent_id)).await
    }

    /// Terminate a running agent
    pub async fn terminate_agent(&self, agent_id: &str) -> RestClientResult<Agent> {
        self.request(Method::DELETE, &format!("/v1/agents/{}", agent_id), None::<&()>)
            .await
    }

    /// Start a task on a deployed agent without waiting for it
    pub async fn run_task(
        &self,
        agent_id: &str,
        request: &RunTaskRequest,
    ) -> RestClientResult<Task> {
        validate_request(request)?;
        self.post(&format!("/v1/agents/{}/tasks", agent_id), request).await
    }

    // ---- Polling ----

    /// Poll a task until it reaches a terminal status
    pub async fn wait_for_task(
        &self,
        task_id: &str,
        options: &WaitOptions,
    ) -> Result<Task, WaitError> {
        rebyte_client_api::wait_for_task(self, task_id, options).await
    }

    /// Run a task on an agent and block until it finishes
    pub async fn run_task_and_wait(
        &self,
        agent_id: &str,
        request: &RunTaskRequest,
        options: &WaitOptions,
    ) -> Result<Task, WaitError> {
        let task = self
            .run_task(agent_id, request)
            .await
            .map_err(|e| WaitError::Client(ClientApiError::from(e)))?;
        self.wait_for_task(&task.id, options).await
    }

    // Private helper methods

    async fn get<T: DeserializeOwned>(&self, path: &str) -> RestClientResult<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RestClientResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RestClientResult<T> {
        let response = self.send(method, path, body).await?;
        let response = self.check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(RestClientError::from)
    }

    async fn send<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RestClientResult<Response> {
        let url = self.config.base_url.join(path)?;
        debug!(%method, %url, "sending API request");

        let mut request = self.http_client.request(method, url);

        let headers = self
            .config
            .auth
            .headers(&self.config.api_key)
            .map_err(|e| RestClientError::Auth(e.to_string()))?;
        request = request.headers(headers);

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    async fn check_status(&self, response: Response) -> RestClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => Err(RestClientError::Api { status, body }),
            Err(_) => Err(RestClientError::UnexpectedResponse(text)),
        }
    }
}

/// Append serialized query parameters to a path, skipping nulls
fn path_with_query<Q: serde::Serialize>(path: &str, query: &Q) -> String {
    let mut pairs = Vec::new();
    let value = serde_json::to_value(query).unwrap();

    if let serde_json::Value::Object(map) = value {
        for (key, val) in map {
            if !val.is_null() {
                let val_str = match val {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => val.to_string().trim_matches('"').to_string(),
                };
                pairs.push(format!("{}={}", key, val_str));
            }
        }
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}
