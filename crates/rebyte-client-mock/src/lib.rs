//! Mock client backed by scripted task states
//!
//! Tasks advance through a scripted status sequence, one step per fetch,
//! repeating the final state once the script is exhausted. Fetch counts are
//! recorded so timing-sensitive waiter tests can assert how often the
//! "service" was read.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use rebyte_api_contract::*;
use rebyte_client_api::{ClientApi, ClientApiError, ClientApiResult};

#[derive(Default)]
struct MockState {
    tasks: HashMap<String, VecDeque<Task>>,
    fetch_counts: HashMap<String, usize>,
    skills: Vec<Skill>,
    agents: Vec<Agent>,
    run_script: Vec<String>,
    next_task: usize,
    next_agent: usize,
}

/// In-memory [`ClientApi`] implementation driven by scripted state
#[derive(Default)]
pub struct MockClient {
    state: Mutex<MockState>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a task's status sequence; the last status repeats forever
    pub fn script_task(&self, task_id: &str, statuses: &[&str]) {
        let script = statuses
            .iter()
            .map(|status| task_with_status(task_id, status))
            .collect();
        self.script_task_states(task_id, script);
    }

    /// Script a task with full resource states per fetch
    pub fn script_task_states(&self, task_id: &str, script: Vec<Task>) {
        let mut state = self.state.lock().unwrap();
        state.tasks.insert(task_id.to_string(), script.into());
    }

    /// How many times a task has been fetched
    pub fn fetch_count(&self, task_id: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.fetch_counts.get(task_id).copied().unwrap_or(0)
    }

    /// Seed the skill store
    pub fn add_skill(&self, skill: Skill) {
        self.state.lock().unwrap().skills.push(skill);
    }

    /// Seed a deployed agent
    pub fn add_agent(&self, agent: Agent) {
        self.state.lock().unwrap().agents.push(agent);
    }

    /// Status sequence assigned to tasks started via `run_task`
    pub fn set_run_script(&self, statuses: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.run_script = statuses.iter().map(|s| s.to_string()).collect();
    }

    fn not_found(what: &str, id: &str) -> ClientApiError {
        ClientApiError::Api {
            status: 404,
            message: format!("{} {} not found", what, id),
        }
    }
}

fn task_with_status(task_id: &str, status: &str) -> Task {
    serde_json::from_value(serde_json::json!({
        "id": task_id,
        "status": status,
    }))
    .unwrap()
}

#[async_trait]
impl ClientApi for MockClient {
    async fn create_task(&self, request: &CreateTaskRequest) -> ClientApiResult<Task> {
        let mut state = self.state.lock().unwrap();
        state.next_task += 1;
        let task_id = format!("task-{}", state.next_task);

        let mut task = task_with_status(&task_id, "pending");
        task.prompt = Some(request.prompt.clone());
        task.executor = request.executor.clone();
        state.tasks.entry(task_id).or_insert_with(|| vec![task.clone()].into());
        Ok(task)
    }

    async fn get_task(&self, task_id: &str) -> ClientApiResult<Task> {
        let mut state = self.state.lock().unwrap();
        *state.fetch_counts.entry(task_id.to_string()).or_insert(0) += 1;

        let script = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| Self::not_found("task", task_id))?;
        let task = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .ok_or_else(|| Self::not_found("task", task_id))?
        };
        Ok(task)
    }

    async fn list_tasks(&self, query: &TaskQuery) -> ClientApiResult<TaskListResponse> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Task> =
            state.tasks.values().filter_map(|script| script.front().cloned()).collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));

        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.unwrap_or(50) as usize;
        let total = items.len() as u64;
        let items: Vec<Task> = items.into_iter().skip(offset).take(limit).collect();

        Ok(TaskListResponse {
            items,
            total: Some(total),
            extra: HashMap::new(),
        })
    }

    async fn delete_task(&self, task_id: &str) -> ClientApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .tasks
            .remove(task_id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("task", task_id))
    }

    async fn follow_up(
        &self,
        task_id: &str,
        request: &FollowUpRequest,
    ) -> ClientApiResult<Task> {
        let mut state = self.state.lock().unwrap();
        let script = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| Self::not_found("task", task_id))?;
        let mut task = script
            .front()
            .cloned()
            .ok_or_else(|| Self::not_found("task", task_id))?;
        task.prompt = Some(request.prompt.clone());
        Ok(task)
    }

    async fn cancel_task(&self, task_id: &str) -> ClientApiResult<Task> {
        let mut state = self.state.lock().unwrap();
        if !state.tasks.contains_key(task_id) {
            return Err(Self::not_found("task", task_id));
        }
        let task = task_with_status(task_id, "cancelled");
        state.tasks.insert(task_id.to_string(), vec![task.clone()].into());
        Ok(task)
    }

    async fn list_skills(&self, query: &SkillQuery) -> ClientApiResult<SkillListResponse> {
        let state = self.state.lock().unwrap();
        let items: Vec<Skill> = state
            .skills
            .iter()
            .filter(|skill| {
                query.search.as_ref().map_or(true, |needle| {
                    skill.name.contains(needle.as_str())
                        || skill
                            .description
                            .as_deref()
                            .is_some_and(|d| d.contains(needle.as_str()))
                })
            })
            .filter(|skill| {
                query
                    .category
                    .as_ref()
                    .map_or(true, |category| skill.category.as_deref() == Some(category.as_str()))
            })
            .take(query.limit.unwrap_or(20) as usize)
            .cloned()
            .collect();

        let total = items.len() as u64;
        Ok(SkillListResponse {
            items,
            total: Some(total),
            extra: HashMap::new(),
        })
    }

    async fn get_skill(&self, skill_id: &str) -> ClientApiResult<Skill> {
        let state = self.state.lock().unwrap();
        state
            .skills
            .iter()
            .find(|skill| skill.id == skill_id)
            .cloned()
            .ok_or_else(|| Self::not_found("skill", skill_id))
    }

    async fn spawn_agent(&self, request: &SpawnAgentRequest) -> ClientApiResult<Agent> {
        let mut state = self.state.lock().unwrap();
        state.next_agent += 1;
        let agent = Agent {
            id: format!("agent-{}", state.next_agent),
            name: Some(request.name.clone()),
            status: "running".to_string(),
            skills: request.skills.clone(),
            extra: HashMap::new(),
        };
        state.agents.push(agent.clone());
        Ok(agent)
    }

    async fn list_agents(&self, query: &AgentQuery) -> ClientApiResult<AgentListResponse> {
        let state = self.state.lock().unwrap();
        let items: Vec<Agent> = state
            .agents
            .iter()
            .filter(|agent| {
                query.status.as_ref().map_or(true, |status| &agent.status == status)
            })
            .take(query.limit.unwrap_or(20) as usize)
            .cloned()
            .collect();

        let total = items.len() as u64;
        Ok(AgentListResponse {
            items,
            total: Some(total),
            extra: HashMap::new(),
        })
    }

    async fn get_agent(&self, agent_id: &str) -> ClientApiResult<Agent> {
        let state = self.state.lock().unwrap();
        state
            .agents
            .iter()
            .find(|agent| agent.id == agent_id)
            .cloned()
            .ok_or_else(|| Self::not_found("agent", agent_id))
    }

    async fn terminate_agent(&self, agent_id: &str) -> ClientApiResult<Agent> {
        let mut state = self.state.lock().unwrap();
        let agent = state
            .agents
            .iter_mut()
            .find(|agent| agent.id == agent_id)
            .ok_or_else(|| Self::not_found("agent", agent_id))?;
        agent.status = "terminated".to_string();
        Ok(agent.clone())
    }

    async fn run_task(&self, agent_id: &str, request: &RunTaskRequest) -> ClientApiResult<Task> {
        let mut state = self.state.lock().unwrap();
        if !state.agents.iter().any(|agent| agent.id == agent_id) {
            return Err(Self::not_found("agent", agent_id));
        }

        state.next_task += 1;
        let task_id = format!("task-{}", state.next_task);
        let script: Vec<Task> = if state.run_script.is_empty() {
            vec![task_with_status(&task_id, "completed")]
        } else {
            state
                .run_script
                .iter()
                .map(|status| task_with_status(&task_id, status))
                .collect()
        };

        let mut first = script.first().cloned().unwrap();
        first.message = Some(request.description.clone());
        state.tasks.insert(task_id, script.into());
        Ok(first)
    }
}
