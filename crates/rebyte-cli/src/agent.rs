use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use rebyte_api_contract::{AgentQuery, RunTaskRequest, SpawnAgentRequest};

use crate::{api_client, print_json, wait_options};

/// Cloud agent commands
#[derive(Subcommand)]
pub enum AgentCommands {
    /// Spawn a cloud agent with specified skills
    Spawn(AgentSpawnArgs),
    /// List deployed agents
    List(AgentListArgs),
    /// Get information about a deployed agent
    Info(AgentInfoArgs),
    /// Terminate a running agent
    Terminate(AgentTerminateArgs),
    /// Run a task on a deployed agent
    Run(AgentRunArgs),
}

impl AgentCommands {
    pub async fn run(self) -> Result<()> {
        match self {
            AgentCommands::Spawn(args) => args.run().await,
            AgentCommands::List(args) => args.run().await,
            AgentCommands::Info(args) => args.run().await,
            AgentCommands::Terminate(args) => args.run().await,
            AgentCommands::Run(args) => args.run().await,
        }
    }
}

/// Arguments for spawning an agent
#[derive(Args)]
pub struct AgentSpawnArgs {
    /// Agent name
    #[arg(long = "name", value_name = "NAME")]
    pub name: String,

    /// Skills to deploy the agent with
    #[arg(long = "skills", value_name = "SLUG", num_args = 1.., required = true)]
    pub skills: Vec<String>,

    /// Initial prompt for the agent
    #[arg(long = "prompt", value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Iteration budget for the agent loop
    #[arg(long = "max-iterations", value_name = "N", default_value_t = 100)]
    pub max_iterations: u32,
}

impl AgentSpawnArgs {
    pub async fn run(self) -> Result<()> {
        let request = SpawnAgentRequest {
            name: self.name,
            skills: self.skills,
            prompt: self.prompt,
            max_iterations: self.max_iterations,
        };

        let agent = api_client()?.spawn_agent(&request).await?;
        println!("Agent spawned successfully. Agent ID: {}", agent.id);
        print_json(&agent)
    }
}

/// Arguments for listing agents
#[derive(Args)]
pub struct AgentListArgs {
    /// Filter by status
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<String>,

    /// Max results
    #[arg(long = "limit", value_name = "N", default_value_t = 20)]
    pub limit: u32,
}

impl AgentListArgs {
    pub async fn run(self) -> Result<()> {
        let query = AgentQuery {
            status: self.status,
            limit: Some(self.limit),
        };
        let agents = api_client()?.list_agents(&query).await?;
        print_json(&agents)
    }
}

/// Arguments for inspecting an agent
#[derive(Args)]
pub struct AgentInfoArgs {
    /// Agent ID
    pub agent_id: String,
}

impl AgentInfoArgs {
    pub async fn run(self) -> Result<()> {
        let agent = api_client()?.get_agent(&self.agent_id).await?;
        print_json(&agent)
    }
}

/// Arguments for terminating an agent
#[derive(Args)]
pub struct AgentTerminateArgs {
    /// Agent ID
    pub agent_id: String,
}

impl AgentTerminateArgs {
    pub async fn run(self) -> Result<()> {
        api_client()?.terminate_agent(&self.agent_id).await?;
        println!("Agent {} terminated.", self.agent_id);
        Ok(())
    }
}

/// Arguments for running a task on an agent
#[derive(Args)]
pub struct AgentRunArgs {
    /// Agent ID
    #[arg(long = "agent-id", value_name = "ID")]
    pub agent_id: String,

    /// Task description
    #[arg(long = "task", value_name = "TEXT")]
    pub task: String,

    /// Input data as a JSON object
    #[arg(long = "input", value_name = "JSON")]
    pub input: Option<String>,

    /// Return immediately instead of waiting for completion
    #[arg(long = "no-wait")]
    pub no_wait: bool,

    /// Seconds to wait before giving up
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 300)]
    pub timeout: u64,

    /// Seconds between status checks
    #[arg(long = "poll-interval", value_name = "SECONDS", default_value_t = 2)]
    pub poll_interval: u64,
}

impl AgentRunArgs {
    pub async fn run(self) -> Result<()> {
        let mut request = RunTaskRequest::new(self.task);
        if let Some(input) = &self.input {
            request.input = serde_json::from_str(input)
                .context("Error: Input must be a valid JSON object")?;
        }

        let client = api_client()?;

        if self.no_wait {
            let started = client.run_task(&self.agent_id, &request).await?;
            return print_json(&started);
        }

        let options = wait_options(self.poll_interval, self.timeout);
        let task = client.run_task_and_wait(&self.agent_id, &request, &options).await?;
        println!("Task completed. Status: {}", task.status);
        print_json(&task)
    }
}
