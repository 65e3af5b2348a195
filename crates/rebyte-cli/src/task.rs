use anyhow::Result;
use clap::{Args, Subcommand};
use rebyte_api_contract::{CreateTaskRequest, FollowUpRequest, TaskQuery};

use crate::{api_client, print_json, wait_options};

/// Task-related commands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a new task
    Create(TaskCreateArgs),
    /// Get task details
    Get(TaskGetArgs),
    /// Send a follow-up prompt to an existing task
    FollowUp(TaskFollowUpArgs),
    /// List tasks
    List(TaskListArgs),
    /// Delete a task
    Delete(TaskDeleteArgs),
    /// Cancel a running task
    Cancel(TaskCancelArgs),
    /// Wait for a task to reach a terminal status
    Wait(TaskWaitArgs),
}

impl TaskCommands {
    /// Execute the task command
    pub async fn run(self) -> Result<()> {
        match self {
            TaskCommands::Create(args) => args.run().await,
            TaskCommands::Get(args) => args.run().await,
            TaskCommands::FollowUp(args) => args.run().await,
            TaskCommands::List(args) => args.run().await,
            TaskCommands::Delete(args) => args.run().await,
            TaskCommands::Cancel(args) => args.run().await,
            TaskCommands::Wait(args) => args.run().await,
        }
    }
}

/// Arguments for creating a new task
#[derive(Args)]
pub struct TaskCreateArgs {
    /// Task prompt
    #[arg(long = "prompt", value_name = "TEXT")]
    pub prompt: String,

    /// Executor (opencode, claude, gemini, codex)
    #[arg(long = "executor", value_name = "NAME")]
    pub executor: Option<String>,

    /// Model tier
    #[arg(long = "model", value_name = "NAME")]
    pub model: Option<String>,

    /// Skill slugs
    #[arg(long = "skills", value_name = "SLUG", num_args = 1..)]
    pub skills: Vec<String>,

    /// GitHub repo (owner/repo)
    #[arg(long = "github-url", value_name = "REPO")]
    pub github_url: Option<String>,

    /// Branch name
    #[arg(long = "branch", value_name = "NAME")]
    pub branch: Option<String>,

    /// Workspace to attach the task to
    #[arg(long = "workspace-id", value_name = "ID")]
    pub workspace_id: Option<String>,

    /// Wait for completion after creating
    #[arg(long = "wait")]
    pub wait: bool,

    /// Seconds to wait before giving up (with --wait)
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 600)]
    pub timeout: u64,

    /// Seconds between status checks (with --wait)
    #[arg(long = "poll-interval", value_name = "SECONDS", default_value_t = 3)]
    pub poll_interval: u64,
}

impl TaskCreateArgs {
    pub async fn run(self) -> Result<()> {
        let client = api_client()?;

        let request = CreateTaskRequest {
            prompt: self.prompt,
            executor: self.executor,
            model: self.model,
            skills: self.skills,
            github_url: self.github_url,
            branch_name: self.branch,
            workspace_id: self.workspace_id,
        };

        let task = client.create_task(&request).await?;
        print_json(&task)?;

        if self.wait {
            println!("Waiting for completion...");
            let options = wait_options(self.poll_interval, self.timeout);
            let result = client.wait_for_task(&task.id, &options).await?;
            print_json(&result)?;
        }

        Ok(())
    }
}

/// Arguments for fetching a task
#[derive(Args)]
pub struct TaskGetArgs {
    /// Task ID
    pub task_id: String,
}

impl TaskGetArgs {
    pub async fn run(self) -> Result<()> {
        let task = api_client()?.get_task(&self.task_id).await?;
        print_json(&task)
    }
}

/// Arguments for sending a follow-up prompt
#[derive(Args)]
pub struct TaskFollowUpArgs {
    /// Task ID
    pub task_id: String,

    /// Follow-up prompt
    #[arg(long = "prompt", value_name = "TEXT")]
    pub prompt: String,

    /// Skill slugs
    #[arg(long = "skills", value_name = "SLUG", num_args = 1..)]
    pub skills: Vec<String>,
}

impl TaskFollowUpArgs {
    pub async fn run(self) -> Result<()> {
        let request = FollowUpRequest {
            prompt: self.prompt,
            skills: self.skills,
        };
        let task = api_client()?.follow_up(&self.task_id, &request).await?;
        print_json(&task)
    }
}

/// Arguments for listing tasks
#[derive(Args)]
pub struct TaskListArgs {
    /// Max results
    #[arg(long = "limit", value_name = "N", default_value_t = 50)]
    pub limit: u32,

    /// Offset into the listing
    #[arg(long = "offset", value_name = "N", default_value_t = 0)]
    pub offset: u32,
}

impl TaskListArgs {
    pub async fn run(self) -> Result<()> {
        let query = TaskQuery {
            limit: Some(self.limit),
            offset: Some(self.offset),
        };
        let tasks = api_client()?.list_tasks(&query).await?;
        print_json(&tasks)
    }
}

/// Arguments for deleting a task
#[derive(Args)]
pub struct TaskDeleteArgs {
    /// Task ID
    pub task_id: String,
}

impl TaskDeleteArgs {
    pub async fn run(self) -> Result<()> {
        api_client()?.delete_task(&self.task_id).await?;
        println!("Task {} deleted.", self.task_id);
        Ok(())
    }
}

/// Arguments for cancelling a task
#[derive(Args)]
pub struct TaskCancelArgs {
    /// Task ID
    pub task_id: String,
}

impl TaskCancelArgs {
    pub async fn run(self) -> Result<()> {
        let task = api_client()?.cancel_task(&self.task_id).await?;
        print_json(&task)
    }
}

/// Arguments for waiting on an existing task
#[derive(Args)]
pub struct TaskWaitArgs {
    /// Task ID
    pub task_id: String,

    /// Seconds to wait before giving up
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 600)]
    pub timeout: u64,

    /// Seconds between status checks
    #[arg(long = "poll-interval", value_name = "SECONDS", default_value_t = 3)]
    pub poll_interval: u64,
}

impl TaskWaitArgs {
    pub async fn run(self) -> Result<()> {
        let options = wait_options(self.poll_interval, self.timeout);
        let task = api_client()?.wait_for_task(&self.task_id, &options).await?;
        print_json(&task)
    }
}
