use anyhow::Result;
use clap::{Args, Subcommand};
use rebyte_api_contract::SkillQuery;

use crate::{api_client, print_json};

/// Skill store commands
#[derive(Subcommand)]
pub enum SkillCommands {
    /// List available skills
    List(SkillListArgs),
    /// Show details for one skill
    Show(SkillShowArgs),
}

impl SkillCommands {
    pub async fn run(self) -> Result<()> {
        match self {
            SkillCommands::List(args) => args.run().await,
            SkillCommands::Show(args) => args.run().await,
        }
    }
}

/// Arguments for listing skills
#[derive(Args)]
pub struct SkillListArgs {
    /// Search keyword
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Filter by category
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Max results
    #[arg(long = "limit", value_name = "N", default_value_t = 20)]
    pub limit: u32,
}

impl SkillListArgs {
    pub async fn run(self) -> Result<()> {
        let query = SkillQuery {
            search: self.search,
            category: self.category,
            limit: Some(self.limit),
        };
        let skills = api_client()?.list_skills(&query).await?;
        print_json(&skills)
    }
}

/// Arguments for showing a skill
#[derive(Args)]
pub struct SkillShowArgs {
    /// Skill ID
    pub skill_id: String,
}

impl SkillShowArgs {
    pub async fn run(self) -> Result<()> {
        let skill = api_client()?.get_skill(&self.skill_id).await?;
        print_json(&skill)
    }
}
