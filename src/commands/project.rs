use clap::{Args, Subcommand};

use crate::Context;
use crate::api::project::{Project, ProjectClient};
use crate::commands::template::{self, Apply, GetArgs, ListArgs, OutputArgs, set_if_present};
use crate::error::{CommandError, require_non_blank};

/// Project fields other than the name
#[derive(Args, Clone, Debug, Default)]
pub struct ProjectDetails {
    /// Description of the project
    #[arg(long)]
    pub description: Option<String>,

    /// URL of the project's home page or repository
    #[arg(long = "project-url")]
    pub project_url: Option<String>,

    /// URL of the project's issue tracker
    #[arg(long = "issue-tracker-url")]
    pub issue_tracker_url: Option<String>,

    /// Team responsible for the project
    #[arg(long = "engineering-team")]
    pub engineering_team: Option<String>,

    /// Technical leader of the project
    #[arg(long = "technical-leader")]
    pub technical_leader: Option<String>,
}

impl Apply<Project> for ProjectDetails {
    fn apply_to(&self, project: &mut Project) {
        set_if_present(&mut project.description, &self.description);
        set_if_present(&mut project.project_url, &self.project_url);
        set_if_present(&mut project.issue_tracker_url, &self.issue_tracker_url);
        set_if_present(&mut project.engineering_team, &self.engineering_team);
        set_if_present(&mut project.technical_leader, &self.technical_leader);
    }
}

/// Fields accepted by `update`
#[derive(Args, Clone, Debug, Default)]
pub struct ProjectFields {
    /// Name of the project
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub details: ProjectDetails,
}

impl Apply<Project> for ProjectFields {
    fn apply_to(&self, project: &mut Project) {
        set_if_present(&mut project.name, &self.name);
        self.details.apply_to(project);
    }
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project
    Create {
        /// Name of the project
        name: String,

        #[command(flatten)]
        details: ProjectDetails,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Get project
    Get(GetArgs),
    /// List projects
    List(ListArgs),
    /// Update a project
    Update {
        /// Project Id
        id: String,

        #[command(flatten)]
        fields: ProjectFields,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl ProjectCommands {
    pub async fn run(&self, ctx: &Context<'_>) -> Result<(), CommandError> {
        match self {
            ProjectCommands::Create {
                name,
                details,
                output,
            } => {
                require_non_blank("name", name)?;
                let mut project = Project {
                    name: Some(name.clone()),
                    ..Default::default()
                };
                details.apply_to(&mut project);
                let client = ProjectClient::new(ctx.client(true).await?);
                template::create(&client, project, output).await
            }
            ProjectCommands::Get(args) => {
                require_non_blank("id", &args.id)?;
                let client = ProjectClient::new(ctx.client(false).await?);
                template::get(&client, args).await
            }
            ProjectCommands::List(args) => {
                let client = ProjectClient::new(ctx.client(false).await?);
                template::list(&client, args).await
            }
            ProjectCommands::Update { id, fields, output } => {
                require_non_blank("id", id)?;
                let client = ProjectClient::new(ctx.client(true).await?);
                template::update(&client, id, fields, output).await
            }
        }
    }
}
