pub mod executor;
pub mod product;
pub mod project;
pub mod template;

use clap::Subcommand;

use crate::Context;
use crate::error::CommandError;
pub use executor::Executor;
pub use product::ProductCommands;
pub use project::ProjectCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Product
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Project
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

impl Commands {
    pub async fn run(&self, ctx: &Context<'_>) -> Result<(), CommandError> {
        match self {
            Commands::Product { command } => command.run(ctx).await,
            Commands::Project { command } => command.run(ctx).await,
        }
    }
}
