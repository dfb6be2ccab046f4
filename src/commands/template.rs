//! Control flow shared by the resource commands.
//!
//! Each function is one command shape, generic over the [`RemoteClient`] of the
//! resource it operates on. Validation happens before any remote call, and
//! the result is printed from inside the unit of work.

use clap::Args;

use crate::api::RemoteClient;
use crate::error::{CommandError, require_non_blank};
use crate::output;

/// Output selection shared by all verbs
#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Use JSON for output (default to YAML)
    #[arg(short = 'o', long = "json")]
    pub json: bool,
}

#[derive(Args, Clone, Debug)]
pub struct GetArgs {
    /// Id of the resource
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Sort the results
    /// Example: `=asc=name`
    #[arg(long)]
    pub sort: Option<String>,

    /// Query filter in RSQL
    /// Example: `name==EAP*`
    #[arg(long)]
    pub query: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Applies the fields a user supplied on the command line to a resource
pub trait Apply<R> {
    fn apply_to(&self, resource: &mut R);
}

/// Overwrite `target` only if a value was supplied
pub fn set_if_present(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

/// Blank strings carry no constraint
fn constraint(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Fetch one resource by id and print it
pub async fn get<C: RemoteClient>(client: &C, args: &GetArgs) -> Result<(), CommandError> {
    output::emit(&get_rendered(client, args).await?)
}

/// Fetch one resource by id and render it in the selected format
pub async fn get_rendered<C: RemoteClient>(
    client: &C,
    args: &GetArgs,
) -> Result<String, CommandError> {
    require_non_blank("id", &args.id)?;
    let resource = client.get_specific(&args.id).await?;
    output::render(args.output.json, &resource)
}

/// Fetch all resources matching the optional sort and query, and print them
pub async fn list<C: RemoteClient>(client: &C, args: &ListArgs) -> Result<(), CommandError> {
    output::emit(&list_rendered(client, args).await?)
}

pub async fn list_rendered<C: RemoteClient>(
    client: &C,
    args: &ListArgs,
) -> Result<String, CommandError> {
    let all = client
        .get_all(constraint(&args.sort), constraint(&args.query))
        .await?;
    output::render(args.output.json, &all)
}

/// Create `resource` and print what the server returned
pub async fn create<C: RemoteClient>(
    client: &C,
    resource: C::Resource,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let created = client.create_new(&resource).await?;
    output::print(output.json, &created)
}

/// Apply `patch` to the current state of resource `id` and write it back
pub async fn update_resource<C, P>(client: &C, id: &str, patch: &P) -> Result<C::Resource, CommandError>
where
    C: RemoteClient,
    P: Apply<C::Resource> + ?Sized,
{
    require_non_blank("id", id)?;
    let mut resource = client.get_specific(id).await?;
    patch.apply_to(&mut resource);
    client.update(id, &resource).await?;
    Ok(resource)
}

/// Like [`update_resource`], printing the updated resource
pub async fn update<C, P>(
    client: &C,
    id: &str,
    patch: &P,
    output: &OutputArgs,
) -> Result<(), CommandError>
where
    C: RemoteClient,
    P: Apply<C::Resource> + ?Sized,
{
    let updated = update_resource(client, id, patch).await?;
    output::print(output.json, &updated)
}
