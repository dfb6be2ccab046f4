use clap::{Args, Subcommand};

use crate::Context;
use crate::api::product::{Product, ProductClient};
use crate::commands::template::{self, Apply, GetArgs, ListArgs, OutputArgs, set_if_present};
use crate::error::{CommandError, require_non_blank};

/// Optional product fields accepted by `update`
#[derive(Args, Clone, Debug, Default)]
pub struct ProductFields {
    /// Name of product
    #[arg(long)]
    pub name: Option<String>,

    /// Abbreviation of product
    #[arg(long)]
    pub abbreviation: Option<String>,

    /// Description of product
    #[arg(long)]
    pub description: Option<String>,

    /// The official Product code to be used in URLs and filenames etc e.g. eap
    #[arg(long = "product-code")]
    pub product_code: Option<String>,

    /// The eventual code needed to integrate with external systems, portals, etc, i.e. jbosseap
    #[arg(long = "system-code")]
    pub system_code: Option<String>,
}

impl Apply<Product> for ProductFields {
    fn apply_to(&self, product: &mut Product) {
        set_if_present(&mut product.name, &self.name);
        set_if_present(&mut product.abbreviation, &self.abbreviation);
        set_if_present(&mut product.description, &self.description);
        set_if_present(&mut product.product_code, &self.product_code);
        set_if_present(&mut product.pgm_system_name, &self.system_code);
    }
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Create a product
    Create {
        /// Name of product
        name: String,

        /// Abbreviation of product
        #[arg(long)]
        abbreviation: String,

        /// Description of product
        #[arg(long, default_value = "")]
        description: String,

        /// The official Product code to be used in URLs and filenames etc e.g. eap
        #[arg(long = "product-code", default_value = "")]
        product_code: String,

        /// The eventual code needed to integrate with external systems, portals, etc, i.e. jbosseap
        #[arg(long = "system-code", default_value = "")]
        system_code: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Get product
    Get(GetArgs),
    /// List products
    List(ListArgs),
    /// Update a product
    Update {
        /// Product Id
        id: String,

        #[command(flatten)]
        fields: ProductFields,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl ProductCommands {
    pub async fn run(&self, ctx: &Context<'_>) -> Result<(), CommandError> {
        match self {
            ProductCommands::Create {
                name,
                abbreviation,
                description,
                product_code,
                system_code,
                output,
            } => {
                require_non_blank("name", name)?;
                require_non_blank("abbreviation", abbreviation)?;
                let product = Product {
                    name: Some(name.clone()),
                    abbreviation: Some(abbreviation.clone()),
                    description: Some(description.clone()),
                    product_code: Some(product_code.clone()),
                    pgm_system_name: Some(system_code.clone()),
                    ..Default::default()
                };
                let client = ProductClient::new(ctx.client(true).await?);
                template::create(&client, product, output).await
            }
            ProductCommands::Get(args) => {
                require_non_blank("id", &args.id)?;
                let client = ProductClient::new(ctx.client(false).await?);
                template::get(&client, args).await
            }
            ProductCommands::List(args) => {
                let client = ProductClient::new(ctx.client(false).await?);
                template::list(&client, args).await
            }
            ProductCommands::Update { id, fields, output } => {
                require_non_blank("id", id)?;
                let client = ProductClient::new(ctx.client(true).await?);
                template::update(&client, id, fields, output).await
            }
        }
    }
}
