//! # Admin Commands
//!
//! The order board and menu management. Every command opens an
//! [`AdminConsole`], which fails for callers without the admin role.

use clap::Subcommand;
use munchies_client::{AdminConsole, Backend, QueryClient};
use munchies_core::validation::ItemForm;
use munchies_core::{CategoryDraft, CategoryId, ItemId, OrderId, OrderStatus};

use super::order::{print_line, print_order};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List orders, optionally for one status
    Orders {
        /// pending | in-progress | completed | cancelled
        #[arg(long)]
        status: Option<OrderStatus>,
    },

    /// Move an order to its next status
    Advance {
        order_id: OrderId,
        /// in-progress | completed | cancelled
        status: OrderStatus,
    },

    /// Create a menu item, or update it when --id is given
    ItemSave {
        #[arg(long)]
        id: Option<ItemId>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Option<CategoryId>,
        #[arg(long, default_value = "")]
        description: String,
        /// Price in dollars, e.g. 12.50
        #[arg(long)]
        price: String,
        /// List the item as sold out
        #[arg(long)]
        unavailable: bool,
    },

    /// Delete a menu item
    ItemDelete { id: ItemId },

    /// Create a category, or update it when --id is given
    CategorySave {
        #[arg(long)]
        id: Option<CategoryId>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a category
    CategoryDelete { id: CategoryId },
}

pub async fn run<B: Backend>(cmd: AdminCommand, client: &QueryClient<B>) -> anyhow::Result<()> {
    let console = AdminConsole::open(client).await?;

    match cmd {
        AdminCommand::Orders { status } => {
            let orders = console.orders(status).await?;
            if orders.is_empty() {
                println!("No orders.");
            }

            for order in &orders {
                print_order(order);
                for line in console.order_details(order).await? {
                    print_line(&line);
                }

                let actions = AdminConsole::<B>::actions_for(order);
                if !actions.is_empty() {
                    let labels: Vec<&str> = actions.iter().map(|s| s.as_str()).collect();
                    println!("    next: {}", labels.join(", "));
                }
            }
        }
        AdminCommand::Advance { order_id, status } => {
            console.advance_order(order_id, status).await?;
            println!("Order #{} is now {}", order_id, status.label());
        }
        AdminCommand::ItemSave {
            id,
            name,
            category,
            description,
            price,
            unavailable,
        } => {
            let form = ItemForm {
                name: &name,
                category_id: category,
                description: &description,
                price: &price,
                available: !unavailable,
            };
            let saved = console.save_item(id, &form).await?;
            println!("Saved item #{}", saved);
        }
        AdminCommand::ItemDelete { id } => {
            console.delete_item(id).await?;
            println!("Deleted item #{}", id);
        }
        AdminCommand::CategorySave {
            id,
            name,
            description,
        } => {
            let saved = console
                .save_category(id, &CategoryDraft { name, description })
                .await?;
            println!("Saved category #{}", saved);
        }
        AdminCommand::CategoryDelete { id } => {
            console.delete_category(id).await?;
            println!("Deleted category #{}", id);
        }
    }

    Ok(())
}
