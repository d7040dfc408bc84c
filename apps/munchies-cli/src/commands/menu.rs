//! # Menu Command

use munchies_client::{Backend, QueryClient};
use munchies_core::menu::available_items;
use munchies_core::CategoryId;

/// Prints available items grouped by category.
pub async fn show<B: Backend>(
    client: &QueryClient<B>,
    category: Option<CategoryId>,
) -> anyhow::Result<()> {
    let categories = client.categories().await?;
    let items = client.items().await?;

    if let Some(id) = category {
        if !categories.iter().any(|c| c.id == id) {
            anyhow::bail!("Category {} does not exist", id);
        }
    }

    let visible = available_items(&items, category);
    if visible.is_empty() {
        println!("Nothing available right now.");
        return Ok(());
    }

    for cat in categories.iter().filter(|c| category.map_or(true, |id| c.id == id)) {
        let in_category: Vec<_> = visible.iter().filter(|i| i.category_id == cat.id).collect();
        if in_category.is_empty() {
            continue;
        }

        println!("{} [{}]", cat.name, cat.id);
        for item in in_category {
            println!("  #{:<4} {:<28} {:>10}", item.id, item.name, item.price().to_string());
            if !item.description.is_empty() {
                println!("        {}", item.description);
            }
        }
        println!();
    }

    Ok(())
}
