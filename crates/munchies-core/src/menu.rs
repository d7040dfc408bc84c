//! # Catalog Queries
//!
//! Read-only helpers the menu, confirmation and admin order views use to join
//! backend data together.

use crate::money::Money;
use crate::types::{CategoryId, ItemId, MenuItem, OrderLine};

/// Shown in place of an item the catalog no longer contains.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown";

/// Items a customer can order, optionally limited to one category.
///
/// Backend order is preserved.
pub fn available_items(items: &[MenuItem], category: Option<CategoryId>) -> Vec<&MenuItem> {
    items
        .iter()
        .filter(|item| category.map_or(true, |c| item.category_id == c))
        .filter(|item| item.available)
        .collect()
}

/// Looks up an item by id.
pub fn find_item(items: &[MenuItem], id: ItemId) -> Option<&MenuItem> {
    items.iter().find(|item| item.id == id)
}

/// Display name for an order line's item.
pub fn item_name_or_unknown(items: &[MenuItem], id: ItemId) -> &str {
    find_item(items, id).map_or(UNKNOWN_ITEM_NAME, |item| item.name.as_str())
}

/// Current price × quantity for an order line, or `None` for unknown items.
pub fn line_subtotal(items: &[MenuItem], line: &OrderLine) -> Option<Money> {
    find_item(items, line.item_id).map(|item| item.price().multiply_quantity(line.quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<MenuItem> {
        let mut sold_out = MenuItem::new(3, 1, "Onion Rings", 350);
        sold_out.available = false;
        vec![
            MenuItem::new(1, 1, "Burger", 900),
            MenuItem::new(2, 2, "Cola", 200),
            sold_out,
            MenuItem::new(4, 1, "Fries", 300),
        ]
    }

    #[test]
    fn test_available_items_all_categories() {
        let items = catalog();
        let ids: Vec<ItemId> = available_items(&items, None).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn test_available_items_by_category() {
        let items = catalog();
        let ids: Vec<ItemId> = available_items(&items, Some(1)).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(available_items(&items, Some(99)).is_empty());
    }

    #[test]
    fn test_order_line_joins() {
        let items = catalog();
        let known = OrderLine { item_id: 4, quantity: 3 };
        let gone = OrderLine { item_id: 77, quantity: 1 };

        assert_eq!(item_name_or_unknown(&items, known.item_id), "Fries");
        assert_eq!(line_subtotal(&items, &known), Some(Money::from_cents(900)));

        assert_eq!(item_name_or_unknown(&items, gone.item_id), UNKNOWN_ITEM_NAME);
        assert_eq!(line_subtotal(&items, &gone), None);
    }
}
