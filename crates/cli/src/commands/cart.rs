//! Cart editing commands.

use std::fmt::Write as _;

use marketplace_cart::{CartError, CartStore, KeyValueStore};
use marketplace_core::{ProductId, ProductSnapshot, format_amount};
use tracing::info;

/// Build a product snapshot from command-line fields.
pub fn snapshot(
    id: ProductId,
    name: Option<String>,
    regular_price: Option<String>,
    sale_price: Option<String>,
) -> ProductSnapshot {
    let mut product = ProductSnapshot::new(id);
    product.name = name;
    product.regular_price = regular_price;
    product.sale_price = sale_price;
    product
}

/// Add units of a product.
///
/// # Errors
///
/// Returns an error if `quantity` is zero.
pub fn add<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    product: ProductSnapshot,
    quantity: u32,
    color: Option<&str>,
    size: Option<&str>,
) -> Result<(), CartError> {
    let id = product.id;
    cart.add_to_cart(product, quantity, color, size)?;
    info!(product_id = %id, quantity, items = cart.cart_item_count(), "Added to cart");
    Ok(())
}

/// Remove a line.
pub fn remove<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    id: ProductId,
    color: Option<&str>,
    size: Option<&str>,
) {
    if !cart.is_in_cart(id, color, size) {
        info!(product_id = %id, "Line not in cart, nothing to remove");
        return;
    }
    cart.remove_from_cart(id, color, size);
    info!(product_id = %id, items = cart.cart_item_count(), "Removed from cart");
}

/// Set the quantity of a line.
pub fn update<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    id: ProductId,
    quantity: u32,
    color: Option<&str>,
    size: Option<&str>,
) {
    if !cart.is_in_cart(id, color, size) {
        info!(product_id = %id, "Line not in cart, nothing to update");
        return;
    }
    cart.update_quantity(id, quantity, color, size);
    info!(product_id = %id, quantity, items = cart.cart_item_count(), "Updated cart line");
}

/// Empty the cart.
pub fn clear<S: KeyValueStore>(cart: &mut CartStore<S>) {
    cart.clear_cart();
}

/// Print the cart to stdout.
#[allow(clippy::print_stdout)]
pub fn show<S: KeyValueStore>(cart: &CartStore<S>) {
    print!("{}", render(cart));
}

/// Render cart lines followed by count and total.
pub fn render<S: KeyValueStore>(cart: &CartStore<S>) -> String {
    let mut out = String::new();

    if cart.is_empty() {
        out.push_str("Cart is empty\n");
    }

    for item in cart.items() {
        let variant = match (item.selected_color.as_deref(), item.selected_size.as_deref()) {
            (Some(color), Some(size)) => format!(" ({color}, {size})"),
            (Some(v), None) | (None, Some(v)) => format!(" ({v})"),
            (None, None) => String::new(),
        };
        let _ = writeln!(
            out,
            "#{id} {name}{variant} x{qty} @ {unit} = {line}",
            id = item.id,
            name = item.product.name.as_deref().unwrap_or("(unnamed)"),
            qty = item.quantity,
            unit = format_amount(item.product.effective_unit_price()),
            line = format_amount(item.line_total()),
        );
    }

    let _ = writeln!(out, "Items: {}", cart.cart_item_count());
    let _ = writeln!(out, "Total: {}", format_amount(cart.cart_total()));
    out
}
