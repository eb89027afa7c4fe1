//! Cart and checkout.

use liquid_luxury_client::cart::{CartScreen, CheckoutOutcome};
use liquid_luxury_core::{CartItemId, CustomerDetails, ProductId};

use super::{Context, confirm, report};

pub async fn show(ctx: &Context) {
    let mut cart = CartScreen::new(ctx.resources.clone());
    cart.load().await;
    if cart.items().is_empty() {
        println!("Cart is empty");
    }
    for item in cart.items() {
        println!(
            "{}  {:<30} x{:<3} @ {:>8} = {:>8}",
            item.id,
            item.product.name,
            item.quantity,
            item.price.to_string(),
            item.subtotal().to_string()
        );
    }
    println!("subtotal: {}", cart.subtotal());
    println!("total:    {} (free delivery)", cart.total());
    report(&mut cart.notices);
}

pub async fn add(ctx: &Context, product_id: &str, quantity: u32) {
    let mut cart = CartScreen::new(ctx.resources.clone());
    cart.add(&ProductId::new(product_id), quantity).await;
    report(&mut cart.notices);
}

pub async fn set_quantity(ctx: &Context, item_id: &str, quantity: u32) {
    let mut cart = CartScreen::new(ctx.resources.clone());
    cart.load().await;
    cart.set_quantity(&CartItemId::new(item_id), quantity).await;
    report(&mut cart.notices);
}

pub async fn remove(ctx: &Context, item_id: &str, assume_yes: bool) {
    if !confirm("Remove item from cart?", assume_yes) {
        println!("Cancelled");
        return;
    }
    let mut cart = CartScreen::new(ctx.resources.clone());
    cart.load().await;
    cart.remove(&CartItemId::new(item_id)).await;
    report(&mut cart.notices);
}

pub struct CheckoutDetails {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub payment_method: String,
}

pub async fn checkout(ctx: &Context, details: CheckoutDetails, assume_yes: bool) {
    let mut cart = CartScreen::new(ctx.resources.clone());
    cart.load().await;
    if cart.items().is_empty() {
        tracing::error!("Nothing to check out");
        return;
    }
    if !confirm(
        &format!("Place order for {}?", cart.total()),
        assume_yes,
    ) {
        println!("Cancelled");
        return;
    }

    cart.open_checkout();
    cart.customer_details = CustomerDetails {
        name: details.name,
        location: details.location,
        phone_number: details.phone,
        payment_method: details.payment_method,
    };
    match cart.checkout().await {
        CheckoutOutcome::Placed => tracing::info!("Order placed"),
        CheckoutOutcome::Invalid => tracing::error!("Order details incomplete"),
        CheckoutOutcome::Failed => {}
    }
    report(&mut cart.notices);
}
