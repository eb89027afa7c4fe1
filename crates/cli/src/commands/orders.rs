//! Order history.

use liquid_luxury_client::orders::OrderHistoryScreen;

use super::{Context, report};

pub async fn list(ctx: &Context, expand: bool) {
    let mut screen = OrderHistoryScreen::new(ctx.resources.clone());
    screen.load().await;
    if screen.orders().is_empty() {
        println!("No orders yet");
    }
    for order in screen.orders() {
        println!(
            "{}  {}  {} item(s)  total {}",
            order.id,
            order.status,
            order.items.len(),
            order.computed_total()
        );
        if expand {
            for line in &order.items {
                let name = line
                    .product
                    .as_ref()
                    .map_or("(product no longer available)", |p| p.name.as_str());
                println!(
                    "    {:<30} x{:<3} @ {:>8} = {:>8}",
                    name,
                    line.quantity,
                    line.price.to_string(),
                    line.subtotal().to_string()
                );
            }
        }
    }
    report(&mut screen.notices);
}
