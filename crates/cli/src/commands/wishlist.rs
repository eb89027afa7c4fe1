//! Wishlist management.

use liquid_luxury_client::cart::CartScreen;
use liquid_luxury_client::wishlist::{WishlistScreen, WishlistSort};
use liquid_luxury_core::{ProductId, WishlistItemId};

use super::{Context, confirm, report};

fn parse_sort(raw: &str) -> WishlistSort {
    match raw {
        "price-asc" => WishlistSort::PriceLowToHigh,
        "price-desc" => WishlistSort::PriceHighToLow,
        "name" => WishlistSort::Name,
        _ => WishlistSort::AddedDate,
    }
}

pub async fn show(ctx: &Context, sort: Option<&str>) {
    let mut wishlist = WishlistScreen::new(ctx.resources.clone());
    wishlist.load().await;
    if let Some(sort) = sort {
        wishlist.set_sort(parse_sort(sort));
    }
    if wishlist.items().is_empty() {
        println!("Wishlist is empty");
    }
    for item in wishlist.items() {
        println!(
            "{}  {:<30} {:>8}",
            item.id,
            item.product.name,
            item.product.price.to_string()
        );
    }
    report(&mut wishlist.notices);
}

pub async fn add(ctx: &Context, product_id: &str) {
    let mut wishlist = WishlistScreen::new(ctx.resources.clone());
    wishlist.add(&ProductId::new(product_id)).await;
    report(&mut wishlist.notices);
}

pub async fn remove(ctx: &Context, item_id: &str, assume_yes: bool) {
    if !confirm("Remove item from wishlist?", assume_yes) {
        println!("Cancelled");
        return;
    }
    let mut wishlist = WishlistScreen::new(ctx.resources.clone());
    wishlist.load().await;
    wishlist.remove(&WishlistItemId::new(item_id)).await;
    report(&mut wishlist.notices);
}

pub async fn move_to_cart(ctx: &Context, item_id: &str) {
    let mut wishlist = WishlistScreen::new(ctx.resources.clone());
    let mut cart = CartScreen::new(ctx.resources.clone());
    wishlist.load().await;
    wishlist
        .move_to_cart(&WishlistItemId::new(item_id), &mut cart)
        .await;
    report(&mut cart.notices);
    report(&mut wishlist.notices);
}
