//! Product browsing.

use liquid_luxury_client::catalog::{CatalogScreen, CategoryFilter, ProductSort};
use liquid_luxury_core::ProductId;

use super::{Context, report};

pub struct ListOptions {
    pub query: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: usize,
    pub page_size: Option<usize>,
}

fn parse_sort(raw: &str) -> ProductSort {
    match raw {
        "price-asc" => ProductSort::PriceLowToHigh,
        "price-desc" => ProductSort::PriceHighToLow,
        "name" => ProductSort::Name,
        _ => ProductSort::Featured,
    }
}

pub async fn list(ctx: &Context, options: ListOptions) {
    let mut catalog = CatalogScreen::new(ctx.resources.clone());
    catalog.load().await;

    if let Some(query) = options.query {
        catalog.set_query(query);
    }
    if let Some(category) = &options.category {
        catalog.set_category(CategoryFilter::parse(category));
    }
    if let Some(sort) = &options.sort {
        catalog.set_sort(parse_sort(sort));
    }
    if let Some(page_size) = options.page_size {
        catalog.set_page_size(page_size);
    }
    catalog.set_page(options.page);

    for product in catalog.visible_page() {
        println!(
            "{}  {:<30} {:>8}  stock {:>4}  [{}]",
            product.id,
            product.name,
            product.price.to_string(),
            product.stock,
            product.category
        );
    }
    println!("page {}/{}", catalog.page(), catalog.total_pages());
    report(&mut catalog.notices);
}

pub async fn show(ctx: &Context, id: &str) {
    let catalog = CatalogScreen::new(ctx.resources.clone());
    match catalog.product_detail(&ProductId::new(id)).await {
        Some(product) => {
            println!("{}  ({})", product.name, product.category);
            println!("price: {}", product.price);
            println!("stock: {}", product.stock);
            println!("{}", product.description);
            println!(
                "nutrition: {} | sugar {} | caffeine {} | serving {}",
                product.nutrition.calories,
                product.nutrition.sugar,
                product.nutrition.caffeine,
                product.nutrition.serving
            );
        }
        None => tracing::error!("Product not found: {id}"),
    }
}
