//! Admin product management: create, update, delete.

use liquid_luxury_core::{Category, Product, ProductId};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use crate::gateway::RequestBody;
use crate::notice::{Notice, NoticeSink};
use crate::resource::{ResourceCache, ResourceKey};

/// In-memory image payload destined for the multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    fn into_part(self) -> Part {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)
            .unwrap_or_else(|_| Part::bytes(Vec::new()))
    }
}

/// The product form as typed, all text fields free-form. The backend parses
/// price and stock; the client only checks that nothing was left blank.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub description: String,
    pub category: Option<Category>,
    pub calories: String,
    pub sugar: String,
    pub caffeine: String,
    pub serving: String,
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    /// Pre-fill the edit form from an existing product. The image slot stays
    /// empty; leaving it empty on update keeps the current image.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            description: product.description.clone(),
            category: Some(product.category),
            calories: product.nutrition.calories.clone(),
            sugar: product.nutrition.sugar.clone(),
            caffeine: product.nutrition.caffeine.clone(),
            serving: product.nutrition.serving.clone(),
            image: None,
        }
    }

    /// Validate before any request. `image_required` is true on create;
    /// updates keep the stored image when none is attached.
    ///
    /// # Errors
    ///
    /// Returns the message to surface when a field is missing.
    pub fn validate(&self, image_required: bool) -> Result<(), String> {
        let text_fields = [
            &self.name,
            &self.price,
            &self.stock,
            &self.description,
            &self.calories,
            &self.sugar,
            &self.caffeine,
            &self.serving,
        ];
        if text_fields.iter().any(|field| field.trim().is_empty()) || self.category.is_none() {
            return Err("Please fill in all fields".to_owned());
        }
        if image_required && self.image.is_none() {
            return Err("Please select a product image".to_owned());
        }
        Ok(())
    }

    fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("name", self.name)
            .text("price", self.price)
            .text("stock", self.stock)
            .text("description", self.description)
            .text(
                "category",
                self.category.map_or("", |category| category.as_str()).to_owned(),
            )
            .text("calories", self.calories)
            .text("sugar", self.sugar)
            .text("caffeine", self.caffeine)
            .text("serving", self.serving);
        if let Some(image) = self.image {
            form = form.part("image", image.into_part());
        }
        form
    }
}

/// Admin product table state.
pub struct ProductAdminScreen {
    resources: ResourceCache,
    products: Vec<Product>,
    load_failed: bool,
    pub notices: NoticeSink,
}

impl ProductAdminScreen {
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            resources,
            products: Vec::new(),
            load_failed: false,
            notices: NoticeSink::default(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Fetch the full product list (same resource the storefront reads).
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let response = self.resources.get(ResourceKey::Products, "/products").await;
        if !response.is_success() {
            self.load_failed = true;
            self.notices
                .push(Notice::error(response.message_or("Failed to fetch products")));
            return;
        }
        if let Ok(products) = response.decode::<Vec<Product>>() {
            self.products = products;
            self.load_failed = false;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Create a product. All fields plus the image are mandatory.
    #[instrument(skip(self, form))]
    pub async fn create(&mut self, form: ProductForm) -> bool {
        if let Err(message) = form.validate(true) {
            self.notices.push(Notice::error(message));
            return false;
        }
        let response = self
            .resources
            .client()
            .authed(
                Method::POST,
                "/add-product",
                RequestBody::Multipart(form.into_form()),
            )
            .await;
        self.finish_write(&response, "Product added successfully", "Failed to add product")
            .await
    }

    /// Update a product. The image is optional here.
    #[instrument(skip(self, form))]
    pub async fn update(&mut self, product_id: &ProductId, form: ProductForm) -> bool {
        if let Err(message) = form.validate(false) {
            self.notices.push(Notice::error(message));
            return false;
        }
        let response = self
            .resources
            .client()
            .authed(
                Method::PUT,
                &format!("/update-product/{product_id}"),
                RequestBody::Multipart(form.into_form()),
            )
            .await;
        self.finish_write(
            &response,
            "Product updated successfully",
            "Failed to update product",
        )
        .await
    }

    /// Delete a product (caller has already confirmed), then re-fetch.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, product_id: &ProductId) -> bool {
        let response = self
            .resources
            .client()
            .authed(
                Method::DELETE,
                &format!("/delete-product/{product_id}"),
                RequestBody::Empty,
            )
            .await;
        self.finish_write(
            &response,
            "Product deleted successfully",
            "Failed to delete product",
        )
        .await
    }

    async fn finish_write(
        &mut self,
        response: &crate::gateway::ApiResponse,
        success: &str,
        fallback: &str,
    ) -> bool {
        if response.is_success() {
            self.resources
                .invalidate(&[ResourceKey::Products, ResourceKey::PreviewProducts])
                .await;
            self.load().await;
            self.notices.push(Notice::success(success));
            true
        } else {
            self.notices.push(Notice::error(response.message_or(fallback)));
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::gateway::ApiClient;
    use crate::session::Session;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn filled_form() -> ProductForm {
        ProductForm {
            name: "Cold Brew".to_owned(),
            price: "4.50".to_owned(),
            stock: "12".to_owned(),
            description: "Slow-steeped".to_owned(),
            category: Some(Category::Coffee),
            calories: "15 kcal".to_owned(),
            sugar: "0g".to_owned(),
            caffeine: "200mg".to_owned(),
            serving: "330ml".to_owned(),
            image: Some(ImageUpload {
                file_name: "cold-brew.png".to_owned(),
                mime_type: "image/png".to_owned(),
                bytes: vec![0u8; 4],
            }),
        }
    }

    #[test]
    fn test_create_requires_every_field_and_image() {
        assert!(filled_form().validate(true).is_ok());

        let mut missing_nutrition = filled_form();
        missing_nutrition.caffeine = "  ".to_owned();
        assert!(missing_nutrition.validate(true).is_err());

        let mut missing_image = filled_form();
        missing_image.image = None;
        assert!(missing_image.validate(true).is_err());
    }

    #[test]
    fn test_update_accepts_missing_image() {
        let mut form = filled_form();
        form.image = None;
        assert!(form.validate(false).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected_without_a_request() {
        let session = Session::new(Arc::new(MemoryStore::new()));
        let config = ClientConfig::for_api_url("http://127.0.0.1:9").unwrap();
        let mut screen =
            ProductAdminScreen::new(ResourceCache::new(ApiClient::new(&config, session).unwrap()));

        let created = screen.create(ProductForm::default()).await;
        assert!(!created);
        let notices = screen.notices.take_notices();
        assert_eq!(notices[0].message, "Please fill in all fields");
    }
}
