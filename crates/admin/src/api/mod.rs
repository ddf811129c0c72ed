//! FlashFood backend REST API.
//!
//! [`ApiClient`] is the HTTP implementation; page controllers depend on the
//! [`DashboardApi`] trait so they can be driven by an in-process fake in
//! tests.
//!
//! # Conventions
//!
//! - Paths are relative to the configured base URL
//! - Every response is a `{EC, EM, data}` envelope; `EC == 0` is success
//! - A 401 clears the shared [`SessionStore`]

mod client;
mod customer_care;
mod customers;
mod error;
mod faqs;
mod orders;
mod session;
mod uploads;

pub use client::{ApiClient, REQUEST_ID_HEADER};
pub use error::ApiError;
pub use session::{Session, SessionStore};
pub use uploads::ImageUpload;

use async_trait::async_trait;
use flashfood_admin_core::{
    ComplaintHistory, Customer, CustomerCareId, CustomerCareRep, CustomerId, Faq, FaqId,
    FaqPayload, ImageRef, Order, OrderId, Page, PageRequest,
};

/// Backend operations used by the dashboard pages.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// One page of customers.
    async fn customers_page(&self, request: PageRequest) -> Result<Page<Customer>, ApiError>;

    /// Customers matching a free-text query.
    async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, ApiError>;

    /// Order history of a customer.
    async fn customer_orders(&self, id: &CustomerId) -> Result<Vec<Order>, ApiError>;

    /// Complaint history of a customer.
    async fn customer_complaints(&self, id: &CustomerId)
    -> Result<Vec<ComplaintHistory>, ApiError>;

    /// Ban a customer.
    async fn ban_customer(&self, id: &CustomerId, reason: &str) -> Result<(), ApiError>;

    /// One page of orders.
    async fn orders_page(&self, request: PageRequest) -> Result<Page<Order>, ApiError>;

    /// A single order.
    async fn order(&self, id: &OrderId) -> Result<Order, ApiError>;

    /// Delete an order.
    async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError>;

    /// One page of FAQs.
    async fn faqs_page(&self, request: PageRequest) -> Result<Page<Faq>, ApiError>;

    /// Create an FAQ.
    async fn create_faq(&self, payload: &FaqPayload) -> Result<(), ApiError>;

    /// Update an FAQ.
    async fn update_faq(&self, id: &FaqId, payload: &FaqPayload) -> Result<(), ApiError>;

    /// Upload one image.
    async fn upload_image(&self, upload: ImageUpload) -> Result<ImageRef, ApiError>;

    /// One page of customer-care representatives.
    async fn customer_care_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<CustomerCareRep>, ApiError>;

    /// Toggle a representative's availability.
    async fn set_customer_care_availability(
        &self,
        id: &CustomerCareId,
        available_for_work: bool,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn customers_page(&self, request: PageRequest) -> Result<Page<Customer>, ApiError> {
        self.list_customers(request).await
    }

    async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, ApiError> {
        Self::search_customers(self, query).await
    }

    async fn customer_orders(&self, id: &CustomerId) -> Result<Vec<Order>, ApiError> {
        Self::customer_orders(self, id).await
    }

    async fn customer_complaints(
        &self,
        id: &CustomerId,
    ) -> Result<Vec<ComplaintHistory>, ApiError> {
        Self::customer_complaints(self, id).await
    }

    async fn ban_customer(&self, id: &CustomerId, reason: &str) -> Result<(), ApiError> {
        Self::ban_customer(self, id, reason).await
    }

    async fn orders_page(&self, request: PageRequest) -> Result<Page<Order>, ApiError> {
        self.list_orders(request).await
    }

    async fn order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get_order(id).await
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        Self::delete_order(self, id).await
    }

    async fn faqs_page(&self, request: PageRequest) -> Result<Page<Faq>, ApiError> {
        self.list_faqs(request).await
    }

    async fn create_faq(&self, payload: &FaqPayload) -> Result<(), ApiError> {
        Self::create_faq(self, payload).await
    }

    async fn update_faq(&self, id: &FaqId, payload: &FaqPayload) -> Result<(), ApiError> {
        Self::update_faq(self, id, payload).await
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<ImageRef, ApiError> {
        Self::upload_image(self, upload).await
    }

    async fn customer_care_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<CustomerCareRep>, ApiError> {
        self.list_customer_care(request).await
    }

    async fn set_customer_care_availability(
        &self,
        id: &CustomerCareId,
        available_for_work: bool,
    ) -> Result<(), ApiError> {
        Self::set_customer_care_availability(self, id, available_for_work).await
    }
}
