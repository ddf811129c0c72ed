//! In-process [`DashboardApi`] for controller and route tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use flashfood_admin_core::{
    AnswerBlock, ComplaintHistory, Customer, CustomerCareId, CustomerCareRep, CustomerId,
    EpochSeconds, Faq, FaqId, FaqPayload, ImageRef, LinkedUser, Order, OrderId, Page,
    PageRequest,
};

use crate::api::{ApiError, DashboardApi, ImageUpload};

/// Fake backend holding its data in memory.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub customers: Mutex<Vec<Customer>>,
    /// When set, customer pages answer with this `EC`.
    pub customers_error: Mutex<Option<i64>>,
    pub search_results: Mutex<Vec<Customer>>,
    pub customer_orders: Mutex<Vec<Order>>,
    pub complaints: Mutex<Vec<ComplaintHistory>>,
    pub fail_ban: AtomicBool,
    pub orders: Mutex<Vec<Order>>,
    pub fail_delete: AtomicBool,
    pub faqs: Mutex<Vec<Faq>>,
    pub fail_faq_writes: AtomicBool,
    pub upload: Mutex<Option<ImageRef>>,
    pub reps: Mutex<Vec<CustomerCareRep>>,
    pub fail_availability: AtomicBool,
    /// How long ban, delete, FAQ writes and uploads take.
    pub write_delay: Mutex<Duration>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("lock").push(call.into());
    }

    async fn settle_write(&self) {
        let delay = *self.write_delay.lock().expect("lock");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

fn paginate<T: Clone>(all: &[T], request: PageRequest) -> Page<T> {
    let limit = request.limit.max(1) as usize;
    let total_pages = u32::try_from(all.len().div_ceil(limit)).expect("pages");
    let start = (request.page.saturating_sub(1) as usize) * limit;
    Page {
        items: all.iter().skip(start).take(limit).cloned().collect(),
        total_items: all.len() as u64,
        total_pages,
        current_page: Some(request.page),
    }
}

fn application(code: i64) -> ApiError {
    ApiError::Application {
        code,
        message: Some("rejected".to_string()),
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn customers_page(&self, request: PageRequest) -> Result<Page<Customer>, ApiError> {
        self.record(format!("customers_page:{}", request.page));
        if let Some(code) = *self.customers_error.lock().expect("lock") {
            return Err(application(code));
        }
        Ok(paginate(&self.customers.lock().expect("lock"), request))
    }

    async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, ApiError> {
        self.record(format!("search:{query}"));
        Ok(self.search_results.lock().expect("lock").clone())
    }

    async fn customer_orders(&self, id: &CustomerId) -> Result<Vec<Order>, ApiError> {
        self.record(format!("customer_orders:{id}"));
        Ok(self.customer_orders.lock().expect("lock").clone())
    }

    async fn customer_complaints(
        &self,
        id: &CustomerId,
    ) -> Result<Vec<ComplaintHistory>, ApiError> {
        self.record(format!("customer_complaints:{id}"));
        Ok(self.complaints.lock().expect("lock").clone())
    }

    async fn ban_customer(&self, id: &CustomerId, reason: &str) -> Result<(), ApiError> {
        self.record(format!("ban:{id}:{reason}"));
        self.settle_write().await;
        if self.fail_ban.load(Ordering::SeqCst) {
            return Err(application(1));
        }
        Ok(())
    }

    async fn orders_page(&self, request: PageRequest) -> Result<Page<Order>, ApiError> {
        self.record(format!("orders_page:{}", request.page));
        Ok(paginate(&self.orders.lock().expect("lock"), request))
    }

    async fn order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.record(format!("order:{id}"));
        self.orders
            .lock()
            .expect("lock")
            .iter()
            .find(|order| &order.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("orders/{id}")))
    }

    async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        self.record(format!("delete_order:{id}"));
        self.settle_write().await;
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(application(3));
        }
        self.orders.lock().expect("lock").retain(|order| &order.id != id);
        Ok(())
    }

    async fn faqs_page(&self, request: PageRequest) -> Result<Page<Faq>, ApiError> {
        self.record(format!("faqs_page:{}", request.page));
        Ok(paginate(&self.faqs.lock().expect("lock"), request))
    }

    async fn create_faq(&self, payload: &FaqPayload) -> Result<(), ApiError> {
        self.record(format!("create_faq:{}", payload.question));
        self.settle_write().await;
        if self.fail_faq_writes.load(Ordering::SeqCst) {
            return Err(application(1));
        }
        let mut faqs = self.faqs.lock().expect("lock");
        let id = FaqId::new(format!("FF_FAQ_{}", faqs.len() + 1));
        faqs.push(faq_from_payload(id, payload));
        Ok(())
    }

    async fn update_faq(&self, id: &FaqId, payload: &FaqPayload) -> Result<(), ApiError> {
        self.record(format!("update_faq:{id}"));
        self.settle_write().await;
        if self.fail_faq_writes.load(Ordering::SeqCst) {
            return Err(application(1));
        }
        let mut faqs = self.faqs.lock().expect("lock");
        if let Some(faq) = faqs.iter_mut().find(|faq| &faq.id == id) {
            *faq = faq_from_payload(id.clone(), payload);
        }
        Ok(())
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<ImageRef, ApiError> {
        self.record(format!("upload:{}", upload.file_name));
        self.settle_write().await;
        self.upload
            .lock()
            .expect("lock")
            .clone()
            .ok_or(ApiError::InvalidUpload)
    }

    async fn customer_care_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<CustomerCareRep>, ApiError> {
        self.record(format!("customer_care_page:{}", request.page));
        Ok(paginate(&self.reps.lock().expect("lock"), request))
    }

    async fn set_customer_care_availability(
        &self,
        id: &CustomerCareId,
        available_for_work: bool,
    ) -> Result<(), ApiError> {
        self.record(format!("availability:{id}:{available_for_work}"));
        if self.fail_availability.load(Ordering::SeqCst) {
            return Err(application(2));
        }
        Ok(())
    }
}

fn faq_from_payload(id: FaqId, payload: &FaqPayload) -> Faq {
    Faq {
        id,
        question: payload.question.clone(),
        answer: payload.answer.clone(),
        faq_type: payload.faq_type,
        status: payload.status,
        target_user: payload.target_user.clone(),
        created_by_id: None,
        created_by: None,
        created_at: Some(EpochSeconds(1_700_000_000)),
        updated_at: None,
    }
}

/// A customer with a login account.
pub fn customer(id: &str, is_banned: bool, last_login: i64) -> Customer {
    Customer {
        id: CustomerId::new(id),
        first_name: "Customer".to_string(),
        last_name: id.to_string(),
        email: format!("{id}@flashfood.app"),
        user: Some(LinkedUser {
            email: format!("{id}@flashfood.app"),
        }),
        last_login,
        is_banned,
        ..Customer::default()
    }
}

/// An order in the given status.
pub fn order(id: &str, status: &str) -> Order {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "customer_id": "FF_CUS_1",
        "restaurant_id": "FF_RES_1",
        "status": status,
        "total_amount": "10.00",
    }))
    .expect("order")
}

/// A one-block FAQ.
pub fn faq(id: &str, question: &str) -> Faq {
    faq_from_payload(
        FaqId::new(id),
        &FaqPayload {
            question: question.to_string(),
            answer: vec![AnswerBlock::text("Answer")],
            faq_type: flashfood_admin_core::FaqType::Service,
            status: flashfood_admin_core::FaqStatus::Draft,
            target_user: vec![flashfood_admin_core::TargetUser::Driver],
        },
    )
}

/// A representative.
pub fn rep(id: &str, available_for_work: bool) -> CustomerCareRep {
    CustomerCareRep {
        id: CustomerCareId::new(id),
        first_name: "Agent".to_string(),
        last_name: id.to_string(),
        available_for_work,
        ..CustomerCareRep::default()
    }
}
