//! FAQ endpoints.

use flashfood_admin_core::{Faq, FaqId, FaqPayload, Page, PageRequest};
use tracing::instrument;

use super::client::page_query;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch one page of FAQs.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(page = request.page, limit = request.limit))]
    pub async fn list_faqs(&self, request: PageRequest) -> Result<Page<Faq>, ApiError> {
        let page = self.get("faqs/paginated", &page_query(request)).await?;
        Ok(page.unwrap_or_else(Page::empty))
    }

    /// Create an FAQ.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self, payload), fields(question = %payload.question))]
    pub async fn create_faq(&self, payload: &FaqPayload) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self.post("faqs", payload).await?;
        tracing::info!("FAQ created");
        Ok(())
    }

    /// Replace the editable fields of an FAQ.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self, payload), fields(faq_id = %id))]
    pub async fn update_faq(&self, id: &FaqId, payload: &FaqPayload) -> Result<(), ApiError> {
        let path = format!("faqs/{id}");
        let _: Option<serde_json::Value> = self.patch(&path, payload).await?;
        tracing::info!(faq_id = %id, "FAQ updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flashfood_admin_core::{AnswerBlock, FaqStatus, FaqType, TargetUser};
    use url::Url;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::SessionStore;

    async fn client_for(server: &MockServer) -> ApiClient {
        let base = Url::parse(&server.uri()).expect("url");
        ApiClient::new(&base, Duration::from_secs(5), SessionStore::new()).expect("client")
    }

    fn payload() -> FaqPayload {
        FaqPayload {
            question: "How do I pay?".to_string(),
            answer: vec![AnswerBlock::text("Hi")],
            faq_type: FaqType::Payment,
            status: FaqStatus::Draft,
            target_user: vec![TargetUser::Customer, TargetUser::Driver],
        }
    }

    #[tokio::test]
    async fn test_list_faqs_sends_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/faqs/paginated"))
            .and(query_param("limit", "10"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "EC": 0,
                "data": {
                    "items": [{"id": "FF_FAQ_1", "question": "Q", "answer": [], "type": "SERVICE",
                               "status": "ACTIVE", "target_user": ["DRIVER"], "created_at": 1700000000}],
                    "totalItems": 21,
                    "totalPages": 3
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .await
            .list_faqs(PageRequest::new(10, 3))
            .await
            .expect("page");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_items, 21);
    }

    #[tokio::test]
    async fn test_create_and_update_send_full_payload() {
        let server = MockServer::start().await;
        let expected = serde_json::json!({
            "question": "How do I pay?",
            "answer": [{"type": "text", "value": "Hi"}],
            "type": "PAYMENT",
            "status": "DRAFT",
            "target_user": ["CUSTOMER", "DRIVER"],
        });
        Mock::given(method("POST"))
            .and(path("/faqs"))
            .and(body_json(expected.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"EC": 0})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/faqs/FF_FAQ_1"))
            .and(body_json(expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"EC": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.create_faq(&payload()).await.expect("create");
        client
            .update_faq(&FaqId::new("FF_FAQ_1"), &payload())
            .await
            .expect("update");
    }
}
