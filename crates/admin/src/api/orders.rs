//! Order endpoints.

use flashfood_admin_core::{Order, OrderId, Page, PageRequest};
use tracing::instrument;

use super::client::page_query;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch one page of orders.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(page = request.page, limit = request.limit))]
    pub async fn list_orders(&self, request: PageRequest) -> Result<Page<Order>, ApiError> {
        let page = self.get("orders/paginated", &page_query(request)).await?;
        Ok(page.unwrap_or_else(Page::empty))
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend reports `EC != 0`, or
    /// the envelope carries no order.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        let path = format!("orders/{id}");
        self.get(&path, &[]).await?.ok_or(ApiError::MissingData)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        let path = format!("orders/{id}");
        let _: Option<serde_json::Value> = self.delete(&path).await?;
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flashfood_admin_core::{Money, OrderStatus};
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::SessionStore;

    async fn client_for(server: &MockServer) -> ApiClient {
        let base = Url::parse(&server.uri()).expect("url");
        ApiClient::new(&base, Duration::from_secs(5), SessionStore::new()).expect("client")
    }

    #[tokio::test]
    async fn test_get_order_decodes_money_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/FF_ORDER_7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "EC": 0,
                "data": {
                    "id": "FF_ORDER_7",
                    "status": "DELIVERED",
                    "total_amount": "125000.50",
                    "delivery_fee": "15000"
                }
            })))
            .mount(&server)
            .await;

        let order = client_for(&server)
            .await
            .get_order(&OrderId::new("FF_ORDER_7"))
            .await
            .expect("order");

        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.total_amount, "125000.50".parse::<Money>().expect("money"));
    }

    #[tokio::test]
    async fn test_get_order_without_data_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"EC": 0})))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .await
            .get_order(&OrderId::new("FF_ORDER_7"))
            .await;
        assert!(matches!(result, Err(ApiError::MissingData)));
    }

    #[tokio::test]
    async fn test_delete_order_reports_application_errors() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/orders/FF_ORDER_7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"EC": 3, "EM": "Order is in progress"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .await
            .delete_order(&OrderId::new("FF_ORDER_7"))
            .await;
        assert!(matches!(result, Err(ApiError::Application { code: 3, .. })));
    }
}
