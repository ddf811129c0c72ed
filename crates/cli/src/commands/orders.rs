//! Order commands.

use flashfood_admin::api::ApiClient;
use flashfood_admin::components::data_table::OrderRow;
use flashfood_admin_core::{OrderId, OrderStatus, PageRequest};

use super::{CliError, PAGE_SIZE, print_json};

/// Print one page of orders.
pub async fn list(client: &ApiClient, page: u32) -> Result<(), CliError> {
    let result = client
        .list_orders(PageRequest::new(PAGE_SIZE, page.max(1)))
        .await?;
    tracing::info!(
        page,
        total_pages = result.total_pages,
        total_items = result.total_items,
        "Orders"
    );
    let rows: Vec<OrderRow> = result.items.iter().map(OrderRow::project).collect();
    print_json(&rows)
}

/// Print one order in full.
pub async fn show(client: &ApiClient, id: &str) -> Result<(), CliError> {
    let order = client.get_order(&OrderId::new(id)).await?;
    print_json(&order)
}

/// Delete an order that has not been delivered.
pub async fn delete(client: &ApiClient, id: &str) -> Result<(), CliError> {
    let id = OrderId::new(id);
    let order = client.get_order(&id).await?;
    if order.status == OrderStatus::Delivered {
        return Err(CliError::Validation(
            "Delivered orders cannot be deleted".to_string(),
        ));
    }
    client.delete_order(&id).await?;
    tracing::info!(order_id = %id, "Order deleted");
    Ok(())
}
