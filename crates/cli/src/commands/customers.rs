//! Customer commands.

use flashfood_admin::api::ApiClient;
use flashfood_admin::components::data_table::{CustomerRow, OrderRow};
use flashfood_admin_core::{CustomerId, PageRequest};

use super::{CliError, PAGE_SIZE, print_json};

fn now() -> i64 {
    flashfood_admin::pages::now_epoch_secs()
}

/// Print one page of customers.
pub async fn list(client: &ApiClient, page: u32) -> Result<(), CliError> {
    let result = client
        .list_customers(PageRequest::new(PAGE_SIZE, page.max(1)))
        .await?;
    let now = now();
    let rows: Vec<CustomerRow> = result
        .items
        .iter()
        .map(|customer| CustomerRow::project(customer, now))
        .collect();

    tracing::info!(
        page,
        total_pages = result.total_pages,
        total_items = result.total_items,
        "Customers"
    );
    print_json(&rows)
}

/// Print customers matching `query`.
pub async fn search(client: &ApiClient, query: &str) -> Result<(), CliError> {
    let query = query.trim();
    if query.is_empty() {
        return print_json(&Vec::<CustomerRow>::new());
    }
    let now = now();
    let rows: Vec<CustomerRow> = client
        .search_customers(query)
        .await?
        .iter()
        .map(|customer| CustomerRow::project(customer, now))
        .collect();
    print_json(&rows)
}

/// Ban a customer.
pub async fn ban(client: &ApiClient, id: &str, reason: &str) -> Result<(), CliError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(CliError::Validation(
            "Please provide a reason for banning this customer".to_string(),
        ));
    }
    client.ban_customer(&CustomerId::new(id), reason).await?;
    tracing::info!(customer_id = id, "Customer banned");
    Ok(())
}

/// Print a customer's order history.
pub async fn orders(client: &ApiClient, id: &str) -> Result<(), CliError> {
    let rows: Vec<OrderRow> = client
        .customer_orders(&CustomerId::new(id))
        .await?
        .iter()
        .map(OrderRow::project)
        .collect();
    print_json(&rows)
}
