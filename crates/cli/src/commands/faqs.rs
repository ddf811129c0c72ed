//! FAQ commands.

use flashfood_admin::api::ApiClient;
use flashfood_admin::components::data_table::FaqRow;
use flashfood_admin_core::PageRequest;

use super::{CliError, PAGE_SIZE, print_json};

/// Print one page of FAQs.
pub async fn list(client: &ApiClient, page: u32) -> Result<(), CliError> {
    let result = client
        .list_faqs(PageRequest::new(PAGE_SIZE, page.max(1)))
        .await?;
    let rows: Vec<FaqRow> = result.items.iter().map(FaqRow::project).collect();
    print_json(&rows)
}
