use super::client::ApiClient;
use super::result::ApiResult;
use crate::models::Category;

/// `/categories` request group
pub struct CategoriesApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl CategoriesApi<'_> {
    pub async fn get_all(&self) -> ApiResult<Vec<Category>> {
        let outcome = self.client.execute(self.client.get("/categories")).await;
        ApiResult::from_outcome(outcome, "Failed to fetch categories")
    }
}
