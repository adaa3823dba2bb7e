use reqwest::Method;

use crate::domain::communication::Communication;
use crate::models::communication::CommunicationsEnvelope;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CommunicationReader, HttpRepository, Pagination};

impl CommunicationReader for HttpRepository {
    async fn list_communications(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<Communication>)> {
        let params = [
            ("pageNumber", pagination.page.to_string()),
            ("pageSize", pagination.per_page.to_string()),
        ];
        let envelope: CommunicationsEnvelope = self
            .send_json(self.request(Method::GET, "communications").query(&params))
            .await?;
        Ok(envelope.into_domain())
    }
}
