use crate::domain::communication::Communication;
use crate::pagination::{Paginated, clamp_page, total_pages};
use crate::repository::{CommunicationReader, Pagination};
use crate::services::ServiceResult;

pub const COMMUNICATIONS_PER_PAGE: usize = 50;

/// Loads one page of the communication log.
pub async fn load_communications<R>(
    repo: &R,
    page: Option<usize>,
) -> ServiceResult<Paginated<Communication>>
where
    R: CommunicationReader + ?Sized,
{
    let requested = page.unwrap_or(1).max(1);
    let fetch = move |page: usize| {
        repo.list_communications(Pagination {
            page,
            per_page: COMMUNICATIONS_PER_PAGE,
        })
    };

    let (mut total, mut items) = fetch(requested).await.map_err(|err| {
        log::error!("Failed to list communications: {err}");
        err
    })?;

    let page = clamp_page(requested, total_pages(total, COMMUNICATIONS_PER_PAGE));
    if page != requested {
        (total, items) = fetch(page).await.map_err(|err| {
            log::error!("Failed to list communications: {err}");
            err
        })?;
    }

    Ok(Paginated::new(items, page, COMMUNICATIONS_PER_PAGE, total))
}
