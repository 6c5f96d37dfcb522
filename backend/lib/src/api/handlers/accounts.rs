use axum::extract::{Path, State};

use crate::{
    error::Error,
    resources::ResourceRequest,
    services::{engine::ResourceResponse, Services},
};

pub async fn list_accounts(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .list(&services.resources.accounts, &request)
        .await
}

pub async fn get_account(
    State(services): State<Services>,
    Path(account_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.account, &request, &account_id)
        .await
}
