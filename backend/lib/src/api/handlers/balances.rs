use axum::extract::State;

use crate::{
    error::Error,
    resources::ResourceRequest,
    services::{engine::ResourceResponse, Services},
};

pub async fn list_transfers(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .list(&services.resources.transfers, &request)
        .await
}
