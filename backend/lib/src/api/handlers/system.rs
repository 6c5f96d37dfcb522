//! This module contains the handlers for the `/system` endpoints

use axum::extract::{Path, State};

use crate::{
    error::Error,
    resources::ResourceRequest,
    services::{engine::ResourceResponse, Services},
};

pub async fn list_blocks(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services.engine.list(&services.resources.blocks, &request).await
}

pub async fn get_block(
    State(services): State<Services>,
    Path(block_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.block, &request, &block_id)
        .await
}

pub async fn list_extrinsics(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .list(&services.resources.extrinsics, &request)
        .await
}

pub async fn get_extrinsic(
    State(services): State<Services>,
    Path(extrinsic_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.extrinsic, &request, &extrinsic_id)
        .await
}

pub async fn list_events(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services.engine.list(&services.resources.events, &request).await
}

pub async fn get_event(
    State(services): State<Services>,
    Path(event_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.event, &request, &event_id)
        .await
}

pub async fn list_runtimes(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .list(&services.resources.runtimes, &request)
        .await
}

pub async fn get_runtime(
    State(services): State<Services>,
    Path(spec_version): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.runtime, &request, &spec_version)
        .await
}

pub async fn get_runtime_module(
    State(services): State<Services>,
    Path(item_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.runtime_module, &request, &item_id)
        .await
}

pub async fn list_runtime_calls(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .list(&services.resources.runtime_calls, &request)
        .await
}

pub async fn get_runtime_call(
    State(services): State<Services>,
    Path(item_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.runtime_call, &request, &item_id)
        .await
}

pub async fn list_runtime_events(
    State(services): State<Services>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .list(&services.resources.runtime_events, &request)
        .await
}

pub async fn get_runtime_event(
    State(services): State<Services>,
    Path(item_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.runtime_event, &request, &item_id)
        .await
}

pub async fn get_network_stats(
    State(services): State<Services>,
    Path(network_id): Path<String>,
    request: ResourceRequest,
) -> Result<ResourceResponse, Error> {
    services
        .engine
        .detail(&services.resources.network_stats, &request, &network_id)
        .await
}
