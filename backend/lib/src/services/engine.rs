//! Cache-aside serving of list and detail resources
//!
//! Every response is cached under the key of the request that produced it.
//! On a miss the first request takes the key's computation lock, computes and
//! stores the response; concurrent requests for the same key wait for the
//! stored value instead of computing it again.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::{
    config::Config,
    constants::cache::CACHE_STATUS_HEADER,
    data::cache::{boxed::BoxedCacheError, BoxedCacheStore, CachedResponse, LockToken},
    error::{Error, Result},
    models::{Envelope, PrimaryData},
    resources::{DetailResource, ListResource, QueryParams, ResourceRequest},
};

/// Value of the cache status header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

/// A served response, tagged with its cache status when caching is enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResponse {
    pub response: CachedResponse,
    pub cache_status: Option<CacheStatus>,
}

impl IntoResponse for ResourceResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = match self.response.body {
            Some(body) => (
                status,
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            None => status.into_response(),
        };

        if let Some(cache_status) = self.cache_status {
            response.headers_mut().insert(
                CACHE_STATUS_HEADER,
                HeaderValue::from_static(cache_status.as_str()),
            );
        }

        response
    }
}

fn cache_error(e: BoxedCacheError) -> Error {
    Error::Cache(e.to_string())
}

/// Whether a computed response may be stored
fn is_cacheable(response: &CachedResponse, cache_not_found: bool) -> bool {
    response.status == StatusCode::OK.as_u16()
        || (cache_not_found && response.status == StatusCode::NOT_FOUND.as_u16())
}

#[derive(Clone)]
pub struct ResourceEngine {
    cache: Arc<dyn BoxedCacheStore>,
    authors: Vec<String>,
    lock_timeout: Duration,
    lock_lease: Duration,
    lock_poll: Duration,
}

impl ResourceEngine {
    pub fn new(cache: Arc<dyn BoxedCacheStore>, config: &Config) -> Self {
        Self {
            cache,
            authors: config.api.authors.clone(),
            lock_timeout: Duration::from_millis(config.cache.lock_timeout_ms),
            lock_lease: Duration::from_millis(config.cache.lock_lease_ms),
            lock_poll: Duration::from_millis(config.cache.lock_poll_ms),
        }
    }

    /// Serve a page of `resource`
    pub async fn list<R: ListResource>(
        &self,
        resource: &R,
        request: &ResourceRequest,
    ) -> Result<ResourceResponse> {
        let ttl = resource.descriptor().list_ttl;

        self.serve(request, ttl, false, || {
            self.compute_list(resource, &request.params)
        })
        .await
    }

    /// Serve the entity of `resource` identified by `item_id`
    pub async fn detail<R: DetailResource>(
        &self,
        resource: &R,
        request: &ResourceRequest,
        item_id: &str,
    ) -> Result<ResourceResponse> {
        let descriptor = resource.descriptor();

        self.serve(
            request,
            descriptor.detail_ttl,
            descriptor.cache_not_found,
            || self.compute_detail(resource, &request.params, item_id),
        )
        .await
    }

    async fn compute_list<R: ListResource>(
        &self,
        resource: &R,
        params: &QueryParams,
    ) -> Result<CachedResponse> {
        let source = resource.apply_filters(resource.source(), params).await?;
        let items = resource.apply_paging(source, params).await?;

        let data = items
            .iter()
            .map(|item| resource.serialize_item(item))
            .collect::<Result<Vec<_>>>()?;

        let envelope = Envelope::new(PrimaryData::Many(data), &self.authors, resource.meta());

        Ok(CachedResponse {
            status: StatusCode::OK.as_u16(),
            body: Some(serde_json::to_string(&envelope)?),
        })
    }

    async fn compute_detail<R: DetailResource>(
        &self,
        resource: &R,
        params: &QueryParams,
        item_id: &str,
    ) -> Result<CachedResponse> {
        let Some(item) = resource.get_item(item_id).await? else {
            return Ok(CachedResponse {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: None,
            });
        };

        let object = resource.serialize_item(&item).await?;
        let relationships = resource.get_relationships(&params.include(), &item).await?;

        let envelope = Envelope::new(
            PrimaryData::One(Box::new(object)),
            &self.authors,
            resource.meta(),
        )
        .with_relationships(relationships);

        Ok(CachedResponse {
            status: StatusCode::OK.as_u16(),
            body: Some(serde_json::to_string(&envelope)?),
        })
    }

    /// Answer `request` from the cache, or with `compute` if nothing fresh is stored
    ///
    /// Without `ttl` nothing is looked up nor stored. Errors of `compute` are
    /// returned as is and never stored.
    async fn serve<F, Fut>(
        &self,
        request: &ResourceRequest,
        ttl: Option<Duration>,
        cache_not_found: bool,
        compute: F,
    ) -> Result<ResourceResponse>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedResponse>>,
    {
        let Some(ttl) = ttl else {
            return Ok(ResourceResponse {
                response: compute().await?,
                cache_status: None,
            });
        };

        let key = request.cache_key();

        if let Some(response) = self.lookup(&key, ttl).await? {
            debug!(target: "resource_engine", key = %key, "Cache hit");
            return Ok(hit(response));
        }

        let deadline = Instant::now() + self.lock_timeout;
        let token = loop {
            if let Some(token) = self
                .cache
                .try_lock(&key, self.lock_lease)
                .await
                .map_err(cache_error)?
            {
                break token;
            }

            if Instant::now() >= deadline {
                warn!(target: "resource_engine", key = %key, "Timed out waiting for a concurrent computation");
                return Err(Error::CacheLockTimeout(key));
            }

            debug!(target: "resource_engine", key = %key, "Waiting for a concurrent computation");
            sleep(self.lock_poll).await;

            if let Some(response) = self.lookup(&key, ttl).await? {
                debug!(target: "resource_engine", key = %key, "Cache filled while waiting");
                return Ok(hit(response));
            }
        };

        let guard = LockGuard::new(self.cache.clone(), key, token);
        let outcome = self.fill(guard.key(), ttl, cache_not_found, compute).await;
        guard.release().await;

        outcome
    }

    /// Compute and store the response of `key`, holding its computation lock
    async fn fill<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        cache_not_found: bool,
        compute: F,
    ) -> Result<ResourceResponse>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedResponse>>,
    {
        // the previous holder may have stored it right before we took the lock
        if let Some(response) = self.lookup(key, ttl).await? {
            return Ok(hit(response));
        }

        debug!(target: "resource_engine", key = %key, "Cache miss");
        let response = compute().await?;

        if is_cacheable(&response, cache_not_found) {
            self.cache
                .set(key, response.clone(), ttl)
                .await
                .map_err(cache_error)?;
        }

        Ok(ResourceResponse {
            response,
            cache_status: Some(CacheStatus::Miss),
        })
    }

    async fn lookup(&self, key: &str, ttl: Duration) -> Result<Option<CachedResponse>> {
        self.cache.get(key, ttl).await.map_err(cache_error)
    }
}

/// Computation lock held by the request filling a key
///
/// Released by [`LockGuard::release`], or from a spawned task when the
/// request is dropped before that.
struct LockGuard {
    cache: Arc<dyn BoxedCacheStore>,
    key: String,
    token: Option<LockToken>,
}

impl LockGuard {
    fn new(cache: Arc<dyn BoxedCacheStore>, key: String, token: LockToken) -> Self {
        Self {
            cache,
            key,
            token: Some(token),
        }
    }

    fn key(&self) -> &str {
        &self.key
    }

    async fn release(mut self) {
        if let Some(token) = self.token.take() {
            unlock(self.cache.as_ref(), &self.key, &token).await;
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(target: "resource_engine", key = %self.key, "No runtime to release computation lock, left to expire");
            return;
        };

        debug!(target: "resource_engine", key = %self.key, "Computation cancelled, releasing lock");
        let cache = self.cache.clone();
        let key = std::mem::take(&mut self.key);
        handle.spawn(async move {
            unlock(cache.as_ref(), &key, &token).await;
        });
    }
}

async fn unlock(cache: &dyn BoxedCacheStore, key: &str, token: &LockToken) {
    if let Err(e) = cache.unlock(key, token).await {
        warn!(target: "resource_engine", key = %key, error = %e, "Failed to release computation lock");
    }
}

fn hit(response: CachedResponse) -> ResourceResponse {
    ResourceResponse {
        response,
        cache_status: Some(CacheStatus::Hit),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use futures::future::join_all;
    use serde::Serialize;
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        data::cache::test_cache,
        models::{ResourceId, ResourceObject},
        resources::{request::get, ApiObject, QuerySource, ResourceDescriptor},
    };

    #[derive(Debug, Clone, Serialize)]
    struct Row {
        n: i64,
    }

    impl ApiObject for Row {
        const KIND: &'static str = "row";

        fn object_id(&self) -> ResourceId {
            ResourceId::Number(self.n)
        }
    }

    /// Rows numbered from 1, served newest first, counting the computations
    #[derive(Clone, Default)]
    struct Rows {
        rows: Arc<Mutex<Vec<Row>>>,
        computed: Arc<AtomicUsize>,
        failing: Arc<AtomicBool>,
        delay: Duration,
    }

    impl Rows {
        fn new(count: i64) -> Self {
            let rows = Self::default();
            for n in 1..=count {
                rows.push(n);
            }
            rows
        }

        fn slow(count: i64, delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(count)
            }
        }

        fn push(&self, n: i64) {
            self.rows.lock().unwrap().insert(0, Row { n });
        }

        fn computed(&self) -> usize {
            self.computed.load(Ordering::SeqCst)
        }

        fn find(&self, n: i64) -> Option<Row> {
            self.rows.lock().unwrap().iter().find(|r| r.n == n).cloned()
        }
    }

    #[async_trait]
    impl QuerySource for Rows {
        type Item = Row;

        async fn slice(&self, offset: i64, limit: i64) -> Result<Vec<Row>> {
            self.computed.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Database("connection refused".to_string()));
            }

            let page: Vec<Row> = {
                let rows = self.rows.lock().unwrap();
                rows.iter()
                    .skip(offset as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect()
            };
            sleep(self.delay).await;
            Ok(page)
        }
    }

    struct RowList {
        descriptor: ResourceDescriptor,
        rows: Rows,
    }

    #[async_trait]
    impl ListResource for RowList {
        type Item = Row;
        type Source = Rows;

        fn descriptor(&self) -> &ResourceDescriptor {
            &self.descriptor
        }

        fn source(&self) -> Rows {
            self.rows.clone()
        }
    }

    struct RowDetail {
        descriptor: ResourceDescriptor,
        rows: Rows,
    }

    #[async_trait]
    impl DetailResource for RowDetail {
        type Item = Row;

        fn descriptor(&self) -> &ResourceDescriptor {
            &self.descriptor
        }

        async fn get_item(&self, item_id: &str) -> Result<Option<Row>> {
            self.rows.computed.fetch_add(1, Ordering::SeqCst);
            Ok(item_id.parse().ok().and_then(|n| self.rows.find(n)))
        }

        fn relationships(&self) -> &'static [&'static str] {
            &["previous", "next"]
        }

        async fn get_relationship(&self, name: &str, row: &Row) -> Result<Vec<ResourceObject>> {
            let related = match name {
                "previous" => self.rows.find(row.n - 1),
                "next" => self.rows.find(row.n + 1),
                _ => None,
            };
            related.iter().map(ApiObject::to_object).collect()
        }
    }

    fn engine(cache: Arc<dyn BoxedCacheStore>) -> ResourceEngine {
        ResourceEngine::new(cache, &Config::default())
    }

    fn list(rows: &Rows) -> RowList {
        RowList {
            descriptor: ResourceDescriptor::default(),
            rows: rows.clone(),
        }
    }

    fn detail(rows: &Rows, descriptor: ResourceDescriptor) -> RowDetail {
        RowDetail {
            descriptor,
            rows: rows.clone(),
        }
    }

    fn body(response: &ResourceResponse) -> Value {
        serde_json::from_str(response.response.body.as_deref().unwrap()).unwrap()
    }

    fn ids(response: &ResourceResponse) -> Vec<i64> {
        body(response)["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn hits_replay_the_stored_body() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let request = get("/rows");

        let first = engine.list(&list(&rows), &request).await.unwrap();
        let second = engine.list(&list(&rows), &request).await.unwrap();

        assert_eq!(first.cache_status, Some(CacheStatus::Miss));
        assert_eq!(second.cache_status, Some(CacheStatus::Hit));
        assert_eq!(first.response, second.response);
        assert_eq!(rows.computed(), 1);
    }

    #[tokio::test]
    async fn list_envelope_carries_authors_and_rows() {
        let rows = Rows::new(2);
        let response = engine(test_cache())
            .list(&list(&rows), &get("/rows"))
            .await
            .unwrap();

        assert_eq!(
            body(&response),
            json!({
                "meta": { "authors": ["POLKASCAN", "openAware BV"] },
                "errors": [],
                "data": [
                    { "type": "row", "id": 2, "attributes": { "n": 2 } },
                    { "type": "row", "id": 1, "attributes": { "n": 1 } }
                ],
                "links": {}
            })
        );
    }

    #[tokio::test]
    async fn second_page_of_thirty_rows_has_five() {
        let rows = Rows::new(30);
        let engine = engine(test_cache());
        let request = get("/rows?page%5Bnumber%5D=1");

        let first = engine.list(&list(&rows), &request).await.unwrap();
        let second = engine.list(&list(&rows), &request).await.unwrap();

        assert_eq!(first.response.status, 200);
        assert_eq!(ids(&first), vec![5, 4, 3, 2, 1]);
        assert_eq!(first.cache_status, Some(CacheStatus::Miss));
        assert_eq!(second.cache_status, Some(CacheStatus::Hit));
        assert_eq!(first.response.body, second.response.body);
    }

    #[tokio::test]
    async fn page_lengths_follow_the_collection_size() {
        let uncached = ResourceDescriptor::default().with_list_ttl_secs(0);

        for count in [0, 1, 7, 30] {
            let resource = RowList {
                descriptor: uncached.clone(),
                rows: Rows::new(count),
            };

            for size in [1, 3, 25] {
                for number in 0..=(count / size + 1) {
                    let request = get(&format!(
                        "/rows?page%5Bnumber%5D={number}&page%5Bsize%5D={size}"
                    ));
                    let response = engine(test_cache()).list(&resource, &request).await.unwrap();

                    let expected = size.min(count - number * size).max(0) as usize;
                    assert_eq!(
                        ids(&response).len(),
                        expected,
                        "count={count} size={size} number={number}"
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn invalid_paging_is_rejected_and_not_cached() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let request = get("/rows?page%5Bsize%5D=0");

        for _ in 0..2 {
            let err = engine.list(&list(&rows), &request).await.unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entries_are_fresh_for_the_ttl_only() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let resource = list(&rows);
        let ttl = resource.descriptor.list_ttl.unwrap();
        let request = get("/rows");

        engine.list(&resource, &request).await.unwrap();

        tokio::time::advance(ttl - Duration::from_millis(1)).await;
        let fresh = engine.list(&resource, &request).await.unwrap();
        assert_eq!(fresh.cache_status, Some(CacheStatus::Hit));

        tokio::time::advance(Duration::from_millis(2)).await;
        let stale = engine.list(&resource, &request).await.unwrap();
        assert_eq!(stale.cache_status, Some(CacheStatus::Miss));
        assert_eq!(rows.computed(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_misses_compute_once() {
        let rows = Rows::slow(30, Duration::from_millis(200));
        let engine = engine(test_cache());
        let resource = list(&rows);
        let request = get("/rows");

        let responses = join_all((0..10).map(|_| engine.list(&resource, &request))).await;
        let responses: Vec<_> = responses.into_iter().map(|r| r.unwrap()).collect();

        assert_eq!(rows.computed(), 1);
        let misses = responses
            .iter()
            .filter(|r| r.cache_status == Some(CacheStatus::Miss))
            .count();
        assert_eq!(misses, 1);
        assert!(responses.iter().all(|r| r.response == responses[0].response));
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_on_a_held_lock_times_out() {
        let cache = test_cache();
        let engine = engine(cache.clone());
        let rows = Rows::new(3);
        let request = get("/rows");

        cache
            .try_lock(&request.cache_key(), Duration::from_secs(60))
            .await
            .unwrap()
            .unwrap();

        let started = Instant::now();
        let err = engine.list(&list(&rows), &request).await.unwrap_err();

        assert!(matches!(err, Error::CacheLockTimeout(_)));
        assert!(err.is_retryable());
        assert!(started.elapsed() >= engine.lock_timeout);
        assert_eq!(rows.computed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_locks_expire_with_their_lease() {
        let cache = test_cache();
        let mut engine = engine(cache.clone());
        engine.lock_timeout = engine.lock_lease + Duration::from_secs(1);
        let rows = Rows::new(3);
        let request = get("/rows");

        cache
            .try_lock(&request.cache_key(), engine.lock_lease)
            .await
            .unwrap()
            .unwrap();

        let response = engine.list(&list(&rows), &request).await.unwrap();
        assert_eq!(response.cache_status, Some(CacheStatus::Miss));
        assert_eq!(rows.computed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_computation_releases_the_key() {
        let rows = Rows::slow(3, Duration::from_secs(1));
        let engine = engine(test_cache());
        let resource = list(&rows);
        let request = get("/rows");

        let cancelled =
            tokio::time::timeout(Duration::from_millis(100), engine.list(&resource, &request))
                .await;
        assert!(cancelled.is_err());

        tokio::time::advance(Duration::from_secs(2)).await;
        let response = engine.list(&resource, &request).await.unwrap();

        assert_eq!(response.cache_status, Some(CacheStatus::Miss));
        assert_eq!(rows.computed(), 2);
    }

    #[tokio::test]
    async fn disabled_caching_computes_every_time() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let resource = RowList {
            descriptor: ResourceDescriptor::default().with_list_ttl_secs(0),
            rows: rows.clone(),
        };

        for _ in 0..2 {
            let response = engine.list(&resource, &get("/rows")).await.unwrap();
            assert_eq!(response.cache_status, None);
        }
        assert_eq!(rows.computed(), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let request = get("/rows");

        rows.failing.store(true, Ordering::SeqCst);
        let err = engine.list(&list(&rows), &request).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));

        rows.failing.store(false, Ordering::SeqCst);
        let response = engine.list(&list(&rows), &request).await.unwrap();
        assert_eq!(response.cache_status, Some(CacheStatus::Miss));
        assert_eq!(ids(&response), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn missing_detail_is_not_cached() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let resource = detail(&rows, ResourceDescriptor::default());
        let request = get("/rows/4");

        let missing = engine.detail(&resource, &request, "4").await.unwrap();
        assert_eq!(missing.response, CachedResponse { status: 404, body: None });
        assert_eq!(missing.cache_status, Some(CacheStatus::Miss));

        rows.push(4);
        let found = engine.detail(&resource, &request, "4").await.unwrap();
        assert_eq!(found.response.status, 200);
        assert_eq!(body(&found)["data"]["id"], json!(4));
    }

    #[tokio::test]
    async fn missing_detail_is_cached_when_opted_in() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let descriptor = ResourceDescriptor {
            cache_not_found: true,
            ..Default::default()
        };
        let resource = detail(&rows, descriptor);
        let request = get("/rows/4");

        engine.detail(&resource, &request, "4").await.unwrap();
        rows.push(4);
        let again = engine.detail(&resource, &request, "4").await.unwrap();

        assert_eq!(again.response.status, 404);
        assert_eq!(again.cache_status, Some(CacheStatus::Hit));
    }

    #[tokio::test]
    async fn unparsable_ids_are_not_found() {
        let rows = Rows::new(3);
        let response = engine(test_cache())
            .detail(&detail(&rows, ResourceDescriptor::default()), &get("/rows/x"), "x")
            .await
            .unwrap();

        assert_eq!(response.response.status, 404);
    }

    #[tokio::test]
    async fn relationships_follow_the_declared_order() {
        let rows = Rows::new(3);
        let engine = engine(test_cache());
        let resource = detail(&rows, ResourceDescriptor::default());

        let response = engine
            .detail(&resource, &get("/rows/2?include=next,previous"), "2")
            .await
            .unwrap();
        let body = body(&response);

        assert_eq!(
            body["data"]["relationships"],
            json!({
                "previous": { "data": [{ "type": "row", "id": 1 }] },
                "next": { "data": [{ "type": "row", "id": 3 }] }
            })
        );
        let included: Vec<_> = body["included"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].clone())
            .collect();
        assert_eq!(included, vec![json!(1), json!(3)]);

        let plain = engine
            .detail(&resource, &get("/rows/2"), "2")
            .await
            .unwrap();
        assert!(body_has_no_included(&plain));
    }

    fn body_has_no_included(response: &ResourceResponse) -> bool {
        body(response).get("included").is_none()
    }

    #[test]
    fn responses_carry_the_cache_status_header() {
        let response = ResourceResponse {
            response: CachedResponse {
                status: 200,
                body: Some("{}".to_string()),
            },
            cache_status: Some(CacheStatus::Hit),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_STATUS_HEADER], "HIT");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let response = ResourceResponse {
            response: CachedResponse {
                status: 404,
                body: None,
            },
            cache_status: None,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(CACHE_STATUS_HEADER).is_none());
    }
}
