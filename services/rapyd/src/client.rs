// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request, StatusCode};
use log::{debug, Level};
use rapyd_core::template::{serialize_query, QueryParams};
use rapyd_core::{
    Context, Error, EventStream, LogEvent, ProvideCredential, ProvideCredentialChain, Result,
    Signer, DEFAULT_EVENT_CAPACITY,
};
use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::config::Config;
use crate::constants::DEFAULT_TIMEOUT;
use crate::credential::Credential;
use crate::environment::Environment;
use crate::provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, StaticCredentialProvider,
};
use crate::resource::ResourceInterface;
use crate::sign_request::RequestSigner;
use crate::table::ResourceTable;

/// Options of a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Send the request without signature headers.
    pub public: bool,
}

/// Client sends signed requests to the Rapyd API.
///
/// Clients are cheap to clone, clones share credential cache and event
/// stream.
///
/// ```no_run
/// use http::Method;
/// use rapyd_api::Client;
/// use rapyd_core::Context;
///
/// # async fn example(ctx: Context) -> rapyd_core::Result<()> {
/// let client = Client::new(ctx, "rak_xxx", "rsk_xxx", "sandbox")?;
/// let countries = client
///     .make_request("/v1/data/countries", Method::GET, None)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    signer: Signer<Credential>,
    environment: Environment,
    timeout: Duration,
    events: EventStream,
    resources: ResourceTable,
}

impl Client {
    /// Create a client with static credential.
    ///
    /// `environment` must be `production` or `sandbox`.
    pub fn new(
        ctx: Context,
        access_key: &str,
        secret_key: &str,
        environment: &str,
    ) -> Result<Self> {
        Self::builder()
            .context(ctx)
            .environment(environment)
            .credential(access_key, secret_key)
            .build()
    }

    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from config.
    ///
    /// Unset config fields are loaded from env.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let environment = config
            .environment
            .clone()
            .ok_or_else(|| Error::config_invalid("missing environment"))?;

        Self::builder()
            .context(ctx)
            .environment(environment)
            .credential_provider(ConfigCredentialProvider::new(Arc::new(config)))
            .build()
    }

    /// Create a client from env only.
    pub fn from_env(ctx: Context) -> Result<Self> {
        Self::from_config(ctx, Config::new())
    }

    /// Environment requests are sent to.
    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    /// Base url requests are sent to.
    pub fn base_url(&self) -> &'static str {
        self.inner.environment.base_url()
    }

    /// Timeout of every request.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Resource table used by [`Client::resource`].
    pub fn resources(&self) -> &ResourceTable {
        &self.inner.resources
    }

    /// Subscribe to log events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.inner.events.subscribe()
    }

    /// Get the resource named `name`.
    pub fn resource(&self, name: &str) -> Result<ResourceInterface> {
        let endpoints = self
            .inner
            .resources
            .get(name)
            .cloned()
            .ok_or_else(|| Error::config_invalid(format!("unknown resource: {name}")))?;

        Ok(ResourceInterface::new(self.clone(), name, endpoints))
    }

    /// Send a signed request to `endpoint` and return the response body.
    ///
    /// `endpoint` is a path starting with `/`, it may carry a query string.
    /// The payload of a `GET` request must be an object, it's sent as query
    /// string.
    pub async fn make_request(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&Value>,
    ) -> Result<Value> {
        self.make_request_with(endpoint, method, payload, RequestOptions::default())
            .await
    }

    /// Send a request to `endpoint` with `options`.
    pub async fn make_request_with(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&Value>,
        options: RequestOptions,
    ) -> Result<Value> {
        if !endpoint.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "endpoint must start with '/': {endpoint}"
            )));
        }

        let (endpoint, body) = match payload {
            Some(payload) if method == Method::GET => {
                (append_query(endpoint, payload)?, Bytes::new())
            }
            Some(payload) if method != Method::DELETE => {
                (endpoint.to_string(), Bytes::from(serde_json::to_vec(payload)?))
            }
            _ => (endpoint.to_string(), Bytes::new()),
        };

        self.inner.events.emit(
            Level::Debug,
            "New Rapyd API request",
            json!({
                "endpoint": endpoint,
                "method": method.as_str(),
                "payload": payload.cloned().unwrap_or_else(|| json!({})),
            }),
        );

        let req = Request::builder()
            .method(method)
            .uri(format!("{}{endpoint}", self.base_url()))
            .header(CONTENT_TYPE, "application/json")
            .body(body)?;
        let (mut parts, body) = req.into_parts();
        if !options.public {
            self.inner.signer.sign(&mut parts, &body).await?;
        }
        let req = Request::from_parts(parts, body);

        let ctx = self.inner.signer.context();
        let resp = tokio::time::timeout(self.inner.timeout, ctx.http_send(req))
            .await
            .map_err(|err| {
                Error::transport(format!(
                    "request to {endpoint} timed out after {:?}",
                    self.inner.timeout
                ))
                .with_source(err)
            })??;

        let status = resp.status();
        let body = resp.into_body();
        debug!("{endpoint} responded {status} with {} bytes", body.len());

        if !status.is_success() {
            return Err(http_error(status, &body));
        }

        let value = parse_body(status, &body)?;
        if is_truthy(value.get("error")) {
            return Err(Error::remote("Rapyd API reported an error")
                .with_status(status)
                .with_body(value));
        }

        self.inner.events.emit(
            Level::Debug,
            "Response from Rapyd",
            json!({ "response": value }),
        );

        Ok(value)
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("environment", &self.inner.environment)
            .field("timeout", &self.inner.timeout)
            .field("resources", &self.inner.resources.len())
            .field("subscribers", &self.inner.events.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Append `payload` to `endpoint` as query string.
///
/// Strings are sent as is, other values as their JSON text. An empty object
/// leaves `endpoint` untouched instead of appending a bare `?`.
fn append_query(endpoint: &str, payload: &Value) -> Result<String> {
    let map = payload.as_object().ok_or_else(|| {
        Error::request_invalid(format!(
            "payload of GET {endpoint} must be an object to be sent as query"
        ))
    })?;

    let query: QueryParams = map
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => (k.clone(), s.clone()),
            v => (k.clone(), v.to_string()),
        })
        .collect();
    if query.is_empty() {
        return Ok(endpoint.to_string());
    }

    let sep = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{endpoint}{sep}{}", serialize_query(&query)))
}

fn parse_body(status: StatusCode, body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::remote("empty response").with_status(status));
    }

    let value: Value = serde_json::from_slice(body).map_err(|err| {
        Error::unexpected("response body is not valid JSON")
            .with_status(status)
            .with_source(err)
    })?;
    if value.is_null() {
        return Err(Error::remote("empty response").with_status(status));
    }

    Ok(value)
}

fn http_error(status: StatusCode, body: &[u8]) -> Error {
    let body = serde_json::from_slice::<Value>(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()));

    let message = match body.pointer("/status/message").and_then(Value::as_str) {
        Some(msg) if !msg.is_empty() => format!("Rapyd API returned {status}: {msg}"),
        _ => format!("Rapyd API returned {status}"),
    };

    Error::http(status, message).with_body(body)
}

/// Truthiness of a JSON member, an absent member is false.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// ClientBuilder configures a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    ctx: Context,
    environment: Option<String>,
    chain: ProvideCredentialChain<Credential>,
    timeout: Duration,
    event_capacity: usize,
    resources: Option<ResourceTable>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            ctx: Context::new(),
            environment: None,
            chain: ProvideCredentialChain::new(),
            timeout: DEFAULT_TIMEOUT,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            resources: None,
        }
    }
}

impl ClientBuilder {
    /// Set the context providing http client and env.
    pub fn context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Set the environment, `production` or `sandbox`.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Use a static credential.
    pub fn credential(self, access_key: &str, secret_key: &str) -> Self {
        self.credential_provider(StaticCredentialProvider::new(access_key, secret_key))
    }

    /// Add a credential provider.
    ///
    /// Providers are tried in the order they were added. Without provider
    /// the credential is loaded by [`DefaultCredentialProvider`].
    pub fn credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.chain = self.chain.push(provider);
        self
    }

    /// Set the timeout of every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many log events are buffered per subscriber.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Set the resource table, [`ResourceTable::rapyd`] by default.
    pub fn resources(mut self, resources: ResourceTable) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let environment: Environment = self
            .environment
            .as_deref()
            .ok_or_else(|| Error::config_invalid("missing environment"))?
            .parse()?;

        let resources = match self.resources {
            Some(resources) => {
                resources.validate()?;
                resources
            }
            None => ResourceTable::rapyd(),
        };

        let provider = if self.chain.is_empty() {
            DefaultCredentialProvider::new()
        } else {
            DefaultCredentialProvider::with_chain(self.chain)
        };
        let signer = Signer::new(self.ctx, provider, RequestSigner::new());

        Ok(Client {
            inner: Arc::new(ClientInner {
                signer,
                environment,
                timeout: self.timeout,
                events: EventStream::new(self.event_capacity),
                resources,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rapyd_core::{ErrorKind, StaticEnv};
    use test_case::test_case;

    #[test]
    fn test_new_client() {
        let client = Client::new(Context::new(), "ak", "sk", "sandbox").unwrap();

        assert_eq!(client.environment(), Environment::Sandbox);
        assert_eq!(client.base_url(), "https://sandboxapi.rapyd.net");
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        assert!(client.resources().get("customers").is_some());
    }

    #[test_case("staging")]
    #[test_case("Sandbox")]
    #[test_case("")]
    fn test_new_client_invalid_environment(environment: &str) {
        let err = Client::new(Context::new(), "ak", "sk", environment).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("invalid environment"));
    }

    #[test]
    fn test_builder_without_environment() {
        let err = Client::builder().credential("ak", "sk").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_builder_rejects_invalid_table() {
        let err = Client::builder()
            .environment("sandbox")
            .resources(ResourceTable::new().with_resource("x", Default::default()))
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv::from_iter([
            ("RAPYD_ACCESS_KEY", "ak"),
            ("RAPYD_SECRET_KEY", "sk"),
            ("RAPYD_ENVIRONMENT", "production"),
        ]));

        let client = Client::from_env(ctx).unwrap();
        assert_eq!(client.base_url(), "https://api.rapyd.net");
    }

    #[test]
    fn test_from_env_without_environment() {
        let ctx = Context::new().with_env(StaticEnv::default());

        let err = Client::from_env(ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_unknown_resource() {
        let client = Client::new(Context::new(), "ak", "sk", "sandbox").unwrap();

        let err = client.resource("unicorns").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let customers = client.resource("customers").unwrap();
        assert_eq!(customers.name(), "customers");
    }

    #[test_case(json!({"page": "2"}), "/v1/data/countries?page=2"; "string value")]
    #[test_case(json!({"limit": 10, "active": true}), "/v1/data/countries?limit=10&active=true"; "scalar values")]
    #[test_case(json!({"q": "a b&c"}), "/v1/data/countries?q=a%20b%26c"; "encoded value")]
    #[test_case(json!({}), "/v1/data/countries"; "empty payload")]
    fn test_append_query(payload: Value, expected: &str) {
        assert_eq!(append_query("/v1/data/countries", &payload).unwrap(), expected);
    }

    #[test]
    fn test_append_query_to_existing_query() {
        assert_eq!(
            append_query("/v1/payments?limit=5", &json!({"page": "2"})).unwrap(),
            "/v1/payments?limit=5&page=2"
        );
    }

    #[test]
    fn test_append_query_rejects_non_object() {
        let err = append_query("/v1/data/countries", &json!(["page"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test_case(None, false)]
    #[test_case(Some(json!(null)), false)]
    #[test_case(Some(json!(false)), false)]
    #[test_case(Some(json!(0)), false)]
    #[test_case(Some(json!("")), false)]
    #[test_case(Some(json!(true)), true)]
    #[test_case(Some(json!(1)), true)]
    #[test_case(Some(json!("ERROR_GET_CUSTOMER")), true)]
    #[test_case(Some(json!({})), true)]
    fn test_is_truthy(value: Option<Value>, expected: bool) {
        assert_eq!(is_truthy(value.as_ref()), expected);
    }

    #[test]
    fn test_http_error_keeps_body() {
        let err = http_error(
            StatusCode::BAD_REQUEST,
            br#"{"status":{"error_code":"ERROR_X","message":"bad request"}}"#,
        );
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(err.to_string().contains("bad request"));
        assert_eq!(
            err.body().and_then(|v| v.pointer("/status/error_code")),
            Some(&json!("ERROR_X"))
        );

        let err = http_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(err.body(), Some(&json!("<html>bad gateway</html>")));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(
            parse_body(StatusCode::OK, b"{\"data\":[]}").unwrap(),
            json!({"data": []})
        );

        for body in [&b""[..], b"  \n", b"null"] {
            let err = parse_body(StatusCode::OK, body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Remote);
        }

        let err = parse_body(StatusCode::OK, b"not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
