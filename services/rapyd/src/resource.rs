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

//! Generic accessor over a set of endpoint templates.

use std::fmt;

use http::Method;
use log::debug;
use rapyd_core::template::{resolve, PathParams, QueryParams};
use rapyd_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Client, RequestOptions};

/// Verb a template can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// `POST` to the create template.
    Create,
    /// `GET` on the read template.
    Read,
    /// `PUT` on the edit template, or the read template when no edit template is bound.
    Edit,
    /// `GET` on the list template.
    List,
    /// `DELETE` on the delete template.
    Delete,
}

impl Verb {
    /// HTTP method used by this verb.
    pub fn method(&self) -> Method {
        match self {
            Verb::Create => Method::POST,
            Verb::Read | Verb::List => Method::GET,
            Verb::Edit => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    /// Name of this verb as used in resource tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Read => "read",
            Verb::Edit => "edit",
            Verb::List => "list",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint templates bound to one resource.
///
/// Every template is optional, an absent template means the verb is not
/// supported by the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointSet {
    /// Template used by `create`.
    pub create: Option<String>,
    /// Template used by `read`.
    pub read: Option<String>,
    /// Template used by `update`.
    pub edit: Option<String>,
    /// Template used by `list`.
    pub list: Option<String>,
    /// Template used by `delete`.
    pub delete: Option<String>,
    /// Verbs sent without signature.
    pub public: Vec<Verb>,
}

impl EndpointSet {
    /// Create an empty endpoint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the create template.
    pub fn with_create(mut self, template: impl Into<String>) -> Self {
        self.create = Some(template.into());
        self
    }

    /// Set the read template.
    pub fn with_read(mut self, template: impl Into<String>) -> Self {
        self.read = Some(template.into());
        self
    }

    /// Set the edit template.
    pub fn with_edit(mut self, template: impl Into<String>) -> Self {
        self.edit = Some(template.into());
        self
    }

    /// Set the list template.
    pub fn with_list(mut self, template: impl Into<String>) -> Self {
        self.list = Some(template.into());
        self
    }

    /// Set the delete template.
    pub fn with_delete(mut self, template: impl Into<String>) -> Self {
        self.delete = Some(template.into());
        self
    }

    /// Mark a verb as public.
    pub fn with_public(mut self, verb: Verb) -> Self {
        if !self.public.contains(&verb) {
            self.public.push(verb);
        }
        self
    }

    /// Template used by `verb`.
    ///
    /// `Edit` falls back to the read template.
    pub fn template(&self, verb: Verb) -> Option<&str> {
        match verb {
            Verb::Create => self.create.as_deref(),
            Verb::Read => self.read.as_deref(),
            Verb::Edit => self.edit.as_deref().or(self.read.as_deref()),
            Verb::List => self.list.as_deref(),
            Verb::Delete => self.delete.as_deref(),
        }
    }

    /// Returns true if `verb` is sent without signature.
    pub fn is_public(&self, verb: Verb) -> bool {
        self.public.contains(&verb)
    }

    pub(crate) fn templates(&self) -> impl Iterator<Item = &str> {
        [
            &self.create,
            &self.read,
            &self.edit,
            &self.list,
            &self.delete,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
    }
}

/// Options of a single verb call.
///
/// By default a verb returns the response body as the client received it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Return only the `data` member of an enveloped response body.
    pub data_only: bool,
}

impl CallOptions {
    /// Options unwrapping the `data` member of the response body.
    ///
    /// Bodies without `data` member are returned unchanged.
    pub fn data_only() -> Self {
        Self { data_only: true }
    }

    fn shape(&self, body: Value) -> Value {
        if !self.data_only {
            return body;
        }

        match body {
            Value::Object(mut map) => match map.remove("data") {
                Some(data) => data,
                None => Value::Object(map),
            },
            v => v,
        }
    }
}

/// ResourceInterface exposes CRUD verbs over a set of endpoint templates.
///
/// Handles are cheap to clone and share the client they were created from.
/// Calls keep no state on the handle, so one handle can serve concurrent
/// calls.
///
/// ```no_run
/// use rapyd_api::{CallOptions, Client};
/// # async fn example(client: Client) -> rapyd_core::Result<()> {
/// let customers = client.resource("customers")?;
/// let _customer = customers
///     .read("cust_123", None, CallOptions::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResourceInterface {
    client: Client,
    name: String,
    endpoints: EndpointSet,
}

impl ResourceInterface {
    /// Create a resource bound to `endpoints`.
    pub fn new(client: Client, name: impl Into<String>, endpoints: EndpointSet) -> Self {
        Self {
            client,
            name: name.into(),
            endpoints,
        }
    }

    /// Name of this resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Endpoint templates bound to this resource.
    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// Returns true if `verb` is sent without signature.
    pub fn is_public(&self, verb: Verb) -> bool {
        self.endpoints.is_public(verb)
    }

    /// `POST` `payload` to the create template as is.
    pub async fn create_by_template<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        options: CallOptions,
    ) -> Result<Value> {
        let endpoint = self.template(Verb::Create)?.to_string();
        let payload = serde_json::to_value(payload)?;
        self.call(Verb::Create, &endpoint, Some(payload), options).await
    }

    /// `POST` `payload` to the create template resolved with `params`.
    pub async fn create_with_params<T: Serialize + ?Sized>(
        &self,
        params: impl Into<PathParams>,
        payload: &T,
        options: CallOptions,
    ) -> Result<Value> {
        let endpoint = resolve(self.template(Verb::Create)?, &params.into(), None);
        let payload = serde_json::to_value(payload)?;
        self.call(Verb::Create, &endpoint, Some(payload), options).await
    }

    /// `GET` the read template resolved with `params` and `query`.
    pub async fn read(
        &self,
        params: impl Into<PathParams>,
        query: Option<&QueryParams>,
        options: CallOptions,
    ) -> Result<Value> {
        let endpoint = resolve(self.template(Verb::Read)?, &params.into(), query);
        self.call(Verb::Read, &endpoint, None, options).await
    }

    /// `GET` the list template resolved with `params` and `query`.
    pub async fn list(
        &self,
        params: impl Into<PathParams>,
        query: Option<&QueryParams>,
        options: CallOptions,
    ) -> Result<Value> {
        let endpoint = resolve(self.template(Verb::List)?, &params.into(), query);
        self.call(Verb::List, &endpoint, None, options).await
    }

    /// `PUT` `payload` to the edit template resolved with `params`.
    ///
    /// Resources without edit template are updated through their read template.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        params: impl Into<PathParams>,
        payload: &T,
        options: CallOptions,
    ) -> Result<Value> {
        let endpoint = resolve(self.template(Verb::Edit)?, &params.into(), None);
        let payload = serde_json::to_value(payload)?;
        self.call(Verb::Edit, &endpoint, Some(payload), options).await
    }

    /// `DELETE` the delete template resolved with `params`.
    pub async fn delete(
        &self,
        params: impl Into<PathParams>,
        options: CallOptions,
    ) -> Result<Value> {
        let endpoint = resolve(self.template(Verb::Delete)?, &params.into(), None);
        self.call(Verb::Delete, &endpoint, None, options).await
    }

    fn template(&self, verb: Verb) -> Result<&str> {
        self.endpoints.template(verb).ok_or_else(|| {
            Error::request_invalid(format!(
                "resource {} does not support {verb}: no endpoint template bound",
                self.name
            ))
        })
    }

    async fn call(
        &self,
        verb: Verb,
        endpoint: &str,
        payload: Option<Value>,
        options: CallOptions,
    ) -> Result<Value> {
        debug!("{} {verb} {endpoint}", self.name);

        let body = self
            .client
            .make_request_with(
                endpoint,
                verb.method(),
                payload.as_ref(),
                RequestOptions {
                    public: self.is_public(verb),
                },
            )
            .await?;

        Ok(options.shape(body))
    }
}
