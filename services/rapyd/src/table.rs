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

use std::collections::BTreeMap;

use log::debug;
use rapyd_core::{Context, Error, Result};
use serde::{Deserialize, Serialize};

use crate::resource::{EndpointSet, Verb};

const RAPYD_RESOURCES: &str = include_str!("../resources.toml");

/// ResourceTable maps resource names to their endpoint templates.
///
/// Tables are usually loaded from TOML:
///
/// ```toml
/// [resources.customers]
/// create = "/v1/customers"
/// read = "/v1/customers/{0}"
///
/// [resources."data.countries"]
/// list = "/v1/data/countries"
/// public = ["list"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceTable {
    #[serde(default)]
    resources: BTreeMap<String, EndpointSet>,
}

impl ResourceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of every resource of the Rapyd API.
    pub fn rapyd() -> Self {
        match Self::from_toml(RAPYD_RESOURCES) {
            Ok(table) => table,
            Err(err) => unreachable!("built-in resource table is invalid: {err}"),
        }
    }

    /// Parse a table from TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: Self = toml::from_str(content)?;
        for (name, endpoints) in &table.resources {
            validate(name, endpoints)?;
        }

        Ok(table)
    }

    /// Load a table from a TOML file.
    pub async fn from_file(ctx: &Context, path: &str) -> Result<Self> {
        debug!("loading resource table from {path}");

        let content = ctx.file_read_as_string(path).await?;
        Self::from_toml(&content).map_err(|err| {
            Error::config_invalid(format!("invalid resource table {path}")).with_source(err)
        })
    }

    /// Add a resource, replacing the one with the same name.
    ///
    /// Resources added this way are checked when the table is handed to a
    /// client.
    pub fn with_resource(mut self, name: impl Into<String>, endpoints: EndpointSet) -> Self {
        self.resources.insert(name.into(), endpoints);
        self
    }

    /// Add every resource of `other`, replacing those with the same name.
    pub fn merge(mut self, other: ResourceTable) -> Self {
        self.resources.extend(other.resources);
        self
    }

    /// Endpoint templates of `name`.
    pub fn get(&self, name: &str) -> Option<&EndpointSet> {
        self.resources.get(name)
    }

    /// Resource names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the table has no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Check every resource of this table.
    pub fn validate(&self) -> Result<()> {
        self.resources
            .iter()
            .try_for_each(|(name, endpoints)| validate(name, endpoints))
    }
}

fn validate(name: &str, endpoints: &EndpointSet) -> Result<()> {
    if endpoints.templates().next().is_none() {
        return Err(Error::config_invalid(format!(
            "resource {name} has no endpoint template"
        )));
    }

    if let Some(template) = endpoints.templates().find(|t| !t.starts_with('/')) {
        return Err(Error::config_invalid(format!(
            "resource {name} has an endpoint not starting with '/': {template}"
        )));
    }

    let verbs = [
        Verb::Create,
        Verb::Read,
        Verb::Edit,
        Verb::List,
        Verb::Delete,
    ];
    if let Some(verb) = verbs
        .into_iter()
        .find(|v| endpoints.is_public(*v) && endpoints.template(*v).is_none())
    {
        return Err(Error::config_invalid(format!(
            "resource {name} marks {verb} public without endpoint template"
        )));
    }

    Ok(())
}
