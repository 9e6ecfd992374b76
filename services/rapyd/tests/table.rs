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

use std::io::Write;

use pretty_assertions::assert_eq;
use rapyd_api::{ResourceTable, Verb};
use rapyd_core::{Context, ErrorKind};
use rapyd_file_read_tokio::TokioFileRead;

#[tokio::test]
async fn test_table_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[resources.contacts]
create = "/v1/ewallets/{{0}}/contacts"
read = "/v1/ewallets/{{0}}/contacts/{{1}}"
delete = "/v1/ewallets/{{0}}/contacts/{{1}}"

[resources."data.currencies"]
list = "/v1/data/currencies"
public = ["list"]
"#
    )
    .unwrap();

    let ctx = Context::new().with_file_read(TokioFileRead);
    let table = ResourceTable::from_file(&ctx, file.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(table.len(), 2);
    let contacts = table.get("contacts").unwrap();
    assert_eq!(
        contacts.template(Verb::Delete),
        Some("/v1/ewallets/{0}/contacts/{1}")
    );
    assert!(table.get("data.currencies").unwrap().is_public(Verb::List));

    let merged = ResourceTable::rapyd().merge(table);
    assert!(merged.get("customers").is_some());
    assert!(merged.get("contacts").is_some());
}

#[tokio::test]
async fn test_table_from_invalid_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[resources.contacts]\nread = \"v1/contacts\"").unwrap();

    let ctx = Context::new().with_file_read(TokioFileRead);
    let err = ResourceTable::from_file(&ctx, file.path().to_str().unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[tokio::test]
async fn test_table_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resources.toml");

    let ctx = Context::new().with_file_read(TokioFileRead);
    assert!(ResourceTable::from_file(&ctx, path.to_str().unwrap())
        .await
        .is_err());
}
