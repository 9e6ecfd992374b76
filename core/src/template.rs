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

//! Endpoint template resolution.
//!
//! Endpoint templates are request paths carrying positional placeholders
//! such as `/v1/user/{0}/transactions/{1}`. [`resolve`] substitutes them and
//! appends an optional query string.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// AsciiSet matching the characters `encodeURIComponent` leaves untouched.
pub static URI_COMPONENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent encode a single query key or value.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, &URI_COMPONENT_ENCODE_SET).to_string()
}

/// Positional values for `{n}` placeholders.
///
/// A single string converts into a one element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<String>);

impl PathParams {
    /// No positional values.
    pub fn none() -> Self {
        Self::default()
    }

    /// Get the value for placeholder `{index}`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Number of positional values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no positional values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PathParams {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for PathParams {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&String> for PathParams {
    fn from(value: &String) -> Self {
        Self(vec![value.clone()])
    }
}

impl<S: Into<String>> From<Vec<S>> for PathParams {
    fn from(value: Vec<S>) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for PathParams {
    fn from(value: [S; N]) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl<S: AsRef<str>> From<&[S]> for PathParams {
    fn from(value: &[S]) -> Self {
        Self(value.iter().map(|v| v.as_ref().to_string()).collect())
    }
}

/// Ordered query parameters.
///
/// Pairs keep their insertion order when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create empty query params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Append a pair, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Iterate over pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for QueryParams {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for QueryParams {
    fn from(value: Vec<(K, V)>) -> Self {
        value.into_iter().collect()
    }
}

/// Serialize query params as `k1=v1&k2=v2`, percent encoding keys and values.
pub fn serialize_query(query: &QueryParams) -> String {
    let mut s = String::with_capacity(16);

    for (idx, (k, v)) in query.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&encode_component(k));
        s.push('=');
        s.push_str(&encode_component(v));
    }

    s
}

/// Resolve an endpoint template into a request path.
///
/// - Every `{n}` is replaced by `params[n]`.
/// - Placeholders without a value stay in the output as written.
/// - A non-empty `query` is appended after `?`. An empty `query` counts as
///   absent, so a bare trailing `?` is never produced.
///
/// ```
/// use rapyd_core::template::{resolve, PathParams};
///
/// let path = resolve(
///     "/v1/user/{0}/transactions/{1}",
///     &PathParams::from(["abc", "5"]),
///     None,
/// );
/// assert_eq!(path, "/v1/user/abc/transactions/5");
/// ```
pub fn resolve(template: &str, params: &PathParams, query: Option<&QueryParams>) -> String {
    let mut s = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        s.push_str(&rest[..start]);
        rest = &rest[start..];

        match placeholder(rest) {
            Some((len, index)) => {
                match index.and_then(|i| params.get(i)) {
                    Some(v) => s.push_str(v),
                    None => s.push_str(&rest[..len]),
                }
                rest = &rest[len..];
            }
            None => {
                s.push('{');
                rest = &rest[1..];
            }
        }
    }
    s.push_str(rest);

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        s.push('?');
        s.push_str(&serialize_query(query));
    }

    s
}

/// Parse a placeholder at the start of `s`.
///
/// Returns the placeholder length and its index. The index is `None` for
/// digits that can never address a value: leading zeros (`{01}`) and
/// overflowing numbers.
fn placeholder(s: &str) -> Option<(usize, Option<usize>)> {
    let digits = s[1..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || s.as_bytes().get(1 + digits) != Some(&b'}') {
        return None;
    }

    let number = &s[1..1 + digits];
    let index = if digits > 1 && number.starts_with('0') {
        None
    } else {
        number.parse().ok()
    };

    Some((digits + 2, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("/v1/user/{0}/transactions/{1}", &["abc", "5"], "/v1/user/abc/transactions/5"; "two placeholders")]
    #[test_case("/v1/customers/{0}", &["cust_123"], "/v1/customers/cust_123"; "one placeholder")]
    #[test_case("/v1/user/{1}/{0}", &["a", "b"], "/v1/user/b/a"; "out of order")]
    #[test_case("/v1/{0}/{0}", &["x"], "/v1/x/x"; "repeated placeholder")]
    #[test_case("/v1/user/{0}/transactions/{1}", &["abc"], "/v1/user/abc/transactions/{1}"; "missing value passes through")]
    #[test_case("/v1/user/{0}", &[], "/v1/user/{0}"; "no values")]
    #[test_case("/v1/data/countries", &["unused"], "/v1/data/countries"; "no placeholders")]
    #[test_case("/v1/{01}/{x}/{}/{", &["a"], "/v1/{01}/{x}/{}/{"; "malformed placeholders")]
    #[test_case("/v1/{99999999999999999999999}", &["a"], "/v1/{99999999999999999999999}"; "overflowing index")]
    #[test_case("/v1/{{0}}", &["a"], "/v1/{a}"; "nested braces")]
    fn test_resolve(template: &str, params: &[&str], expected: &str) {
        assert_eq!(resolve(template, &PathParams::from(params), None), expected);
    }

    #[test]
    fn test_resolve_single_string() {
        assert_eq!(
            resolve("/v1/customers/{0}", &PathParams::from("cust_123"), None),
            resolve("/v1/customers/{0}", &PathParams::from(["cust_123"]), None),
        );
    }

    #[test]
    fn test_resolve_with_query() {
        let query = QueryParams::from([("page", "2")]);
        assert_eq!(
            resolve("/v1/data/countries", &PathParams::none(), Some(&query)),
            "/v1/data/countries?page=2"
        );
    }

    #[test]
    fn test_resolve_with_empty_query() {
        assert_eq!(
            resolve("/v1/data/countries", &PathParams::none(), Some(&QueryParams::new())),
            "/v1/data/countries"
        );
    }

    #[test]
    fn test_query_encoding_and_order() {
        let query = QueryParams::new()
            .with("z key", "a&b=c")
            .with("a", "ü/?#")
            .with("safe", "-_.!~*'()")
            .with("m", "1");

        assert_eq!(
            serialize_query(&query),
            "z%20key=a%26b%3Dc&a=%C3%BC%2F%3F%23&safe=-_.!~*'()&m=1"
        );
    }

    #[test]
    fn test_every_placeholder_substituted_once() {
        for k in 0..12 {
            let template: String = (0..k).map(|i| format!("/p{{{i}}}")).collect();
            let values: Vec<String> = (0..k).map(|i| format!("v{i}")).collect();
            let expected: String = (0..k).map(|i| format!("/pv{i}")).collect();

            let out = resolve(&template, &PathParams::from(values), None);
            assert_eq!(out, expected);
            assert!(!out.contains('{'));
        }
    }

    #[test]
    fn test_unmatched_placeholders_remain() {
        let template = "/a/{0}/b/{1}/c/{2}/d/{3}";
        for n in 0..4 {
            let values: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
            let out = resolve(template, &PathParams::from(values), None);

            for i in 0..4 {
                assert_eq!(out.contains(&format!("{{{i}}}")), i >= n, "{out}");
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let params = PathParams::from(["abc", "5"]);
        let query = QueryParams::from([("page", "2"), ("sort", "desc")]);
        let template = "/v1/user/{0}/transactions/{1}";

        assert_eq!(
            resolve(template, &params, Some(&query)),
            resolve(template, &params, Some(&query))
        );
    }
}
