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

use log::Level;
use serde_json::Value;
use tokio::sync::broadcast;

/// Default number of events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// A structured log event emitted while serving a request.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// Severity of the event.
    pub level: Level,
    /// Human readable message.
    pub message: String,
    /// Structured details, e.g. `{endpoint, method, payload}`.
    pub payload: Value,
}

/// EventStream fans log events out to every subscriber.
///
/// Every event is also forwarded to the `log` facade. Emitting without any
/// subscriber is fine, the event is simply dropped. Slow subscribers lag and
/// lose the oldest events instead of blocking requests.
#[derive(Debug, Clone)]
pub struct EventStream {
    sender: broadcast::Sender<LogEvent>,
}

impl Default for EventStream {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventStream {
    /// Create a new stream buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Emit an event.
    pub fn emit(&self, level: Level, message: impl Into<String>, payload: Value) {
        let message = message.into();
        log::log!(level, "{message}: {payload}");

        // An error only means nobody is listening.
        let _ = self.sender.send(LogEvent {
            level,
            message,
            payload,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_emit_without_subscriber() {
        let events = EventStream::default();
        assert_eq!(events.subscriber_count(), 0);

        events.emit(Level::Debug, "nobody listens", json!({}));
    }

    #[tokio::test]
    async fn test_emit_to_every_subscriber() {
        let events = EventStream::new(4);
        let mut a = events.subscribe();
        let mut b = events.clone().subscribe();

        events.emit(Level::Debug, "hello", json!({"endpoint": "/v1/data/countries"}));

        let expected = LogEvent {
            level: Level::Debug,
            message: "hello".to_string(),
            payload: json!({"endpoint": "/v1/data/countries"}),
        };
        assert_eq!(a.recv().await.unwrap(), expected);
        assert_eq!(b.recv().await.unwrap(), expected);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let events = EventStream::new(0);
        let _rx = events.subscribe();
        events.emit(Level::Info, "ok", Value::Null);
    }
}
