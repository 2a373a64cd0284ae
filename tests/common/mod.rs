//! Shared fixtures for integration tests.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use medlist::{CatalogError, DataSource, Medicine, MedicinePatch, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// A fake data source with an observable call count, optional gating, and
/// scripted failures.
///
/// - Every `fetch_all` increments the call counter before doing anything else
/// - When gated, `fetch_all` waits for one `gate().notify_one()` per call
/// - Queued failures are returned by the next fetches, oldest first
/// - `update`/`remove` mutate the held collection like a real store
pub struct ScriptedSource {
    items: Mutex<Vec<Medicine>>,
    failures: Mutex<VecDeque<CatalogError>>,
    fetch_calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn new(items: Vec<Medicine>) -> Self {
        Self {
            items: Mutex::new(items),
            failures: Mutex::new(VecDeque::new()),
            fetch_calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Makes every fetch wait on the gate.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn gate(&self) -> Arc<Notify> {
        Arc::clone(self.gate.as_ref().expect("source is not gated"))
    }

    /// Queues an error for the next fetch.
    pub fn fail_next(&self, error: CatalogError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn set_items(&self, items: Vec<Medicine>) {
        *self.items.lock().unwrap() = items;
    }

    fn not_found(id: &str) -> CatalogError {
        CatalogError::Server {
            status: 404,
            message: format!("medicine {id} not found"),
        }
    }
}

impl DataSource for ScriptedSource {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<Medicine>>> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if let Some(error) = self.failures.lock().unwrap().pop_front() {
                return Err(error);
            }
            Ok(self.items.lock().unwrap().clone())
        })
    }

    fn update<'a>(&'a self, id: &'a str, patch: &'a MedicinePatch) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            patch.validate()?;
            let mut items = self.items.lock().unwrap();
            let item = items
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| Self::not_found(id))?;
            *item = patch.apply_to(item);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|m| m.id != id);
            if items.len() == before {
                return Err(Self::not_found(id));
            }
            Ok(())
        })
    }
}

pub fn medicine(id: &str, name: &str, description: &str) -> Medicine {
    Medicine {
        price: "$199.99".to_string(),
        rating: 4.9,
        description: Some(description.to_string()),
        ..Medicine::new(id, name)
    }
}

pub fn amoxicillin() -> Medicine {
    medicine(
        "1",
        "Amoxicillin",
        "Used to treat infections such as respiratory tract infections",
    )
}

pub fn names(items: &[Medicine]) -> Vec<&str> {
    items.iter().map(|m| m.name.as_str()).collect()
}

/// Serves exactly one canned HTTP response and returns the collection URL.
pub async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/medicines")
}

/// Accepts one connection and never answers it.
pub async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        drop(socket);
    });

    format!("http://{addr}/medicines")
}
