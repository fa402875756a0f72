//! Listener registry for auditing the raw exchange.
//!
//! Observers receive the outbound document (already masked) before
//! transmission and the raw inbound body after it. Dispatch is synchronous,
//! in attachment order, on the calling thread.

use std::{fmt, sync::Arc};

use crate::types::PaymentRequest;

/// Read-only payload handed to observers around the HTTP exchange. Each
/// notification carries exactly one of the two payloads.
#[derive(Clone, Copy, Debug)]
pub enum Notification<'a> {
    /// Masked serialized outbound document, delivered before transmission.
    Request(&'a str),
    /// Raw inbound response body, delivered after transmission regardless of
    /// HTTP status.
    Response(&'a str),
}

/// Capability implemented by exchange listeners.
pub trait Observer {
    /// Called once per notification with the originating request.
    fn update(&self, request: &PaymentRequest, notification: Notification<'_>);
}

/// Ordered collection of observer handles owned by a single request.
///
/// The registry shares ownership of the listener objects with the caller;
/// detaching compares handle identity, not listener content.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn Observer>>,
}

impl ObserverRegistry {
    /// Appends an observer. Duplicates are allowed and receive one
    /// notification per registration.
    pub fn attach(&mut self, observer: Arc<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Removes every registration pointing at the same listener object.
    pub fn detach(&mut self, observer: &Arc<dyn Observer>) {
        self.observers
            .retain(|existing| !Arc::ptr_eq(existing, observer));
    }

    /// Dispatches the payload to each observer in attachment order. A
    /// panicking observer aborts the remaining notifications.
    pub fn notify(&self, request: &PaymentRequest, notification: Notification<'_>) {
        for observer in &self.observers {
            observer.update(request, notification);
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
