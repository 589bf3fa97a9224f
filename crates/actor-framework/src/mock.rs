//! # Mock Framework
//!
//! Test doubles for the actor side of a [`ResourceClient`], so client wrappers and the
//! code that drives them can be tested without a real `ResourceActor`.
//!
//! Two styles are offered:
//!
//! | Style | Entry point | Use when |
//! |-------|-------------|----------|
//! | Scripted | [`MockClient`] | the test only cares about the *responses* a caller sees, in order |
//! | Hand-driven | [`create_mock_client`] + `expect_*` | the test must inspect the *request* payload before answering |
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Lease { id: u32, holder: String }
//! #[derive(Debug)] struct LeaseCreate;
//! #[derive(Debug)] enum LeaseAction { Renew }
//! #[derive(Debug, thiserror::Error)] #[error("lease error")] struct LeaseError;
//!
//! #[async_trait]
//! impl ActorEntity for Lease {
//!     type Id = u32; type Create = LeaseCreate; type Action = LeaseAction;
//!     type ActionResult = bool; type Context = (); type Error = LeaseError;
//!     fn from_create_params(id: u32, _: LeaseCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, holder: String::new() })
//!     }
//!     async fn handle_action(&mut self, _: LeaseAction, _: &()) -> Result<bool, Self::Error> { Ok(true) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Lease>::new();
//!     mock.expect_action(7).return_ok(true);
//!     mock.expect_get(7).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.perform_action(7, LeaseAction::Renew).await.unwrap());
//!     assert!(client.get(7).await.is_err());
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// SCRIPTED MOCK
// =============================================================================

/// A scripted response, consumed in order by [`MockClient`].
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Script<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client whose actor answers from a queue of scripted responses.
///
/// Requests must arrive in the order the expectations were registered, and must target
/// the expected id; anything else panics the mock task, which surfaces in the test as
/// `FrameworkError::ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Script<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Script<T> = Arc::new(Mutex::new(VecDeque::new()));
        let script = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = script.lock().unwrap().pop_front();
                match (request, next) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get targeted the wrong id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "action targeted the wrong id");
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R: 'static>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every scripted response was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Finishes an expectation with the response the mock should return.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T>>,
    expectations: Script<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// HAND-DRIVEN HELPERS
// =============================================================================

/// Creates a client and hands back the raw request receiver.
///
/// The test plays the actor: pull requests with the `expect_*` helpers below, assert on
/// their payloads, then answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Find.
pub async fn expect_find<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter<T>, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Find { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
