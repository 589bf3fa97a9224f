use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Booking {
    id: u32,
    slot: String,
    confirmed: bool,
}

#[derive(Debug)]
struct BookingCreate {
    slot: String,
}

#[derive(Debug)]
enum BookingAction {
    Confirm,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum BookingError {
    #[error("slot must not be empty")]
    EmptySlot,
    #[error("booking {0} already confirmed")]
    AlreadyConfirmed(u32),
}

#[async_trait]
impl ActorEntity for Booking {
    type Id = u32;
    type Create = BookingCreate;
    type Action = BookingAction;
    type ActionResult = bool;
    type Context = Arc<AtomicU32>;
    type Error = BookingError;

    fn from_create_params(id: u32, params: BookingCreate) -> Result<Self, Self::Error> {
        if params.slot.is_empty() {
            return Err(BookingError::EmptySlot);
        }
        Ok(Self {
            id,
            slot: params.slot,
            confirmed: false,
        })
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.slot == other.slot
    }

    async fn on_delete(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        ctx.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BookingAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            BookingAction::Confirm if self.confirmed => {
                Err(BookingError::AlreadyConfirmed(self.id))
            }
            BookingAction::Confirm => {
                self.confirmed = true;
                Ok(true)
            }
        }
    }
}

fn spawn_bookings() -> (actor_framework::ResourceClient<Booking>, Arc<AtomicU32>) {
    let mut next = 0;
    let (actor, client) = ResourceActor::<Booking>::new(10, move || {
        next += 1;
        next
    });
    let deletions = Arc::new(AtomicU32::new(0));
    tokio::spawn(actor.run(deletions.clone()));
    (client, deletions)
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (client, deletions) = spawn_bookings();

    // 1. Create
    let id = client
        .create(BookingCreate {
            slot: "mon-09".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    // 2. Action mutates in place
    assert!(client.perform_action(id, BookingAction::Confirm).await.unwrap());
    let booking = client.get(id).await.unwrap().unwrap();
    assert!(booking.confirmed);

    // 3. Action errors carry the entity error
    let err = client
        .perform_action(id, BookingAction::Confirm)
        .await
        .unwrap_err();
    assert_eq!(
        err.entity_error::<BookingError>(),
        Some(&BookingError::AlreadyConfirmed(1))
    );

    // 4. Delete returns the final state and runs the hook
    let removed = client.delete(id).await.unwrap();
    assert_eq!(removed.slot, "mon-09");
    assert_eq!(deletions.load(Ordering::SeqCst), 1);
    assert!(client.get(id).await.unwrap().is_none());

    // 5. Deleting twice is not found
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_rejects_conflicting_entity() {
    let (client, _) = spawn_bookings();

    let first = client
        .create(BookingCreate {
            slot: "tue-10".into(),
        })
        .await
        .unwrap();
    let second = client
        .create(BookingCreate {
            slot: "tue-10".into(),
        })
        .await;

    match second {
        Err(FrameworkError::Conflict(existing)) => assert_eq!(existing, first.to_string()),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(client.list().await.unwrap().len(), 1);

    // the slot frees up once the holder is deleted
    client.delete(first).await.unwrap();
    assert!(client
        .create(BookingCreate {
            slot: "tue-10".into()
        })
        .await
        .is_ok());
}

#[tokio::test]
async fn test_create_surfaces_constructor_error() {
    let (client, _) = spawn_bookings();

    let err = client
        .create(BookingCreate { slot: String::new() })
        .await
        .unwrap_err();
    assert_eq!(
        err.entity_error::<BookingError>(),
        Some(&BookingError::EmptySlot)
    );
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_and_list_return_snapshots() {
    let (client, _) = spawn_bookings();

    for slot in ["a", "b", "c"] {
        client
            .create(BookingCreate { slot: slot.into() })
            .await
            .unwrap();
    }

    let found = client.find(|b: &Booking| b.slot == "b").await.unwrap();
    assert_eq!(found.map(|b| b.id), Some(2));
    assert!(client
        .find(|b: &Booking| b.slot == "z")
        .await
        .unwrap()
        .is_none());

    let mut slots: Vec<_> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.slot)
        .collect();
    slots.sort();
    assert_eq!(slots, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_concurrent_creates_admit_one_holder() {
    let (client, _) = spawn_bookings();

    let mut handles = vec![];
    for _ in 0..10 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .create(BookingCreate {
                    slot: "fri-17".into(),
                })
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(FrameworkError::Conflict(_)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(created, 1, "exactly one create may win the slot");
    assert_eq!(conflicts, 9);
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = ResourceActor::<Booking>::new(1, || 1);
    drop(actor);

    assert!(matches!(
        client.get(1).await,
        Err(FrameworkError::ActorClosed)
    ));
}

#[tokio::test]
async fn test_hand_driven_mock_sees_create_and_get_payloads() {
    use actor_framework::mock::{create_mock_client, expect_create, expect_get};

    let (client, mut receiver) = create_mock_client::<Booking>(4);

    let calls = tokio::spawn(async move {
        let id = client
            .create(BookingCreate {
                slot: "09:00".into(),
            })
            .await?;
        client.get(id).await
    });

    let (params, respond_to) = expect_create(&mut receiver).await.unwrap();
    assert_eq!(params.slot, "09:00");
    respond_to.send(Ok(42)).unwrap();

    let (id, respond_to) = expect_get(&mut receiver).await.unwrap();
    assert_eq!(id, 42);
    let booking = Booking {
        id,
        slot: params.slot,
        confirmed: false,
    };
    respond_to.send(Ok(Some(booking.clone()))).unwrap();

    assert_eq!(calls.await.unwrap().unwrap(), Some(booking));
}
