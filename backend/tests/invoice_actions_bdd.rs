//! Behaviour tests for the invoice form actions.
//!
//! Scenarios drive the real `InvoiceActionService` with recording doubles
//! for the repository and view cache, so assertions see exactly which rows
//! were written and which views were refreshed.

use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashboard::domain::ports::{
    InvoiceCommand, InvoicePersistenceError, InvoiceRepository, ServerNavigator, ViewCache,
};
use dashboard::domain::{
    InvoiceActionService, InvoiceChanges, InvoiceField, InvoiceFormInput, InvoiceFormState,
    InvoiceId, NewInvoice, Redirect, ViewPath, AMOUNT_MESSAGE,
};
use futures::executor::block_on;
use mockable::MockClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Write {
    Insert(NewInvoice),
    Update(InvoiceId, InvoiceChanges),
    Delete(InvoiceId),
}

#[derive(Default)]
struct RecordingRepository {
    reject: Mutex<bool>,
    writes: Mutex<Vec<Write>>,
}

impl RecordingRepository {
    fn record(&self, write: Write) -> Result<(), InvoicePersistenceError> {
        if *self.reject.lock().expect("reject lock") {
            return Err(InvoicePersistenceError::query("database error"));
        }
        self.writes.lock().expect("writes lock").push(write);
        Ok(())
    }

    fn writes(&self) -> Vec<Write> {
        self.writes.lock().expect("writes lock").clone()
    }
}

#[async_trait]
impl InvoiceRepository for RecordingRepository {
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), InvoicePersistenceError> {
        self.record(Write::Insert(invoice.clone()))
    }

    async fn update(
        &self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), InvoicePersistenceError> {
        self.record(Write::Update(id.clone(), changes.clone()))
    }

    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoicePersistenceError> {
        self.record(Write::Delete(id.clone()))
    }
}

#[derive(Default)]
struct RecordingCache {
    invalidated: Mutex<Vec<ViewPath>>,
}

#[async_trait]
impl ViewCache for RecordingCache {
    async fn invalidate(&self, path: &ViewPath) {
        self.invalidated
            .lock()
            .expect("cache lock")
            .push(path.clone());
    }
}

enum Outcome {
    Navigated(Result<Redirect, InvoiceFormState>),
    Deleted(Result<(), InvoiceFormState>),
}

impl Outcome {
    fn rejection(&self) -> Option<&InvoiceFormState> {
        match self {
            Self::Navigated(result) => result.as_ref().err(),
            Self::Deleted(result) => result.as_ref().err(),
        }
    }
}

struct InvoiceWorld {
    now: RefCell<DateTime<Utc>>,
    form: RefCell<InvoiceFormInput>,
    repository: Arc<RecordingRepository>,
    cache: Arc<RecordingCache>,
    outcome: RefCell<Option<Outcome>>,
}

impl InvoiceWorld {
    fn new() -> Self {
        Self {
            now: RefCell::new(DateTime::<Utc>::UNIX_EPOCH),
            form: RefCell::new(InvoiceFormInput::default()),
            repository: Arc::new(RecordingRepository::default()),
            cache: Arc::new(RecordingCache::default()),
            outcome: RefCell::new(None),
        }
    }

    fn service(&self) -> InvoiceActionService<RecordingRepository, RecordingCache, ServerNavigator> {
        let now = *self.now.borrow();
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now);
        InvoiceActionService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.cache),
            Arc::new(ServerNavigator),
            Arc::new(clock),
        )
    }

    fn with_outcome<T>(&self, f: impl FnOnce(&Outcome) -> T) -> T {
        let outcome = self.outcome.borrow();
        f(outcome.as_ref().expect("an action was submitted"))
    }

    fn rejection(&self) -> InvoiceFormState {
        self.with_outcome(|outcome| outcome.rejection().cloned())
            .expect("expected the action to be rejected")
    }

    fn invalidated(&self) -> Vec<ViewPath> {
        self.cache.invalidated.lock().expect("cache lock").clone()
    }
}

fn invoice_id(raw: &str) -> InvoiceId {
    InvoiceId::new(raw).expect("valid invoice id")
}

#[fixture]
fn world() -> InvoiceWorld {
    InvoiceWorld::new()
}

#[given("the UTC clock reads {timestamp}")]
fn the_utc_clock_reads(world: &InvoiceWorld, timestamp: String) {
    *world.now.borrow_mut() = timestamp.parse().expect("RFC 3339 timestamp");
}

#[given("a form with customer {customer}")]
fn a_form_with_customer(world: &InvoiceWorld, customer: String) {
    world.form.borrow_mut().customer_id = Some(customer);
}

#[given("amount {amount}")]
fn amount(world: &InvoiceWorld, amount: String) {
    world.form.borrow_mut().amount = Some(amount);
}

#[given("status {status}")]
fn status(world: &InvoiceWorld, status: String) {
    world.form.borrow_mut().status = Some(status);
}

#[given("the database rejects writes")]
fn the_database_rejects_writes(world: &InvoiceWorld) {
    *world.repository.reject.lock().expect("reject lock") = true;
}

#[when("the form is submitted to create an invoice")]
fn the_form_is_submitted_to_create(world: &InvoiceWorld) {
    let input = world.form.borrow().clone();
    let result = block_on(world.service().create(input));
    *world.outcome.borrow_mut() = Some(Outcome::Navigated(result));
}

#[when("the form is submitted to update invoice {id}")]
fn the_form_is_submitted_to_update(world: &InvoiceWorld, id: String) {
    let input = world.form.borrow().clone();
    let result = block_on(world.service().update(&invoice_id(&id), input));
    *world.outcome.borrow_mut() = Some(Outcome::Navigated(result));
}

#[when("invoice {id} is deleted")]
fn invoice_is_deleted(world: &InvoiceWorld, id: String) {
    let result = block_on(world.service().delete(&invoice_id(&id)));
    *world.outcome.borrow_mut() = Some(Outcome::Deleted(result));
}

#[then("an invoice of {cents} cents dated {date} is inserted")]
fn an_invoice_is_inserted(world: &InvoiceWorld, cents: i64, date: String) {
    let date: NaiveDate = date.parse().expect("ISO date");
    let writes = world.repository.writes();
    let [Write::Insert(invoice)] = writes.as_slice() else {
        panic!("expected exactly one insert, got {writes:?}");
    };
    assert_eq!(invoice.amount.get(), cents);
    assert_eq!(invoice.date, date);
}

#[then("invoice {id} is updated to {cents} cents")]
fn invoice_is_updated(world: &InvoiceWorld, id: String, cents: i64) {
    let writes = world.repository.writes();
    let [Write::Update(updated, changes)] = writes.as_slice() else {
        panic!("expected exactly one update, got {writes:?}");
    };
    assert_eq!(updated.as_str(), id);
    assert_eq!(changes.amount.get(), cents);
}

#[then("invoice {id} is removed")]
fn invoice_is_removed(world: &InvoiceWorld, id: String) {
    assert_eq!(world.repository.writes(), vec![Write::Delete(invoice_id(&id))]);
}

#[then("nothing is written")]
fn nothing_is_written(world: &InvoiceWorld) {
    assert!(world.repository.writes().is_empty());
}

#[then("the invoice listing is invalidated")]
fn the_invoice_listing_is_invalidated(world: &InvoiceWorld) {
    assert_eq!(world.invalidated(), vec![ViewPath::invoices()]);
}

#[then("the invoice listing is not invalidated")]
fn the_invoice_listing_is_not_invalidated(world: &InvoiceWorld) {
    assert!(world.invalidated().is_empty());
}

#[then("the user is redirected to {path}")]
fn the_user_is_redirected_to(world: &InvoiceWorld, path: String) {
    world.with_outcome(|outcome| match outcome {
        Outcome::Navigated(Ok(redirect)) => assert_eq!(redirect.location().as_str(), path),
        _ => panic!("expected a redirect"),
    });
}

#[then("no redirect is issued")]
fn no_redirect_is_issued(world: &InvoiceWorld) {
    world.with_outcome(|outcome| {
        assert!(matches!(outcome, Outcome::Deleted(Ok(()))));
    });
}

#[then("the amount field is reported")]
fn the_amount_field_is_reported(world: &InvoiceWorld) {
    let state = world.rejection();
    let errors = state.errors.expect("field errors");
    assert_eq!(errors.get(InvoiceField::Amount), [AMOUNT_MESSAGE]);
    assert!(errors.get(InvoiceField::CustomerId).is_empty());
    assert!(errors.get(InvoiceField::Status).is_empty());
}

#[then("the customer, amount and status fields are reported")]
fn every_field_is_reported(world: &InvoiceWorld) {
    let errors = world.rejection().errors.expect("field errors");
    for field in [
        InvoiceField::CustomerId,
        InvoiceField::Amount,
        InvoiceField::Status,
    ] {
        assert_eq!(errors.get(field).len(), 1, "{field:?} should be reported");
    }
}

#[then("no field errors are reported")]
fn no_field_errors_are_reported(world: &InvoiceWorld) {
    assert!(world.rejection().errors.is_none());
}

#[then("the message is {message}")]
fn the_message_is(world: &InvoiceWorld, message: String) {
    assert_eq!(world.rejection().message.as_deref(), Some(message.as_str()));
}

#[scenario(path = "tests/features/invoice_actions.feature")]
fn invoice_action_scenarios(world: InvoiceWorld) {
    drop(world);
}
