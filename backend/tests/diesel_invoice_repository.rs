//! Integration tests for `DieselInvoiceRepository` against PostgreSQL.
//!
//! An embedded cluster from `pg-embedded-setup-unpriv` backs each test
//! unless `DASHBOARD_TEST_DATABASE_URL` names an existing database. Each test
//! writes under a fresh customer id and deletes that customer's rows
//! afterwards.

use chrono::NaiveDate;
use diesel::sql_types::{Date, Int8, Uuid as SqlUuid, Varchar};
use diesel::{QueryableByName, sql_query};
use diesel_async::{RunQueryDsl, SimpleAsyncConnection};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

use dashboard::domain::ports::{InvoicePersistenceError, InvoiceRepository};
use dashboard::domain::{
    AmountInCents, CustomerId, InvoiceChanges, InvoiceId, InvoiceStatus, NewInvoice,
};
use dashboard::outbound::persistence::{DbPool, DieselInvoiceRepository, PoolConfig};

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{handle_cluster_setup_failure, test_cluster};

const DATABASE_URL_ENV: &str = "DASHBOARD_TEST_DATABASE_URL";
const SCHEMA_SQL: &str = include_str!("../migrations/2026-10-01-000000_create_invoices/up.sql");

#[derive(QueryableByName)]
struct IdRow {
    #[diesel(sql_type = SqlUuid)]
    id: Uuid,
}

#[derive(Debug, PartialEq, Eq, QueryableByName)]
struct InvoiceRow {
    #[diesel(sql_type = Int8)]
    amount: i64,
    #[diesel(sql_type = Varchar)]
    status: String,
    #[diesel(sql_type = Date)]
    date: NaiveDate,
}

struct TestContext {
    runtime: Runtime,
    pool: DbPool,
    repository: DieselInvoiceRepository,
    customer: Uuid,
    _cluster: Option<TestCluster>,
}

impl TestContext {
    fn customer_id(&self) -> CustomerId {
        CustomerId::new(self.customer.to_string()).expect("customer id")
    }

    fn invoices(&self) -> Vec<InvoiceRow> {
        self.runtime.block_on(async {
            let mut conn = self.pool.get().await.expect("connection");
            sql_query(
                "SELECT amount, status, date FROM invoices WHERE customer_id = $1 ORDER BY date",
            )
            .bind::<SqlUuid, _>(self.customer)
            .load(&mut conn)
            .await
            .expect("invoice rows")
        })
    }

    fn only_invoice_id(&self) -> InvoiceId {
        let IdRow { id } = self.runtime.block_on(async {
            let mut conn = self.pool.get().await.expect("connection");
            sql_query("SELECT id FROM invoices WHERE customer_id = $1")
                .bind::<SqlUuid, _>(self.customer)
                .get_result(&mut conn)
                .await
                .expect("single invoice")
        });
        InvoiceId::new(id.to_string()).expect("invoice id")
    }

    fn raw_insert(&self, amount: i64, status: &str) -> Result<usize, diesel::result::Error> {
        self.runtime.block_on(async {
            let mut conn = self.pool.get().await.expect("connection");
            sql_query(
                "INSERT INTO invoices (customer_id, amount, status, date) \
                 VALUES ($1, $2, $3, CURRENT_DATE)",
            )
            .bind::<SqlUuid, _>(self.customer)
            .bind::<Int8, _>(amount)
            .bind::<Varchar, _>(status)
            .execute(&mut conn)
            .await
        })
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let pool = self.pool.clone();
        let customer = self.customer;
        self.runtime.block_on(async move {
            if let Ok(mut conn) = pool.get().await {
                let _ = sql_query("DELETE FROM invoices WHERE customer_id = $1")
                    .bind::<SqlUuid, _>(customer)
                    .execute(&mut conn)
                    .await;
            }
        });
    }
}

fn database_url() -> Result<(String, Option<TestCluster>), String> {
    if let Some(url) = std::env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
    {
        return Ok((url, None));
    }
    let cluster = test_cluster()?;
    let url = cluster.connection().database_url("postgres");
    Ok((url, Some(cluster)))
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let (url, cluster) = database_url()?;

    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(url).with_max_size(2)))
        .map_err(|err| err.to_string())?;
    runtime.block_on(async {
        let mut conn = pool.get().await.map_err(|err| err.to_string())?;
        conn.batch_execute(SCHEMA_SQL)
            .await
            .map_err(|err| format!("apply schema: {err}"))
    })?;

    Ok(TestContext {
        runtime,
        repository: DieselInvoiceRepository::new(pool.clone()),
        pool,
        customer: Uuid::new_v4(),
        _cluster: cluster,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).expect("valid date")
}

fn cents(value: i64) -> AmountInCents {
    AmountInCents::new(value).expect("positive amount")
}

#[rstest]
fn insert_update_delete_round_trip(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    ctx.runtime
        .block_on(ctx.repository.insert(&NewInvoice {
            customer_id: ctx.customer_id(),
            amount: cents(1250),
            status: InvoiceStatus::Paid,
            date: sample_date(),
        }))
        .expect("insert succeeds");
    assert_eq!(
        ctx.invoices(),
        vec![InvoiceRow {
            amount: 1250,
            status: "paid".to_owned(),
            date: sample_date(),
        }]
    );

    let id = ctx.only_invoice_id();
    ctx.runtime
        .block_on(ctx.repository.update(
            &id,
            &InvoiceChanges {
                customer_id: ctx.customer_id(),
                amount: cents(300),
                status: InvoiceStatus::Pending,
            },
        ))
        .expect("update succeeds");
    assert_eq!(
        ctx.invoices(),
        vec![InvoiceRow {
            amount: 300,
            status: "pending".to_owned(),
            date: sample_date(),
        }]
    );

    ctx.runtime
        .block_on(ctx.repository.delete(&id))
        .expect("delete succeeds");
    assert!(ctx.invoices().is_empty());
}

#[rstest]
fn unknown_rows_are_silent_no_ops(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };
    ctx.runtime
        .block_on(ctx.repository.insert(&NewInvoice {
            customer_id: ctx.customer_id(),
            amount: cents(700),
            status: InvoiceStatus::Pending,
            date: sample_date(),
        }))
        .expect("insert succeeds");
    let missing = InvoiceId::new(Uuid::new_v4().to_string()).expect("invoice id");

    ctx.runtime
        .block_on(ctx.repository.update(
            &missing,
            &InvoiceChanges {
                customer_id: ctx.customer_id(),
                amount: cents(100),
                status: InvoiceStatus::Paid,
            },
        ))
        .expect("update of a missing row succeeds");
    ctx.runtime
        .block_on(ctx.repository.delete(&missing))
        .expect("delete of a missing row succeeds");

    assert_eq!(
        ctx.invoices(),
        vec![InvoiceRow {
            amount: 700,
            status: "pending".to_owned(),
            date: sample_date(),
        }]
    );
}

#[rstest]
fn non_uuid_identifiers_never_reach_the_database(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    let error = ctx
        .runtime
        .block_on(ctx.repository.delete(&InvoiceId::new("inv-1").expect("invoice id")))
        .expect_err("non-uuid id must be rejected");

    assert_eq!(
        error,
        InvoicePersistenceError::invalid_identifier("id", "inv-1")
    );
}

#[rstest]
#[case(0, "pending")]
#[case(-5, "paid")]
#[case(100, "overdue")]
fn schema_rejects_rows_outside_the_invoice_invariants(
    repo_context: Option<TestContext>,
    #[case] amount: i64,
    #[case] status: &str,
) {
    let Some(ctx) = repo_context else {
        return;
    };

    let result = ctx.raw_insert(amount, status);

    match result {
        Err(diesel::result::Error::DatabaseError(_, info)) => {
            assert!(
                info.message().contains("check constraint"),
                "unexpected database error: {}",
                info.message()
            );
        }
        other => panic!("expected a check violation, got {other:?}"),
    }
    assert!(ctx.invoices().is_empty());
}
