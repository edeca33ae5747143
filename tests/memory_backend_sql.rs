//! The same federation semantics driven through the in-memory backend,
//! demonstrating that the resolution layer only ever sees the
//! `NamespaceBackend` trait.

use std::sync::Arc;

use arrow::array::StringArray;
use arrow::record_batch::RecordBatch;
use canopy::arrow_utils::{field_int32, field_utf8, schema, RecordBatchBuilder};
use canopy::{InMemoryNamespace, NamespaceBackend, NamespacePath, SessionBuilder, TableName};
use datafusion::prelude::{SessionConfig, SessionContext};

async fn populated_root() -> InMemoryNamespace {
    let backend = InMemoryNamespace::new();
    backend
        .create_namespace(&NamespacePath::new(["retail"]))
        .await
        .unwrap();
    backend
        .create_namespace(&NamespacePath::new(["retail", "sales"]))
        .await
        .unwrap();

    let customers = schema(vec![
        field_int32("customer_id", false),
        field_utf8("name", false),
    ]);
    let mut builder = RecordBatchBuilder::new(Arc::clone(&customers));
    builder
        .add_int32_column(vec![Some(1), Some(2)])
        .add_string_column(vec![Some("Alice"), Some("Bob")]);
    backend
        .write_table(
            &NamespacePath::new(["retail", "sales"]),
            &TableName::new("customers"),
            customers,
            vec![builder.build().unwrap()],
        )
        .await
        .unwrap();
    backend
}

async fn populated_crm() -> InMemoryNamespace {
    // This tree keeps its data directly under a top-level "dim" namespace,
    // so it is mounted with a root prefix.
    let backend = InMemoryNamespace::new();
    backend
        .create_namespace(&NamespacePath::new(["dim"]))
        .await
        .unwrap();

    let dims = schema(vec![
        field_int32("customer_id", false),
        field_utf8("segment", false),
    ]);
    let mut builder = RecordBatchBuilder::new(Arc::clone(&dims));
    builder
        .add_int32_column(vec![Some(1), Some(2)])
        .add_string_column(vec![Some("Silver"), Some("Gold")]);
    backend
        .write_table(
            &NamespacePath::new(["dim"]),
            &TableName::new("customers_dim"),
            dims,
            vec![builder.build().unwrap()],
        )
        .await
        .unwrap();
    backend
}

async fn setup() -> SessionContext {
    SessionBuilder::new()
        .with_root(Arc::new(populated_root().await))
        .add_mount(
            "crm",
            Arc::new(populated_crm().await),
            NamespacePath::root(),
        )
        .with_config(
            SessionConfig::new()
                .with_target_partitions(2)
                .with_batch_size(1024),
        )
        .build()
        .unwrap()
}

async fn run(ctx: &SessionContext, sql: &str) -> RecordBatch {
    let batches = ctx.sql(sql).await.unwrap().collect().await.unwrap();
    let schema = batches[0].schema();
    arrow::compute::concat_batches(&schema, &batches).unwrap()
}

#[tokio::test]
async fn cross_backend_join() {
    let ctx = setup().await;

    let batch = run(
        &ctx,
        "SELECT c.name, d.segment \
         FROM retail.sales.customers c \
         JOIN crm.dim.customers_dim d \
           ON c.customer_id = d.customer_id \
         WHERE c.customer_id = 2",
    )
    .await;

    assert_eq!(batch.num_rows(), 1);
    let names = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    let segments = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(names.value(0), "Bob");
    assert_eq!(segments.value(0), "Gold");
}

#[tokio::test]
async fn missing_reference_fails_in_memory_too() {
    let ctx = setup().await;

    let result = ctx.sql("SELECT * FROM retail.sales.nope").await;
    let failed = match result {
        Err(_) => true,
        Ok(df) => df.collect().await.is_err(),
    };
    assert!(failed);
}
