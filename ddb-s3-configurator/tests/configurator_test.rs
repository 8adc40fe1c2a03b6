/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_runtime::test_util::capture_test_logs::capture_test_logs;
use bytes::Bytes;
use ddb_s3_configurator::codec::{JsonCodec, LazyCodec};
use ddb_s3_configurator::error::{Error, ErrorKind};
use ddb_s3_configurator::operation::create_table::CreateTableInputBuilder;
use ddb_s3_configurator::store::TableStore;
use ddb_s3_configurator::types::{BillingMode, ProvisionedThroughput};
use ddb_s3_configurator::{ConfiguratorExt, Customized, DefaultConfigurator};
use serde::{Deserialize, Serialize};
use serde_json::json;
use test_common::{sample_document, Driver, InMemoryBackend, BUCKET_NAME, TABLE_NAME};

fn on_demand(table: CreateTableInputBuilder) -> Result<CreateTableInputBuilder, Error> {
    Ok(table.billing_mode(BillingMode::PayPerRequest))
}

#[tokio::test]
async fn test_provision_and_round_trip() {
    let backend = InMemoryBackend::new();
    let configurator = backend
        .install(Customized::builder())
        .create_table(on_demand)
        .put_object(|object| Ok(object.content_type("application/octet-stream")))
        .build();

    let driver = Driver::provision(configurator).await.unwrap();

    let table = backend.tables.table(TABLE_NAME).unwrap().unwrap();
    assert_eq!(TABLE_NAME, table.table_name());
    assert_eq!(Some(BillingMode::PayPerRequest), table.billing_mode());
    assert_eq!(None, table.provisioned_throughput());
    assert!(table.tags().is_empty());
    assert!(backend.objects.bucket(BUCKET_NAME).unwrap().is_some());

    driver.put_item("order-42", &sample_document()).await.unwrap();
    assert_eq!(
        Some(sample_document()),
        driver.get_item("order-42").await.unwrap()
    );
    assert_eq!(None, driver.get_item("order-43").await.unwrap());

    driver
        .put_object("order-42.payload", &sample_document())
        .await
        .unwrap();
    let object = backend
        .objects
        .object(BUCKET_NAME, "order-42.payload")
        .unwrap()
        .unwrap();
    assert_eq!(Some("application/octet-stream"), object.content_type());
    assert_eq!(
        Some(sample_document()),
        driver.get_object("order-42.payload").await.unwrap()
    );
}

#[tokio::test]
async fn test_layered_customizations() {
    let backend = InMemoryBackend::new();
    let platform = backend
        .install(Customized::builder())
        .create_table(|table| Ok(table.deletion_protection_enabled(true).tag("owner", "platform")))
        .create_bucket(|bucket| Ok(bucket.location_constraint("eu-west-1")))
        .build();
    let team = Customized::builder()
        .delegate(platform)
        .create_table(|table| Ok(on_demand(table)?.tag("owner", "orders-team")))
        .build();

    Driver::provision(team).await.unwrap();

    let table = backend.tables.table(TABLE_NAME).unwrap().unwrap();
    assert_eq!(Some(true), table.deletion_protection_enabled());
    assert_eq!(Some(BillingMode::PayPerRequest), table.billing_mode());
    // the outer layer runs last
    assert_eq!(
        Some(&"orders-team".to_owned()),
        table.tags().get("owner")
    );

    let bucket = backend.objects.bucket(BUCKET_NAME).unwrap().unwrap();
    assert_eq!(Some("eu-west-1"), bucket.location_constraint());
}

#[tokio::test]
async fn test_hook_failure_stops_provisioning() {
    let backend = InMemoryBackend::new();
    let configurator = backend
        .install(Customized::builder())
        .create_bucket(|_| {
            Err(Error::new(
                ErrorKind::Configuration,
                "bucket creation disabled",
            ))
        })
        .build();

    let err = Driver::provision(configurator).await.unwrap_err();
    assert_eq!(&ErrorKind::Configuration, err.kind());
    assert!(backend.tables.table(TABLE_NAME).unwrap().is_some());
    assert!(backend.objects.bucket(BUCKET_NAME).unwrap().is_none());
}

#[tokio::test]
async fn test_invalid_customization_rejected() {
    let backend = InMemoryBackend::new();
    let configurator = backend
        .install(Customized::builder())
        .create_table(|table| Ok(table.billing_mode(BillingMode::Provisioned)))
        .build();

    let err = Driver::provision(configurator).await.unwrap_err();
    assert_eq!(&ErrorKind::Configuration, err.kind());
    assert!(backend.tables.table_names().unwrap().is_empty());

    let configurator = backend
        .install(Customized::builder())
        .create_table(|table| {
            Ok(table
                .billing_mode(BillingMode::Provisioned)
                .provisioned_throughput(ProvisionedThroughput::new(5, 5)))
        })
        .build();
    Driver::provision(configurator).await.unwrap();
    let table = backend.tables.table(TABLE_NAME).unwrap().unwrap();
    assert_eq!(
        Some(&ProvisionedThroughput::new(5, 5)),
        table.provisioned_throughput()
    );
}

#[tokio::test]
async fn test_corrupt_item_fails_to_deserialize() {
    let backend = InMemoryBackend::new();
    let driver = Driver::provision(backend.install(Customized::builder()).build())
        .await
        .unwrap();

    backend
        .tables
        .put_item(TABLE_NAME, "corrupt", Bytes::from_static(b"DSV\x01{\"id\":"))
        .await
        .unwrap();
    let err = driver.get_item("corrupt").await.unwrap_err();
    assert_eq!(&ErrorKind::Serialization, err.kind());

    backend
        .tables
        .put_item(TABLE_NAME, "foreign", Bytes::from_static(b"{\"id\":42}"))
        .await
        .unwrap();
    let err = driver.get_item("foreign").await.unwrap_err();
    assert_eq!(&ErrorKind::Serialization, err.kind());
}

#[tokio::test]
async fn test_codec_initialized_lazily() {
    let (_guard, rx) = capture_test_logs();

    let codec = LazyCodec::new(|| JsonCodec);
    let backend = InMemoryBackend::new();
    let configurator = backend
        .install(Customized::builder())
        .delegate(DefaultConfigurator::new().with_codec(codec.clone()))
        .build();

    let driver = Driver::provision(configurator).await.unwrap();
    assert!(!codec.is_initialized());
    assert!(!rx.contents().contains("initialized codec"));

    driver.put_item("order-42", &sample_document()).await.unwrap();
    assert!(codec.is_initialized());
    assert!(rx.contents().contains("initialized codec"));
}

#[test]
fn test_typed_values_through_layers() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: u64,
        tags: Vec<String>,
    }

    let inner = Customized::builder().create_table(on_demand).build();
    let configurator = Customized::builder().delegate(inner).build();

    let order = Order {
        id: 42,
        tags: vec!["a".to_owned(), "b".to_owned()],
    };
    let bytes = configurator.serialize_typed(&order).unwrap();
    assert_eq!(
        json!({"id": 42, "tags": ["a", "b"]}),
        configurator.deserialize_typed::<serde_json::Value>(&bytes).unwrap()
    );
    assert_eq!(order, configurator.deserialize_typed::<Order>(&bytes).unwrap());
}
