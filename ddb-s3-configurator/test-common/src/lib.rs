/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use bytes::Bytes;
use ddb_s3_configurator::codec::Value;
use ddb_s3_configurator::error::Error;
use ddb_s3_configurator::operation::create_bucket::{CreateBucketInput, CreateBucketInputBuilder};
use ddb_s3_configurator::operation::create_table::{CreateTableInput, CreateTableInputBuilder};
use ddb_s3_configurator::operation::put_object::PutObjectInput;
use ddb_s3_configurator::store::memory::{InMemoryObjectStore, InMemoryTableStore};
use ddb_s3_configurator::store::{ObjectStore, SharedObjectStore, SharedTableStore, TableStore};
use ddb_s3_configurator::types::ScalarAttributeType;
use ddb_s3_configurator::{Configurator, CustomizedBuilder};
use serde_json::json;

pub const TABLE_NAME: &str = "orders";
pub const BUCKET_NAME: &str = "orders-payloads";

/// `{"id": 42, "tags": ["a", "b"]}`
pub fn sample_document() -> Value {
    json!({"id": 42, "tags": ["a", "b"]})
}

/// The table descriptor a driver starts from before customization.
pub fn default_table() -> CreateTableInputBuilder {
    CreateTableInput::builder()
        .table_name(TABLE_NAME)
        .hash_key("key", ScalarAttributeType::S)
}

/// The bucket descriptor a driver starts from before customization.
pub fn default_bucket() -> CreateBucketInputBuilder {
    CreateBucketInput::builder().bucket(BUCKET_NAME)
}

/// In-memory stores wired into a configurator under test.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    pub tables: InMemoryTableStore,
    pub objects: InMemoryObjectStore,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client factories of `builder` at this backend.
    pub fn install(&self, builder: CustomizedBuilder) -> CustomizedBuilder {
        builder
            .table_store(self.tables.clone())
            .object_store(self.objects.clone())
    }
}

/// Drives a configurator the way a storage driver does.
#[derive(Debug)]
pub struct Driver<C> {
    configurator: C,
    table_store: SharedTableStore,
    object_store: SharedObjectStore,
}

impl<C: Configurator> Driver<C> {
    /// Build the clients and provision the table and bucket.
    pub async fn provision(configurator: C) -> Result<Self, Error> {
        let table_store = configurator.make_table_store_client().await?;
        let object_store = configurator.make_object_store_client().await?;

        let table = configurator.create_table(default_table())?.build()?;
        table_store.create_table(table).await?;
        let bucket = configurator.create_bucket(default_bucket())?.build()?;
        object_store.create_bucket(bucket).await?;

        Ok(Self {
            configurator,
            table_store,
            object_store,
        })
    }

    /// Store `value` as a table item.
    pub async fn put_item(&self, key: &str, value: &Value) -> Result<(), Error> {
        let bytes = self.configurator.serialize(value)?;
        self.table_store.put_item(TABLE_NAME, key, bytes).await
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<Value>, Error> {
        match self.table_store.get_item(TABLE_NAME, key).await? {
            Some(bytes) => Ok(Some(self.configurator.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Store `value` as an object in the bucket.
    pub async fn put_object(&self, key: &str, value: &Value) -> Result<(), Error> {
        let body: Bytes = self.configurator.serialize(value)?;
        let object = PutObjectInput::builder()
            .bucket(BUCKET_NAME)
            .key(key)
            .body(body);
        let object = self.configurator.put_object(object)?.build()?;
        self.object_store.put_object(object).await
    }

    pub async fn get_object(&self, key: &str) -> Result<Option<Value>, Error> {
        match self.object_store.get_object(BUCKET_NAME, key).await? {
            Some(bytes) => Ok(Some(self.configurator.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }
}
