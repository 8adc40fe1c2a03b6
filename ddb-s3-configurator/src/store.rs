/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Error;
use crate::operation::create_bucket::CreateBucketInput;
use crate::operation::create_table::CreateTableInput;
use crate::operation::put_object::PutObjectInput;

/// [`TableStore`] implementation for the DynamoDB client
pub mod dynamodb;

/// [`ObjectStore`] implementation for the Amazon S3 client
pub mod s3;

/// In-memory stores for tests and embedding
pub mod memory;

/// Name of the string partition key attribute used by [`TableStore::put_item`] and
/// [`TableStore::get_item`].
pub const KEY_ATTRIBUTE: &str = "key";

/// Name of the binary attribute holding the serialized value of an item.
pub const VALUE_ATTRIBUTE: &str = "value";

/// Capabilities a driver needs from the table-oriented key-value store.
///
/// Implementations must be safe to share across tasks.
#[async_trait]
pub trait TableStore: Send + Sync + fmt::Debug {
    /// Create a table.
    async fn create_table(&self, input: CreateTableInput) -> Result<(), Error>;

    /// Write `value` under `key`, replacing any previous value.
    async fn put_item(&self, table: &str, key: &str, value: Bytes) -> Result<(), Error>;

    /// Read the value stored under `key`, `None` if there is no such item.
    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Bytes>, Error>;
}

/// Capabilities a driver needs from the object/blob store.
///
/// Implementations must be safe to share across tasks.
#[async_trait]
pub trait ObjectStore: Send + Sync + fmt::Debug {
    /// Create a bucket.
    async fn create_bucket(&self, input: CreateBucketInput) -> Result<(), Error>;

    /// Write a single object.
    async fn put_object(&self, input: PutObjectInput) -> Result<(), Error>;

    /// Read an object's contents, `None` if there is no such key.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, Error>;
}

/// A cheaply cloneable, shared [`TableStore`] client handle.
#[derive(Clone, Debug)]
pub struct SharedTableStore(Arc<dyn TableStore>);

impl SharedTableStore {
    /// Wrap `store` for sharing.
    pub fn new(store: impl TableStore + 'static) -> Self {
        Self(Arc::new(store))
    }
}

#[async_trait]
impl TableStore for SharedTableStore {
    async fn create_table(&self, input: CreateTableInput) -> Result<(), Error> {
        self.0.create_table(input).await
    }

    async fn put_item(&self, table: &str, key: &str, value: Bytes) -> Result<(), Error> {
        self.0.put_item(table, key, value).await
    }

    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Bytes>, Error> {
        self.0.get_item(table, key).await
    }
}

/// A cheaply cloneable, shared [`ObjectStore`] client handle.
#[derive(Clone, Debug)]
pub struct SharedObjectStore(Arc<dyn ObjectStore>);

impl SharedObjectStore {
    /// Wrap `store` for sharing.
    pub fn new(store: impl ObjectStore + 'static) -> Self {
        Self(Arc::new(store))
    }
}

#[async_trait]
impl ObjectStore for SharedObjectStore {
    async fn create_bucket(&self, input: CreateBucketInput) -> Result<(), Error> {
        self.0.create_bucket(input).await
    }

    async fn put_object(&self, input: PutObjectInput) -> Result<(), Error> {
        self.0.put_object(input).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, Error> {
        self.0.get_object(bucket, key).await
    }
}
