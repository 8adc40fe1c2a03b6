/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;

use super::{ObjectStore, TableStore};
use crate::error::{Error, ErrorKind};
use crate::operation::create_bucket::CreateBucketInput;
use crate::operation::create_table::CreateTableInput;
use crate::operation::put_object::PutObjectInput;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    mutex
        .lock()
        .map_err(|_| Error::new(ErrorKind::RuntimeError, "in-memory store lock poisoned"))
}

#[derive(Debug)]
struct Table {
    input: CreateTableInput,
    items: HashMap<String, Bytes>,
}

/// A [`TableStore`] backed by a `HashMap`.
///
/// Clones share the same tables. The descriptors used to create each table are retained and can
/// be inspected with [`InMemoryTableStore::table`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableStore {
    tables: Arc<Mutex<HashMap<String, Table>>>,
}

impl InMemoryTableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The descriptor the table `name` was created with, if it exists.
    pub fn table(&self, name: &str) -> Result<Option<CreateTableInput>, Error> {
        let tables = lock(&self.tables)?;
        Ok(tables.get(name).map(|t| t.input.clone()))
    }

    /// Names of all tables, sorted.
    pub fn table_names(&self) -> Result<Vec<String>, Error> {
        let tables = lock(&self.tables)?;
        let mut names: Vec<_> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

fn table_not_found(table: &str) -> Error {
    Error::new(ErrorKind::NotFound, format!("table `{table}` does not exist"))
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn create_table(&self, input: CreateTableInput) -> Result<(), Error> {
        let mut tables = lock(&self.tables)?;
        if tables.contains_key(input.table_name()) {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                format!("table `{}` already exists", input.table_name()),
            ));
        }
        tracing::debug!(table = input.table_name(), "created table");
        tables.insert(
            input.table_name().to_owned(),
            Table {
                input,
                items: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn put_item(&self, table: &str, key: &str, value: Bytes) -> Result<(), Error> {
        let mut tables = lock(&self.tables)?;
        let t = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        t.items.insert(key.to_owned(), value);
        Ok(())
    }

    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Bytes>, Error> {
        let tables = lock(&self.tables)?;
        let t = tables.get(table).ok_or_else(|| table_not_found(table))?;
        Ok(t.items.get(key).cloned())
    }
}

#[derive(Debug)]
struct Bucket {
    input: CreateBucketInput,
    objects: HashMap<String, PutObjectInput>,
}

/// An [`ObjectStore`] backed by a `HashMap`.
///
/// Clones share the same buckets. Written objects keep their full descriptor, see
/// [`InMemoryObjectStore::object`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
}

impl InMemoryObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The descriptor the bucket `name` was created with, if it exists.
    pub fn bucket(&self, name: &str) -> Result<Option<CreateBucketInput>, Error> {
        let buckets = lock(&self.buckets)?;
        Ok(buckets.get(name).map(|b| b.input.clone()))
    }

    /// The descriptor of the last write to `bucket`/`key`, if any.
    pub fn object(&self, bucket: &str, key: &str) -> Result<Option<PutObjectInput>, Error> {
        let buckets = lock(&self.buckets)?;
        Ok(buckets
            .get(bucket)
            .and_then(|b| b.objects.get(key))
            .cloned())
    }
}

fn bucket_not_found(bucket: &str) -> Error {
    Error::new(ErrorKind::NotFound, format!("bucket `{bucket}` does not exist"))
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn create_bucket(&self, input: CreateBucketInput) -> Result<(), Error> {
        let mut buckets = lock(&self.buckets)?;
        if buckets.contains_key(input.bucket()) {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                format!("bucket `{}` already exists", input.bucket()),
            ));
        }
        tracing::debug!(bucket = input.bucket(), "created bucket");
        buckets.insert(
            input.bucket().to_owned(),
            Bucket {
                input,
                objects: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn put_object(&self, input: PutObjectInput) -> Result<(), Error> {
        let mut buckets = lock(&self.buckets)?;
        let bucket = buckets
            .get_mut(input.bucket())
            .ok_or_else(|| bucket_not_found(input.bucket()))?;
        bucket.objects.insert(input.key().to_owned(), input);
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, Error> {
        let buckets = lock(&self.buckets)?;
        let b = buckets.get(bucket).ok_or_else(|| bucket_not_found(bucket))?;
        Ok(b.objects.get(key).map(|o| o.body().clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::ScalarAttributeType;

    fn table(name: &str) -> CreateTableInput {
        CreateTableInput::builder()
            .table_name(name)
            .hash_key("key", ScalarAttributeType::S)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_table_store() {
        let store = InMemoryTableStore::new();
        store.create_table(table("docs")).await.unwrap();

        let err = store.create_table(table("docs")).await.unwrap_err();
        assert_eq!(&ErrorKind::AlreadyExists, err.kind());

        store
            .put_item("docs", "a", Bytes::from_static(b"1"))
            .await
            .unwrap();
        assert_eq!(
            Some(Bytes::from_static(b"1")),
            store.get_item("docs", "a").await.unwrap()
        );
        assert_eq!(None, store.get_item("docs", "b").await.unwrap());

        let err = store.get_item("other", "a").await.unwrap_err();
        assert_eq!(&ErrorKind::NotFound, err.kind());

        let clone = store.clone();
        assert_eq!(vec!["docs".to_owned()], clone.table_names().unwrap());
        assert_eq!(Some(table("docs")), clone.table("docs").unwrap());
    }

    #[tokio::test]
    async fn test_object_store() {
        let store = InMemoryObjectStore::new();
        let bucket = CreateBucketInput::builder().bucket("docs").build().unwrap();
        store.create_bucket(bucket.clone()).await.unwrap();
        assert_eq!(Some(bucket.clone()), store.bucket("docs").unwrap());

        let err = store.create_bucket(bucket).await.unwrap_err();
        assert_eq!(&ErrorKind::AlreadyExists, err.kind());

        let object = PutObjectInput::builder()
            .bucket("docs")
            .key("a")
            .body(Bytes::from_static(b"contents"))
            .build()
            .unwrap();
        store.put_object(object.clone()).await.unwrap();
        assert_eq!(Some(object), store.object("docs", "a").unwrap());
        assert_eq!(
            Some(Bytes::from_static(b"contents")),
            store.get_object("docs", "a").await.unwrap()
        );
        assert_eq!(None, store.get_object("docs", "b").await.unwrap());

        let orphan = PutObjectInput::builder()
            .bucket("missing")
            .key("a")
            .build()
            .unwrap();
        let err = store.put_object(orphan).await.unwrap_err();
        assert_eq!(&ErrorKind::NotFound, err.kind());
    }
}
