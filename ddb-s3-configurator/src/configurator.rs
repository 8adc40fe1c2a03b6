/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::codec::{ensure_finite, Codec, LazyCodec, Value};
use crate::error::Error;
use crate::operation::create_bucket::CreateBucketInputBuilder;
use crate::operation::create_table::CreateTableInputBuilder;
use crate::operation::put_object::PutObjectInputBuilder;
use crate::store::{SharedObjectStore, SharedTableStore};
use crate::Config;

/// Override a subset of configurator operations
pub mod customize;

/// Governs how the backend is provisioned and how values are persisted.
///
/// A driver passes every default request descriptor through the matching customization hook
/// before issuing the request, obtains its long lived clients from the factories, and converts
/// application values with [`serialize`](Configurator::serialize) and
/// [`deserialize`](Configurator::deserialize).
///
/// [`DefaultConfigurator`] provides the documented default for every operation. To change only
/// some of them, wrap a delegate with [`Customized`](customize::Customized), or implement this
/// trait and forward the remaining operations to a [`DefaultConfigurator`].
#[async_trait]
pub trait Configurator: Send + Sync + fmt::Debug {
    /// Customize the parameters used to create the table.
    fn create_table(
        &self,
        builder: CreateTableInputBuilder,
    ) -> Result<CreateTableInputBuilder, Error>;

    /// Customize the parameters used to create the bucket.
    fn create_bucket(
        &self,
        builder: CreateBucketInputBuilder,
    ) -> Result<CreateBucketInputBuilder, Error>;

    /// Customize the parameters of a single object write.
    fn put_object(&self, builder: PutObjectInputBuilder) -> Result<PutObjectInputBuilder, Error>;

    /// Construct the table store client.
    async fn make_table_store_client(&self) -> Result<SharedTableStore, Error>;

    /// Construct the object store client.
    async fn make_object_store_client(&self) -> Result<SharedObjectStore, Error>;

    /// Encode an application value.
    fn serialize(&self, value: &Value) -> Result<Bytes, Error>;

    /// Decode bytes produced by [`serialize`](Configurator::serialize).
    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error>;
}

/// Typed helpers for any [`Configurator`].
pub trait ConfiguratorExt: Configurator {
    /// Serialize any `T` through the configurator's codec by way of [`Value`].
    ///
    /// Fails with [`ErrorKind::Serialization`](crate::error::ErrorKind::Serialization) if `value`
    /// holds a `NaN` or infinite float, which [`Value`] cannot represent.
    fn serialize_typed<T>(&self, value: &T) -> Result<Bytes, Error>
    where
        T: Serialize + ?Sized,
    {
        ensure_finite(value)?;
        let value = serde_json::to_value(value)?;
        self.serialize(&value)
    }

    /// Deserialize bytes into any `T` by way of [`Value`].
    fn deserialize_typed<T>(&self, bytes: &[u8]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let value = self.deserialize(bytes)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl<C: Configurator + ?Sized> ConfiguratorExt for C {}

/// A cheaply cloneable, shared [`Configurator`].
#[derive(Clone, Debug)]
pub struct SharedConfigurator(Arc<dyn Configurator>);

impl SharedConfigurator {
    /// Wrap `configurator` for sharing.
    pub fn new(configurator: impl Configurator + 'static) -> Self {
        Self(Arc::new(configurator))
    }
}

#[async_trait]
impl Configurator for SharedConfigurator {
    fn create_table(
        &self,
        builder: CreateTableInputBuilder,
    ) -> Result<CreateTableInputBuilder, Error> {
        self.0.create_table(builder)
    }

    fn create_bucket(
        &self,
        builder: CreateBucketInputBuilder,
    ) -> Result<CreateBucketInputBuilder, Error> {
        self.0.create_bucket(builder)
    }

    fn put_object(&self, builder: PutObjectInputBuilder) -> Result<PutObjectInputBuilder, Error> {
        self.0.put_object(builder)
    }

    async fn make_table_store_client(&self) -> Result<SharedTableStore, Error> {
        self.0.make_table_store_client().await
    }

    async fn make_object_store_client(&self) -> Result<SharedObjectStore, Error> {
        self.0.make_object_store_client().await
    }

    fn serialize(&self, value: &Value) -> Result<Bytes, Error> {
        self.0.serialize(value)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.0.deserialize(bytes)
    }
}

/// The default behavior for every [`Configurator`] operation.
///
/// * customization hooks return the descriptor unchanged
/// * clients are built from a [`Config`], loaded from the environment on first use unless one is
///   given with [`DefaultConfigurator::from_config`]
/// * values are encoded with a [`LazyCodec`], [`JsonCodec`](crate::codec::JsonCodec) unless
///   replaced with [`DefaultConfigurator::with_codec`]
#[derive(Debug, Clone, Default)]
pub struct DefaultConfigurator {
    config: Arc<OnceCell<Config>>,
    codec: LazyCodec,
}

impl DefaultConfigurator {
    /// Create a configurator that loads its client configuration from the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configurator that builds clients from an explicit configuration.
    pub fn from_config(config: Config) -> Self {
        Self {
            config: Arc::new(OnceCell::new_with(Some(config))),
            codec: LazyCodec::default(),
        }
    }

    /// Replace the default codec.
    pub fn with_codec(mut self, codec: LazyCodec) -> Self {
        self.codec = codec;
        self
    }

    async fn config(&self) -> &Config {
        self.config
            .get_or_init(|| crate::from_env().load())
            .await
    }
}

#[async_trait]
impl Configurator for DefaultConfigurator {
    fn create_table(
        &self,
        builder: CreateTableInputBuilder,
    ) -> Result<CreateTableInputBuilder, Error> {
        Ok(builder)
    }

    fn create_bucket(
        &self,
        builder: CreateBucketInputBuilder,
    ) -> Result<CreateBucketInputBuilder, Error> {
        Ok(builder)
    }

    fn put_object(&self, builder: PutObjectInputBuilder) -> Result<PutObjectInputBuilder, Error> {
        Ok(builder)
    }

    async fn make_table_store_client(&self) -> Result<SharedTableStore, Error> {
        let client = self.config().await.dynamodb_client()?;
        tracing::debug!("constructed DynamoDB table store client");
        Ok(SharedTableStore::new(client))
    }

    async fn make_object_store_client(&self) -> Result<SharedObjectStore, Error> {
        let client = self.config().await.s3_client()?;
        tracing::debug!("constructed Amazon S3 object store client");
        Ok(SharedObjectStore::new(client))
    }

    fn serialize(&self, value: &Value) -> Result<Bytes, Error> {
        self.codec.serialize(value)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.codec.deserialize(bytes)
    }
}
