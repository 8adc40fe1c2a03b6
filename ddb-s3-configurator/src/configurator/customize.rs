/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::future::{self, BoxFuture, FutureExt};

use super::{Configurator, DefaultConfigurator, SharedConfigurator};
use crate::codec::{Codec, SharedCodec, Value};
use crate::error::Error;
use crate::operation::create_bucket::CreateBucketInputBuilder;
use crate::operation::create_table::CreateTableInputBuilder;
use crate::operation::put_object::PutObjectInputBuilder;
use crate::store::{ObjectStore, SharedObjectStore, SharedTableStore, TableStore};

type Hook<T> = Arc<dyn Fn(T) -> Result<T, Error> + Send + Sync>;
type Factory<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// Run `first` (if any) and then `next`.
fn chain<T: 'static>(first: Option<Hook<T>>, next: Hook<T>) -> Hook<T> {
    match first {
        None => next,
        Some(first) => Arc::new(move |builder: T| next(first(builder)?)),
    }
}

/// A [`Configurator`] that overrides some operations of a delegate.
///
/// Customization hooks run after the delegate's hook, so layering one `Customized` over another
/// applies the inner adjustment first. Client factory and codec overrides replace the delegate's
/// behavior outright. Anything not overridden is forwarded to the delegate, which is a
/// [`DefaultConfigurator`] unless set with [`CustomizedBuilder::delegate`].
///
/// # Examples
///
/// ```
/// use ddb_s3_configurator::types::BillingMode;
/// use ddb_s3_configurator::Customized;
///
/// let configurator = Customized::builder()
///     .create_table(|table| Ok(table.billing_mode(BillingMode::PayPerRequest)))
///     .put_object(|object| Ok(object.storage_class("STANDARD_IA")))
///     .build();
/// ```
#[derive(Clone)]
pub struct Customized {
    delegate: SharedConfigurator,
    create_table: Option<Hook<CreateTableInputBuilder>>,
    create_bucket: Option<Hook<CreateBucketInputBuilder>>,
    put_object: Option<Hook<PutObjectInputBuilder>>,
    table_store: Option<Factory<SharedTableStore>>,
    object_store: Option<Factory<SharedObjectStore>>,
    codec: Option<SharedCodec>,
}

impl Customized {
    /// Create a new `Customized` builder
    pub fn builder() -> CustomizedBuilder {
        CustomizedBuilder::default()
    }

    /// The configurator operations are forwarded to when not overridden.
    pub fn delegate(&self) -> &SharedConfigurator {
        &self.delegate
    }
}

impl fmt::Debug for Customized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customized")
            .field("delegate", &self.delegate)
            .field("create_table", &self.create_table.is_some())
            .field("create_bucket", &self.create_bucket.is_some())
            .field("put_object", &self.put_object.is_some())
            .field("table_store", &self.table_store.is_some())
            .field("object_store", &self.object_store.is_some())
            .field("codec", &self.codec)
            .finish()
    }
}

/// Fluent style builder for [Customized]
#[derive(Clone, Default)]
pub struct CustomizedBuilder {
    delegate: Option<SharedConfigurator>,
    create_table: Option<Hook<CreateTableInputBuilder>>,
    create_bucket: Option<Hook<CreateBucketInputBuilder>>,
    put_object: Option<Hook<PutObjectInputBuilder>>,
    table_store: Option<Factory<SharedTableStore>>,
    object_store: Option<Factory<SharedObjectStore>>,
    codec: Option<SharedCodec>,
}

impl CustomizedBuilder {
    /// Forward operations that are not overridden to `delegate`.
    ///
    /// Default is [`DefaultConfigurator::new`].
    pub fn delegate(mut self, delegate: impl Configurator + 'static) -> Self {
        self.delegate = Some(SharedConfigurator::new(delegate));
        self
    }

    /// Adjust table creation parameters.
    ///
    /// Calling this more than once chains the hooks in the order they were given.
    pub fn create_table<F>(mut self, hook: F) -> Self
    where
        F: Fn(CreateTableInputBuilder) -> Result<CreateTableInputBuilder, Error>
            + Send
            + Sync
            + 'static,
    {
        self.create_table = Some(chain(self.create_table.take(), Arc::new(hook)));
        self
    }

    /// Adjust bucket creation parameters.
    ///
    /// Calling this more than once chains the hooks in the order they were given.
    pub fn create_bucket<F>(mut self, hook: F) -> Self
    where
        F: Fn(CreateBucketInputBuilder) -> Result<CreateBucketInputBuilder, Error>
            + Send
            + Sync
            + 'static,
    {
        self.create_bucket = Some(chain(self.create_bucket.take(), Arc::new(hook)));
        self
    }

    /// Adjust the parameters of every object write.
    ///
    /// Calling this more than once chains the hooks in the order they were given.
    pub fn put_object<F>(mut self, hook: F) -> Self
    where
        F: Fn(PutObjectInputBuilder) -> Result<PutObjectInputBuilder, Error>
            + Send
            + Sync
            + 'static,
    {
        self.put_object = Some(chain(self.put_object.take(), Arc::new(hook)));
        self
    }

    /// Construct the table store client with `factory`.
    pub fn table_store_factory<F, Fut>(mut self, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<SharedTableStore, Error>> + Send + 'static,
    {
        self.table_store = Some(Arc::new(move || factory().boxed()));
        self
    }

    /// Hand out `store` as the table store client.
    pub fn table_store(self, store: impl TableStore + 'static) -> Self {
        let store = SharedTableStore::new(store);
        self.table_store_factory(move || future::ready(Ok(store.clone())))
    }

    /// Construct the object store client with `factory`.
    pub fn object_store_factory<F, Fut>(mut self, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<SharedObjectStore, Error>> + Send + 'static,
    {
        self.object_store = Some(Arc::new(move || factory().boxed()));
        self
    }

    /// Hand out `store` as the object store client.
    pub fn object_store(self, store: impl ObjectStore + 'static) -> Self {
        let store = SharedObjectStore::new(store);
        self.object_store_factory(move || future::ready(Ok(store.clone())))
    }

    /// Serialize and deserialize values with `codec`.
    pub fn codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Some(SharedCodec::new(codec));
        self
    }

    /// Consumes the builder and constructs a [`Customized`]
    pub fn build(self) -> Customized {
        Customized {
            delegate: self
                .delegate
                .unwrap_or_else(|| SharedConfigurator::new(DefaultConfigurator::new())),
            create_table: self.create_table,
            create_bucket: self.create_bucket,
            put_object: self.put_object,
            table_store: self.table_store,
            object_store: self.object_store,
            codec: self.codec,
        }
    }
}

impl fmt::Debug for CustomizedBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomizedBuilder")
            .field("delegate", &self.delegate)
            .field("create_table", &self.create_table.is_some())
            .field("create_bucket", &self.create_bucket.is_some())
            .field("put_object", &self.put_object.is_some())
            .field("table_store", &self.table_store.is_some())
            .field("object_store", &self.object_store.is_some())
            .field("codec", &self.codec)
            .finish()
    }
}

#[async_trait]
impl Configurator for Customized {
    fn create_table(
        &self,
        builder: CreateTableInputBuilder,
    ) -> Result<CreateTableInputBuilder, Error> {
        let builder = self.delegate.create_table(builder)?;
        match &self.create_table {
            Some(hook) => {
                tracing::trace!(table = ?builder.get_table_name(), "customizing table creation");
                hook(builder)
            }
            None => Ok(builder),
        }
    }

    fn create_bucket(
        &self,
        builder: CreateBucketInputBuilder,
    ) -> Result<CreateBucketInputBuilder, Error> {
        let builder = self.delegate.create_bucket(builder)?;
        match &self.create_bucket {
            Some(hook) => {
                tracing::trace!(bucket = ?builder.get_bucket(), "customizing bucket creation");
                hook(builder)
            }
            None => Ok(builder),
        }
    }

    fn put_object(&self, builder: PutObjectInputBuilder) -> Result<PutObjectInputBuilder, Error> {
        let builder = self.delegate.put_object(builder)?;
        match &self.put_object {
            Some(hook) => {
                tracing::trace!(key = ?builder.get_key(), "customizing object write");
                hook(builder)
            }
            None => Ok(builder),
        }
    }

    async fn make_table_store_client(&self) -> Result<SharedTableStore, Error> {
        match &self.table_store {
            Some(factory) => factory().await,
            None => self.delegate.make_table_store_client().await,
        }
    }

    async fn make_object_store_client(&self) -> Result<SharedObjectStore, Error> {
        match &self.object_store {
            Some(factory) => factory().await,
            None => self.delegate.make_object_store_client().await,
        }
    }

    fn serialize(&self, value: &Value) -> Result<Bytes, Error> {
        match &self.codec {
            Some(codec) => codec.serialize(value),
            None => self.delegate.serialize(value),
        }
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        match &self.codec {
            Some(codec) => codec.deserialize(bytes),
            None => self.delegate.deserialize(bytes),
        }
    }
}
