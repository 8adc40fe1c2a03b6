/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */

//! Storage configurator for a DynamoDB with Amazon S3 backend
//!
//! A storage driver that keeps values in a DynamoDB table and large payloads in an Amazon S3
//! bucket asks a [`Configurator`] how to provision and use both services:
//!
//! * the parameters used to create the table and the bucket, and to write each object
//! * the long lived clients used to talk to each service
//! * how application values are turned into bytes and back
//!
//! [`DefaultConfigurator`] implements every operation with its documented default.
//! [`Customized`] overrides any subset of them on top of another configurator.
//!
//! # Examples
//!
//! Provision an on-demand table and round trip a value through it:
//!
//! ```no_run
//! use ddb_s3_configurator::operation::create_table::CreateTableInput;
//! use ddb_s3_configurator::store::TableStore;
//! use ddb_s3_configurator::types::{BillingMode, ScalarAttributeType};
//! use ddb_s3_configurator::{Configurator, Customized};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), ddb_s3_configurator::error::Error> {
//! let configurator = Customized::builder()
//!     .create_table(|table| Ok(table.billing_mode(BillingMode::PayPerRequest)))
//!     .build();
//!
//! let table = CreateTableInput::builder()
//!     .table_name("orders")
//!     .hash_key("key", ScalarAttributeType::S);
//! let table = configurator.create_table(table)?.build()?;
//!
//! let store = configurator.make_table_store_client().await?;
//! store.create_table(table).await?;
//!
//! let bytes = configurator.serialize(&json!({"id": 42, "tags": ["a", "b"]}))?;
//! store.put_item("orders", "order-42", bytes).await?;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

/// Error types emitted by `ddb-s3-configurator`
pub mod error;

/// Common types used by `ddb-s3-configurator`
pub mod types;

/// Request descriptors passed through customization hooks
pub mod operation;

/// Value model and codecs
pub mod codec;

/// Storage capabilities and their implementations
pub mod store;

/// The configurator capability and its default implementation
pub mod configurator;

/// Client configuration
pub mod config;

pub use self::config::Config;
pub use self::configurator::customize::{Customized, CustomizedBuilder};
pub use self::configurator::{
    Configurator, ConfiguratorExt, DefaultConfigurator, SharedConfigurator,
};

/// Create a config loader
pub fn from_env() -> config::loader::ConfigLoader {
    config::loader::ConfigLoader::default()
}
