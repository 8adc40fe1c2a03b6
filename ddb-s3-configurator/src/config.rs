/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::BehaviorVersion;
use aws_types::SdkConfig;

use crate::error::{self, Error};

/// Environment-derived configuration loading
pub mod loader;

/// Configuration used by [`DefaultConfigurator`](crate::DefaultConfigurator) to construct the
/// default DynamoDB and Amazon S3 clients.
#[derive(Debug, Clone)]
pub struct Config {
    sdk_config: SdkConfig,
    force_path_style: bool,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The shared AWS SDK configuration both clients are built from.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    /// Whether the Amazon S3 client addresses buckets by path rather than virtual host.
    pub fn force_path_style(&self) -> bool {
        self.force_path_style
    }

    fn ensure_region(&self) -> Result<(), Error> {
        if self.sdk_config.region().is_none() {
            return Err(error::client_construction(
                "no region configured, set AWS_REGION or configure a region explicitly",
            ));
        }
        Ok(())
    }

    pub(crate) fn dynamodb_client(&self) -> Result<aws_sdk_dynamodb::Client, Error> {
        self.ensure_region()?;
        let conf = aws_sdk_dynamodb::config::Builder::from(&self.sdk_config).build();
        Ok(aws_sdk_dynamodb::Client::from_conf(conf))
    }

    pub(crate) fn s3_client(&self) -> Result<aws_sdk_s3::Client, Error> {
        self.ensure_region()?;
        let conf = aws_sdk_s3::config::Builder::from(&self.sdk_config)
            .force_path_style(self.force_path_style)
            .build();
        Ok(aws_sdk_s3::Client::from_conf(conf))
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    sdk_config: Option<SdkConfig>,
    force_path_style: bool,
}

impl Builder {
    /// Set the shared AWS SDK configuration to build clients from.
    pub fn sdk_config(mut self, sdk_config: SdkConfig) -> Self {
        self.sdk_config = Some(sdk_config);
        self
    }

    /// Address buckets by path (`https://host/bucket/key`) instead of virtual host.
    ///
    /// Mostly useful for local S3 compatible services. Default is `false`.
    pub fn force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    ///
    /// When no SDK configuration is given an empty one is used, which has no region and will
    /// cause client construction to fail.
    pub fn build(self) -> Config {
        let sdk_config = self.sdk_config.unwrap_or_else(|| {
            SdkConfig::builder()
                .behavior_version(BehaviorVersion::latest())
                .build()
        });
        Config {
            sdk_config,
            force_path_style: self.force_path_style,
        }
    }
}
