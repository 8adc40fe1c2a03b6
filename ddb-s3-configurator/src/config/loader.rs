/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::BehaviorVersion;
use aws_types::region::Region;

use crate::Config;

/// Load configurator [`Config`] from the environment.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    region: Option<Region>,
    profile_name: Option<String>,
    endpoint_url: Option<String>,
    force_path_style: bool,
}

impl ConfigLoader {
    /// Override the region instead of resolving it from the environment.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Use the named profile from the shared config and credentials files.
    pub fn profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    /// Send requests for both services to a custom endpoint (e.g. a local emulator).
    ///
    /// Per-service endpoints can still be set with `AWS_ENDPOINT_URL_DYNAMODB` and
    /// `AWS_ENDPOINT_URL_S3`.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Address buckets by path instead of virtual host. Default is `false`.
    pub fn force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Load the default configuration
    ///
    /// If fields have been overridden during builder construction, the override values will be
    /// used. Otherwise, the default values for each field will be provided.
    pub async fn load(self) -> Config {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = self.region {
            loader = loader.region(region);
        }
        if let Some(profile_name) = self.profile_name {
            loader = loader.profile_name(profile_name);
        }
        if let Some(endpoint_url) = self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        tracing::debug!(region = ?sdk_config.region(), "loaded configuration from the environment");

        Config::builder()
            .sdk_config(sdk_config)
            .force_path_style(self.force_path_style)
            .build()
    }
}
