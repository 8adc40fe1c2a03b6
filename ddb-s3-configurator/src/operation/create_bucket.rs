/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{self, Error};

const MIN_BUCKET_NAME_LEN: usize = 3;
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Input type for creating a bucket in the object store
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct CreateBucketInput {
    /// The name of the bucket to create.
    pub bucket: String,

    /// The region to create the bucket in. `None` uses the client's region.
    pub location_constraint: Option<String>,

    /// The canned ACL to apply to the bucket (e.g. `private`).
    pub acl: Option<String>,

    /// Object ownership setting (e.g. `BucketOwnerEnforced`).
    pub object_ownership: Option<String>,

    /// Whether S3 Object Lock is enabled for the new bucket.
    pub object_lock_enabled_for_bucket: Option<bool>,

    /// Grantees with read, write and ACL permissions on the bucket. Mutually exclusive with `acl`.
    pub grant_full_control: Option<String>,

    /// Grantees allowed to list the objects in the bucket. Mutually exclusive with `acl`.
    pub grant_read: Option<String>,

    /// Grantees allowed to create objects in the bucket. Mutually exclusive with `acl`.
    pub grant_write: Option<String>,

    /// Grantees allowed to read the bucket ACL. Mutually exclusive with `acl`.
    pub grant_read_acp: Option<String>,

    /// Grantees allowed to write the bucket ACL. Mutually exclusive with `acl`.
    pub grant_write_acp: Option<String>,
}

impl CreateBucketInput {
    /// Creates a new builder-style object to manufacture [`CreateBucketInput`].
    pub fn builder() -> CreateBucketInputBuilder {
        CreateBucketInputBuilder::default()
    }

    /// The name of the bucket to create.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The region to create the bucket in.
    pub fn location_constraint(&self) -> Option<&str> {
        self.location_constraint.as_deref()
    }

    /// The canned ACL to apply to the bucket.
    pub fn acl(&self) -> Option<&str> {
        self.acl.as_deref()
    }

    /// Object ownership setting.
    pub fn object_ownership(&self) -> Option<&str> {
        self.object_ownership.as_deref()
    }

    /// Whether S3 Object Lock is enabled for the new bucket.
    pub fn object_lock_enabled_for_bucket(&self) -> Option<bool> {
        self.object_lock_enabled_for_bucket
    }

    /// Grantees with read, write and ACL permissions on the bucket.
    pub fn grant_full_control(&self) -> Option<&str> {
        self.grant_full_control.as_deref()
    }

    /// Grantees allowed to list the objects in the bucket.
    pub fn grant_read(&self) -> Option<&str> {
        self.grant_read.as_deref()
    }

    /// Grantees allowed to create objects in the bucket.
    pub fn grant_write(&self) -> Option<&str> {
        self.grant_write.as_deref()
    }

    /// Grantees allowed to read the bucket ACL.
    pub fn grant_read_acp(&self) -> Option<&str> {
        self.grant_read_acp.as_deref()
    }

    /// Grantees allowed to write the bucket ACL.
    pub fn grant_write_acp(&self) -> Option<&str> {
        self.grant_write_acp.as_deref()
    }
}

/// A builder for [`CreateBucketInput`].
///
/// This is the descriptor handed to [`Configurator::create_bucket`](crate::Configurator::create_bucket).
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateBucketInputBuilder {
    pub(crate) bucket: Option<String>,
    pub(crate) location_constraint: Option<String>,
    pub(crate) acl: Option<String>,
    pub(crate) object_ownership: Option<String>,
    pub(crate) object_lock_enabled_for_bucket: Option<bool>,
    pub(crate) grant_full_control: Option<String>,
    pub(crate) grant_read: Option<String>,
    pub(crate) grant_write: Option<String>,
    pub(crate) grant_read_acp: Option<String>,
    pub(crate) grant_write_acp: Option<String>,
}

impl CreateBucketInputBuilder {
    /// The name of the bucket to create.
    ///
    /// This field is required.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// The name of the bucket to create.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.bucket = input;
        self
    }

    /// The name of the bucket to create.
    pub fn get_bucket(&self) -> &Option<String> {
        &self.bucket
    }

    /// The region to create the bucket in.
    pub fn location_constraint(mut self, input: impl Into<String>) -> Self {
        self.location_constraint = Some(input.into());
        self
    }

    /// The region to create the bucket in.
    pub fn set_location_constraint(mut self, input: Option<String>) -> Self {
        self.location_constraint = input;
        self
    }

    /// The region to create the bucket in.
    pub fn get_location_constraint(&self) -> &Option<String> {
        &self.location_constraint
    }

    /// The canned ACL to apply to the bucket.
    pub fn acl(mut self, input: impl Into<String>) -> Self {
        self.acl = Some(input.into());
        self
    }

    /// The canned ACL to apply to the bucket.
    pub fn set_acl(mut self, input: Option<String>) -> Self {
        self.acl = input;
        self
    }

    /// The canned ACL to apply to the bucket.
    pub fn get_acl(&self) -> &Option<String> {
        &self.acl
    }

    /// Object ownership setting.
    pub fn object_ownership(mut self, input: impl Into<String>) -> Self {
        self.object_ownership = Some(input.into());
        self
    }

    /// Object ownership setting.
    pub fn set_object_ownership(mut self, input: Option<String>) -> Self {
        self.object_ownership = input;
        self
    }

    /// Object ownership setting.
    pub fn get_object_ownership(&self) -> &Option<String> {
        &self.object_ownership
    }

    /// Whether S3 Object Lock is enabled for the new bucket.
    pub fn object_lock_enabled_for_bucket(mut self, input: bool) -> Self {
        self.object_lock_enabled_for_bucket = Some(input);
        self
    }

    /// Whether S3 Object Lock is enabled for the new bucket.
    pub fn set_object_lock_enabled_for_bucket(mut self, input: Option<bool>) -> Self {
        self.object_lock_enabled_for_bucket = input;
        self
    }

    /// Whether S3 Object Lock is enabled for the new bucket.
    pub fn get_object_lock_enabled_for_bucket(&self) -> &Option<bool> {
        &self.object_lock_enabled_for_bucket
    }

    /// Grantees with read, write and ACL permissions on the bucket.
    pub fn grant_full_control(mut self, input: impl Into<String>) -> Self {
        self.grant_full_control = Some(input.into());
        self
    }

    /// Grantees with read, write and ACL permissions on the bucket.
    pub fn set_grant_full_control(mut self, input: Option<String>) -> Self {
        self.grant_full_control = input;
        self
    }

    /// Grantees with read, write and ACL permissions on the bucket.
    pub fn get_grant_full_control(&self) -> &Option<String> {
        &self.grant_full_control
    }

    /// Grantees allowed to list the objects in the bucket.
    pub fn grant_read(mut self, input: impl Into<String>) -> Self {
        self.grant_read = Some(input.into());
        self
    }

    /// Grantees allowed to list the objects in the bucket.
    pub fn set_grant_read(mut self, input: Option<String>) -> Self {
        self.grant_read = input;
        self
    }

    /// Grantees allowed to list the objects in the bucket.
    pub fn get_grant_read(&self) -> &Option<String> {
        &self.grant_read
    }

    /// Grantees allowed to create objects in the bucket.
    pub fn grant_write(mut self, input: impl Into<String>) -> Self {
        self.grant_write = Some(input.into());
        self
    }

    /// Grantees allowed to create objects in the bucket.
    pub fn set_grant_write(mut self, input: Option<String>) -> Self {
        self.grant_write = input;
        self
    }

    /// Grantees allowed to create objects in the bucket.
    pub fn get_grant_write(&self) -> &Option<String> {
        &self.grant_write
    }

    /// Grantees allowed to read the bucket ACL.
    pub fn grant_read_acp(mut self, input: impl Into<String>) -> Self {
        self.grant_read_acp = Some(input.into());
        self
    }

    /// Grantees allowed to read the bucket ACL.
    pub fn set_grant_read_acp(mut self, input: Option<String>) -> Self {
        self.grant_read_acp = input;
        self
    }

    /// Grantees allowed to read the bucket ACL.
    pub fn get_grant_read_acp(&self) -> &Option<String> {
        &self.grant_read_acp
    }

    /// Grantees allowed to write the bucket ACL.
    pub fn grant_write_acp(mut self, input: impl Into<String>) -> Self {
        self.grant_write_acp = Some(input.into());
        self
    }

    /// Grantees allowed to write the bucket ACL.
    pub fn set_grant_write_acp(mut self, input: Option<String>) -> Self {
        self.grant_write_acp = input;
        self
    }

    /// Grantees allowed to write the bucket ACL.
    pub fn get_grant_write_acp(&self) -> &Option<String> {
        &self.grant_write_acp
    }

    /// Consumes the builder and constructs a [`CreateBucketInput`].
    pub fn build(self) -> Result<CreateBucketInput, Error> {
        let bucket = self
            .bucket
            .ok_or_else(|| error::configuration("bucket name is required"))?;
        validate_bucket_name(&bucket)?;

        let has_grants = [
            &self.grant_full_control,
            &self.grant_read,
            &self.grant_write,
            &self.grant_read_acp,
            &self.grant_write_acp,
        ]
        .iter()
        .any(|grant| grant.is_some());
        if has_grants && self.acl.is_some() {
            return Err(error::configuration(
                "a canned ACL cannot be combined with explicit grants",
            ));
        }

        Ok(CreateBucketInput {
            bucket,
            location_constraint: self.location_constraint,
            acl: self.acl,
            object_ownership: self.object_ownership,
            object_lock_enabled_for_bucket: self.object_lock_enabled_for_bucket,
            grant_full_control: self.grant_full_control,
            grant_read: self.grant_read,
            grant_write: self.grant_write,
            grant_read_acp: self.grant_read_acp,
            grant_write_acp: self.grant_write_acp,
        })
    }
}

/// General purpose bucket naming rules, see
/// <https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html>
fn validate_bucket_name(name: &str) -> Result<(), Error> {
    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&name.len()) {
        return Err(error::configuration(format!(
            "bucket name `{name}` must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        )));
    }

    let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.';
    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

    if !name.chars().all(valid_char) {
        return Err(error::configuration(format!(
            "bucket name `{name}` may only contain lowercase letters, digits, '.' and '-'"
        )));
    }

    let starts_ok = name.chars().next().is_some_and(alnum);
    let ends_ok = name.chars().last().is_some_and(alnum);
    if !starts_ok || !ends_ok {
        return Err(error::configuration(format!(
            "bucket name `{name}` must begin and end with a letter or digit"
        )));
    }

    if name.contains("..") {
        return Err(error::configuration(format!(
            "bucket name `{name}` must not contain two adjacent periods"
        )));
    }

    Ok(())
}
