/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::{self, Error};

/// Maximum length of an object key in bytes
const MAX_KEY_LEN: usize = 1024;

/// Input type for writing a single object to the object store
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct PutObjectInput {
    /// The bucket to write to.
    pub bucket: String,

    /// The object key.
    pub key: String,

    /// The object contents.
    pub body: Bytes,

    /// A standard MIME type describing the format of the contents.
    pub content_type: Option<String>,

    /// Caching behavior along the request/reply chain.
    pub cache_control: Option<String>,

    /// User-defined metadata to store with the object.
    pub metadata: HashMap<String, String>,

    /// URL query encoded tag set (e.g. `key1=value1&key2=value2`).
    pub tagging: Option<String>,

    /// Storage class for the object (e.g. `STANDARD_IA`).
    pub storage_class: Option<String>,

    /// Server-side encryption algorithm (e.g. `AES256`, `aws:kms`).
    pub server_side_encryption: Option<String>,

    /// KMS key to encrypt the object with, when `server_side_encryption` is KMS based.
    pub ssekms_key_id: Option<String>,

    /// Whether to use an S3 Bucket Key for KMS based encryption.
    pub bucket_key_enabled: Option<bool>,

    /// Content encodings applied to the contents (e.g. `gzip`).
    pub content_encoding: Option<String>,

    /// Presentational information for the object.
    pub content_disposition: Option<String>,

    /// Algorithm used to compute the object's checksum (e.g. `CRC32`, `SHA256`).
    pub checksum_algorithm: Option<String>,

    /// Account expected to own the bucket.
    pub expected_bucket_owner: Option<String>,
}

impl PutObjectInput {
    /// Creates a new builder-style object to manufacture [`PutObjectInput`].
    pub fn builder() -> PutObjectInputBuilder {
        PutObjectInputBuilder::default()
    }

    /// The bucket to write to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The object contents.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// A standard MIME type describing the format of the contents.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Caching behavior along the request/reply chain.
    pub fn cache_control(&self) -> Option<&str> {
        self.cache_control.as_deref()
    }

    /// User-defined metadata to store with the object.
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// URL query encoded tag set.
    pub fn tagging(&self) -> Option<&str> {
        self.tagging.as_deref()
    }

    /// Storage class for the object.
    pub fn storage_class(&self) -> Option<&str> {
        self.storage_class.as_deref()
    }

    /// Server-side encryption algorithm.
    pub fn server_side_encryption(&self) -> Option<&str> {
        self.server_side_encryption.as_deref()
    }

    /// KMS key to encrypt the object with.
    pub fn ssekms_key_id(&self) -> Option<&str> {
        self.ssekms_key_id.as_deref()
    }

    /// Whether to use an S3 Bucket Key for KMS based encryption.
    pub fn bucket_key_enabled(&self) -> Option<bool> {
        self.bucket_key_enabled
    }

    /// Content encodings applied to the contents.
    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Presentational information for the object.
    pub fn content_disposition(&self) -> Option<&str> {
        self.content_disposition.as_deref()
    }

    /// Algorithm used to compute the object's checksum.
    pub fn checksum_algorithm(&self) -> Option<&str> {
        self.checksum_algorithm.as_deref()
    }

    /// Account expected to own the bucket.
    pub fn expected_bucket_owner(&self) -> Option<&str> {
        self.expected_bucket_owner.as_deref()
    }
}

/// A builder for [`PutObjectInput`].
///
/// This is the descriptor handed to [`Configurator::put_object`](crate::Configurator::put_object).
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutObjectInputBuilder {
    pub(crate) bucket: Option<String>,
    pub(crate) key: Option<String>,
    pub(crate) body: Bytes,
    pub(crate) content_type: Option<String>,
    pub(crate) cache_control: Option<String>,
    pub(crate) metadata: HashMap<String, String>,
    pub(crate) tagging: Option<String>,
    pub(crate) storage_class: Option<String>,
    pub(crate) server_side_encryption: Option<String>,
    pub(crate) ssekms_key_id: Option<String>,
    pub(crate) bucket_key_enabled: Option<bool>,
    pub(crate) content_encoding: Option<String>,
    pub(crate) content_disposition: Option<String>,
    pub(crate) checksum_algorithm: Option<String>,
    pub(crate) expected_bucket_owner: Option<String>,
}

impl PutObjectInputBuilder {
    /// The bucket to write to.
    ///
    /// This field is required.
    pub fn bucket(mut self, input: impl Into<String>) -> Self {
        self.bucket = Some(input.into());
        self
    }

    /// The bucket to write to.
    pub fn set_bucket(mut self, input: Option<String>) -> Self {
        self.bucket = input;
        self
    }

    /// The bucket to write to.
    pub fn get_bucket(&self) -> &Option<String> {
        &self.bucket
    }

    /// The object key.
    ///
    /// This field is required.
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.key = Some(input.into());
        self
    }

    /// The object key.
    pub fn set_key(mut self, input: Option<String>) -> Self {
        self.key = input;
        self
    }

    /// The object key.
    pub fn get_key(&self) -> &Option<String> {
        &self.key
    }

    /// The object contents.
    pub fn body(mut self, input: impl Into<Bytes>) -> Self {
        self.body = input.into();
        self
    }

    /// The object contents.
    pub fn set_body(mut self, input: Bytes) -> Self {
        self.body = input;
        self
    }

    /// The object contents.
    pub fn get_body(&self) -> &Bytes {
        &self.body
    }

    /// A standard MIME type describing the format of the contents.
    pub fn content_type(mut self, input: impl Into<String>) -> Self {
        self.content_type = Some(input.into());
        self
    }

    /// A standard MIME type describing the format of the contents.
    pub fn set_content_type(mut self, input: Option<String>) -> Self {
        self.content_type = input;
        self
    }

    /// A standard MIME type describing the format of the contents.
    pub fn get_content_type(&self) -> &Option<String> {
        &self.content_type
    }

    /// Caching behavior along the request/reply chain.
    pub fn cache_control(mut self, input: impl Into<String>) -> Self {
        self.cache_control = Some(input.into());
        self
    }

    /// Caching behavior along the request/reply chain.
    pub fn set_cache_control(mut self, input: Option<String>) -> Self {
        self.cache_control = input;
        self
    }

    /// Caching behavior along the request/reply chain.
    pub fn get_cache_control(&self) -> &Option<String> {
        &self.cache_control
    }

    /// Adds a metadata entry, replacing any previous value for the same key.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replaces all user-defined metadata.
    pub fn set_metadata(mut self, input: HashMap<String, String>) -> Self {
        self.metadata = input;
        self
    }

    /// User-defined metadata to store with the object.
    pub fn get_metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// URL query encoded tag set.
    pub fn tagging(mut self, input: impl Into<String>) -> Self {
        self.tagging = Some(input.into());
        self
    }

    /// URL query encoded tag set.
    pub fn set_tagging(mut self, input: Option<String>) -> Self {
        self.tagging = input;
        self
    }

    /// URL query encoded tag set.
    pub fn get_tagging(&self) -> &Option<String> {
        &self.tagging
    }

    /// Storage class for the object.
    pub fn storage_class(mut self, input: impl Into<String>) -> Self {
        self.storage_class = Some(input.into());
        self
    }

    /// Storage class for the object.
    pub fn set_storage_class(mut self, input: Option<String>) -> Self {
        self.storage_class = input;
        self
    }

    /// Storage class for the object.
    pub fn get_storage_class(&self) -> &Option<String> {
        &self.storage_class
    }

    /// Server-side encryption algorithm.
    pub fn server_side_encryption(mut self, input: impl Into<String>) -> Self {
        self.server_side_encryption = Some(input.into());
        self
    }

    /// Server-side encryption algorithm.
    pub fn set_server_side_encryption(mut self, input: Option<String>) -> Self {
        self.server_side_encryption = input;
        self
    }

    /// Server-side encryption algorithm.
    pub fn get_server_side_encryption(&self) -> &Option<String> {
        &self.server_side_encryption
    }

    /// KMS key to encrypt the object with.
    pub fn ssekms_key_id(mut self, input: impl Into<String>) -> Self {
        self.ssekms_key_id = Some(input.into());
        self
    }

    /// KMS key to encrypt the object with.
    pub fn set_ssekms_key_id(mut self, input: Option<String>) -> Self {
        self.ssekms_key_id = input;
        self
    }

    /// KMS key to encrypt the object with.
    pub fn get_ssekms_key_id(&self) -> &Option<String> {
        &self.ssekms_key_id
    }

    /// Whether to use an S3 Bucket Key for KMS based encryption.
    pub fn bucket_key_enabled(mut self, input: bool) -> Self {
        self.bucket_key_enabled = Some(input);
        self
    }

    /// Whether to use an S3 Bucket Key for KMS based encryption.
    pub fn set_bucket_key_enabled(mut self, input: Option<bool>) -> Self {
        self.bucket_key_enabled = input;
        self
    }

    /// Whether to use an S3 Bucket Key for KMS based encryption.
    pub fn get_bucket_key_enabled(&self) -> &Option<bool> {
        &self.bucket_key_enabled
    }

    /// Content encodings applied to the contents.
    pub fn content_encoding(mut self, input: impl Into<String>) -> Self {
        self.content_encoding = Some(input.into());
        self
    }

    /// Content encodings applied to the contents.
    pub fn set_content_encoding(mut self, input: Option<String>) -> Self {
        self.content_encoding = input;
        self
    }

    /// Content encodings applied to the contents.
    pub fn get_content_encoding(&self) -> &Option<String> {
        &self.content_encoding
    }

    /// Presentational information for the object.
    pub fn content_disposition(mut self, input: impl Into<String>) -> Self {
        self.content_disposition = Some(input.into());
        self
    }

    /// Presentational information for the object.
    pub fn set_content_disposition(mut self, input: Option<String>) -> Self {
        self.content_disposition = input;
        self
    }

    /// Presentational information for the object.
    pub fn get_content_disposition(&self) -> &Option<String> {
        &self.content_disposition
    }

    /// Algorithm used to compute the object's checksum.
    pub fn checksum_algorithm(mut self, input: impl Into<String>) -> Self {
        self.checksum_algorithm = Some(input.into());
        self
    }

    /// Algorithm used to compute the object's checksum.
    pub fn set_checksum_algorithm(mut self, input: Option<String>) -> Self {
        self.checksum_algorithm = input;
        self
    }

    /// Algorithm used to compute the object's checksum.
    pub fn get_checksum_algorithm(&self) -> &Option<String> {
        &self.checksum_algorithm
    }

    /// Account expected to own the bucket.
    pub fn expected_bucket_owner(mut self, input: impl Into<String>) -> Self {
        self.expected_bucket_owner = Some(input.into());
        self
    }

    /// Account expected to own the bucket.
    pub fn set_expected_bucket_owner(mut self, input: Option<String>) -> Self {
        self.expected_bucket_owner = input;
        self
    }

    /// Account expected to own the bucket.
    pub fn get_expected_bucket_owner(&self) -> &Option<String> {
        &self.expected_bucket_owner
    }

    /// Consumes the builder and constructs a [`PutObjectInput`].
    pub fn build(self) -> Result<PutObjectInput, Error> {
        let bucket = self
            .bucket
            .ok_or_else(|| error::configuration("bucket is required"))?;
        let key = self
            .key
            .ok_or_else(|| error::configuration("object key is required"))?;

        if key.is_empty() || key.len() > MAX_KEY_LEN {
            return Err(error::configuration(format!(
                "object key must be between 1 and {MAX_KEY_LEN} bytes long, got {}",
                key.len()
            )));
        }

        let kms = self
            .server_side_encryption
            .as_deref()
            .is_some_and(|sse| sse.starts_with("aws:kms"));
        if !kms && (self.ssekms_key_id.is_some() || self.bucket_key_enabled.is_some()) {
            return Err(error::configuration(
                "a KMS key or bucket key requires KMS based server-side encryption",
            ));
        }

        Ok(PutObjectInput {
            bucket,
            key,
            body: self.body,
            content_type: self.content_type,
            cache_control: self.cache_control,
            metadata: self.metadata,
            tagging: self.tagging,
            storage_class: self.storage_class,
            server_side_encryption: self.server_side_encryption,
            ssekms_key_id: self.ssekms_key_id,
            bucket_key_enabled: self.bucket_key_enabled,
            content_encoding: self.content_encoding,
            content_disposition: self.content_disposition,
            checksum_algorithm: self.checksum_algorithm,
            expected_bucket_owner: self.expected_bucket_owner,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_build() {
        let input = PutObjectInput::builder()
            .bucket("docs")
            .key("doc/1")
            .body(Bytes::from_static(b"hello"))
            .metadata("owner", "tests")
            .build()
            .unwrap();
        assert_eq!("docs", input.bucket());
        assert_eq!("doc/1", input.key());
        assert_eq!(&Bytes::from_static(b"hello"), input.body());
        assert_eq!(Some("tests"), input.metadata().get("owner").map(String::as_str));
    }

    #[test]
    fn test_required_fields() {
        let err = PutObjectInput::builder().key("k").build().unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let err = PutObjectInput::builder().bucket("docs").build().unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let err = PutObjectInput::builder()
            .bucket("docs")
            .key("x".repeat(MAX_KEY_LEN + 1))
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());
    }

    #[test]
    fn test_set_body() {
        let builder = PutObjectInput::builder()
            .bucket("docs")
            .key("doc/1")
            .body(Bytes::from_static(b"first"))
            .set_body(Bytes::from_static(b"second"));
        assert_eq!(&Bytes::from_static(b"second"), builder.get_body());
        assert_eq!(
            &Bytes::from_static(b"second"),
            builder.build().unwrap().body()
        );
    }

    #[test]
    fn test_kms_parameters_require_kms_encryption() {
        let object = || PutObjectInput::builder().bucket("docs").key("doc/1");

        let err = object().ssekms_key_id("alias/docs").build().unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let err = object()
            .server_side_encryption("AES256")
            .bucket_key_enabled(true)
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let input = object()
            .server_side_encryption("aws:kms")
            .ssekms_key_id("alias/docs")
            .bucket_key_enabled(true)
            .checksum_algorithm("SHA256")
            .expected_bucket_owner("111122223333")
            .build()
            .unwrap();
        assert_eq!(Some("alias/docs"), input.ssekms_key_id());
        assert_eq!(Some(true), input.bucket_key_enabled());
        assert_eq!(Some("SHA256"), input.checksum_algorithm());
        assert_eq!(Some("111122223333"), input.expected_bucket_owner());
    }
}
