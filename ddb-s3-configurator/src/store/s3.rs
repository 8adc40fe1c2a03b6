/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::create_bucket::builders::CreateBucketFluentBuilder;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::put_object::builders::PutObjectFluentBuilder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, ChecksumAlgorithm, CreateBucketConfiguration,
    ObjectOwnership, ServerSideEncryption, StorageClass,
};
use aws_sdk_s3::Client;
use bytes::Bytes;

use super::ObjectStore;
use crate::error::{self, Error, ErrorKind};
use crate::operation::create_bucket::CreateBucketInput;
use crate::operation::put_object::PutObjectInput;

/// Buckets in this region must not send a location constraint.
const DEFAULT_LOCATION: &str = "us-east-1";

#[async_trait]
impl ObjectStore for Client {
    async fn create_bucket(&self, input: CreateBucketInput) -> Result<(), Error> {
        copy_fields_to_create_bucket_request(&input, Client::create_bucket(self))
            .send()
            .await?;
        tracing::debug!(bucket = input.bucket(), "created bucket");
        Ok(())
    }

    async fn put_object(&self, input: PutObjectInput) -> Result<(), Error> {
        tracing::debug!(
            bucket = input.bucket(),
            key = input.key(),
            len = input.body().len(),
            "put object"
        );
        copy_fields_to_put_object_request(&input, Client::put_object(self))
            .send()
            .await?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, Error> {
        tracing::debug!(bucket, key, "get object");
        let result = Client::get_object(self).bucket(bucket).key(key).send().await;
        let Some(output) = absent_on_no_such_key(result)? else {
            return Ok(None);
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(error::from_kind(ErrorKind::ServiceError))?;
        Ok(Some(body.into_bytes()))
    }
}

/// `NoSuchKey` means the object is absent, any other failure is an error.
fn absent_on_no_such_key<T, R>(
    result: Result<T, SdkError<GetObjectError, R>>,
) -> Result<Option<T>, Error>
where
    R: Send + Sync + fmt::Debug + 'static,
{
    match result {
        Ok(output) => Ok(Some(output)),
        Err(err) if err.as_service_error().is_some_and(GetObjectError::is_no_such_key) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Copy fields from `CreateBucketInput` to `CreateBucketFluentBuilder`
fn copy_fields_to_create_bucket_request(
    input: &CreateBucketInput,
    builder: CreateBucketFluentBuilder,
) -> CreateBucketFluentBuilder {
    let builder = builder
        .bucket(input.bucket())
        .set_acl(input.acl().map(BucketCannedAcl::from))
        .set_object_ownership(input.object_ownership().map(ObjectOwnership::from))
        .set_object_lock_enabled_for_bucket(input.object_lock_enabled_for_bucket())
        .set_grant_full_control(input.grant_full_control.clone())
        .set_grant_read(input.grant_read.clone())
        .set_grant_write(input.grant_write.clone())
        .set_grant_read_acp(input.grant_read_acp.clone())
        .set_grant_write_acp(input.grant_write_acp.clone());

    match input.location_constraint() {
        Some(location) if location != DEFAULT_LOCATION => builder.create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(location))
                .build(),
        ),
        _ => builder,
    }
}

/// Copy fields from `PutObjectInput` to `PutObjectFluentBuilder`
fn copy_fields_to_put_object_request(
    input: &PutObjectInput,
    builder: PutObjectFluentBuilder,
) -> PutObjectFluentBuilder {
    let metadata = (!input.metadata().is_empty()).then(|| input.metadata().clone());

    builder
        .bucket(input.bucket())
        .key(input.key())
        .body(ByteStream::from(input.body().clone()))
        .set_content_type(input.content_type.clone())
        .set_cache_control(input.cache_control.clone())
        .set_metadata(metadata)
        .set_tagging(input.tagging.clone())
        .set_storage_class(input.storage_class().map(StorageClass::from))
        .set_server_side_encryption(input.server_side_encryption().map(ServerSideEncryption::from))
        .set_ssekms_key_id(input.ssekms_key_id.clone())
        .set_bucket_key_enabled(input.bucket_key_enabled())
        .set_content_encoding(input.content_encoding.clone())
        .set_content_disposition(input.content_disposition.clone())
        .set_checksum_algorithm(input.checksum_algorithm().map(ChecksumAlgorithm::from))
        .set_expected_bucket_owner(input.expected_bucket_owner.clone())
}

#[cfg(test)]
mod test {
    use super::absent_on_no_such_key;
    use crate::error::{Error, ErrorKind};
    use crate::operation::create_bucket::CreateBucketInput;
    use crate::operation::put_object::PutObjectInput;
    use crate::store::{ObjectStore, SharedObjectStore};
    use aws_sdk_s3::error::{ErrorMetadata, SdkError};
    use aws_sdk_s3::operation::create_bucket::{CreateBucketError, CreateBucketOutput};
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::operation::put_object::PutObjectOutput;
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::{BucketAlreadyOwnedByYou, NoSuchKey};
    use aws_sdk_s3::types::{
        BucketLocationConstraint, ChecksumAlgorithm, ServerSideEncryption, StorageClass,
    };
    use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use bytes::Bytes;

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    #[tokio::test]
    async fn test_create_bucket_location_constraint() {
        let in_region = mock!(aws_sdk_s3::Client::create_bucket)
            .match_requests(|r| {
                r.bucket() == Some("docs")
                    && r.create_bucket_configuration()
                        .and_then(|c| c.location_constraint())
                        == Some(&BucketLocationConstraint::EuWest1)
                    && r.grant_read() == Some("id=111122223333")
            })
            .then_output(|| CreateBucketOutput::builder().build());

        let default_region = mock!(aws_sdk_s3::Client::create_bucket)
            .match_requests(|r| r.create_bucket_configuration().is_none())
            .then_output(|| CreateBucketOutput::builder().build());

        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::Sequential,
            &[&in_region, &default_region]
        );
        let store = SharedObjectStore::new(client);

        let input = CreateBucketInput::builder()
            .bucket("docs")
            .location_constraint("eu-west-1")
            .grant_read("id=111122223333")
            .build()
            .unwrap();
        store.create_bucket(input).await.unwrap();

        let input = CreateBucketInput::builder()
            .bucket("docs")
            .location_constraint("us-east-1")
            .build()
            .unwrap();
        store.create_bucket(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_put_object_copies_fields() {
        let put_object = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|r| {
                r.bucket() == Some("docs")
                    && r.key() == Some("doc-1")
                    && r.content_type() == Some("application/octet-stream")
                    && r.metadata()
                        .and_then(|m| m.get("owner"))
                        .map(String::as_str)
                        == Some("tests")
                    && r.storage_class() == Some(&StorageClass::StandardIa)
                    && r.server_side_encryption() == Some(&ServerSideEncryption::AwsKms)
                    && r.ssekms_key_id() == Some("alias/docs")
                    && r.bucket_key_enabled() == Some(true)
                    && r.checksum_algorithm() == Some(&ChecksumAlgorithm::Sha256)
                    && r.expected_bucket_owner() == Some("111122223333")
                    && r.tagging().is_none()
            })
            .then_output(|| PutObjectOutput::builder().build());

        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);
        let store = SharedObjectStore::new(client);

        let input = PutObjectInput::builder()
            .bucket("docs")
            .key("doc-1")
            .body(Bytes::from_static(b"contents"))
            .content_type("application/octet-stream")
            .metadata("owner", "tests")
            .storage_class("STANDARD_IA")
            .server_side_encryption("aws:kms")
            .ssekms_key_id("alias/docs")
            .bucket_key_enabled(true)
            .checksum_algorithm("SHA256")
            .expected_bucket_owner("111122223333")
            .build()
            .unwrap();
        store.put_object(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_object() {
        let found = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|r| r.key() == Some("doc-1"))
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(b"contents"))
                    .build()
            });

        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&found]);
        let store = SharedObjectStore::new(client);

        let body = store.get_object("docs", "doc-1").await.unwrap();
        assert_eq!(Some(Bytes::from_static(b"contents")), body);
    }

    #[test]
    fn test_no_such_key_is_absent() {
        let found: Result<u8, SdkError<GetObjectError, HttpResponse>> = Ok(1);
        assert_eq!(Some(1), absent_on_no_such_key(found).unwrap());

        let missing: Result<u8, _> = Err(SdkError::service_error(
            GetObjectError::NoSuchKey(NoSuchKey::builder().build()),
            response(404),
        ));
        assert_eq!(None, absent_on_no_such_key(missing).unwrap());

        let no_bucket: Result<u8, _> = Err(SdkError::service_error(
            GetObjectError::generic(ErrorMetadata::builder().code("NoSuchBucket").build()),
            response(404),
        ));
        let err = absent_on_no_such_key(no_bucket).unwrap_err();
        assert_eq!(&ErrorKind::NotFound, err.kind());

        let denied: Result<u8, _> = Err(SdkError::service_error(
            GetObjectError::generic(ErrorMetadata::builder().code("AccessDenied").build()),
            response(403),
        ));
        let err = absent_on_no_such_key(denied).unwrap_err();
        assert_eq!(&ErrorKind::ServiceError, err.kind());
    }

    #[test]
    fn test_bucket_exists_error_code() {
        let owned = SdkError::service_error(
            CreateBucketError::BucketAlreadyOwnedByYou(
                BucketAlreadyOwnedByYou::builder()
                    .meta(ErrorMetadata::builder().code("BucketAlreadyOwnedByYou").build())
                    .build(),
            ),
            response(409),
        );
        assert_eq!(&ErrorKind::AlreadyExists, Error::from(owned).kind());
    }
}
