/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of configurator errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A request descriptor is structurally invalid or incompatible with the intended operation
    Configuration,

    /// A client factory failed to build a client handle (e.g. no region configured)
    ClientConstruction,

    /// A value could not be encoded, or bytes could not be decoded
    Serialization,

    /// Resource not found (e.g. table, bucket)
    NotFound,

    /// Resource already exists (e.g. creating a table or bucket twice)
    AlreadyExists,

    /// The backing service rejected or failed a request
    ServiceError,

    /// Some kind of internal runtime issue (e.g. poisoned mutex)
    RuntimeError,
}

impl Error {
    /// Creates a new [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Configuration => write!(f, "invalid configuration"),
            ErrorKind::ClientConstruction => write!(f, "failed to construct client"),
            ErrorKind::Serialization => write!(f, "serialization error"),
            ErrorKind::NotFound => write!(f, "resource not found"),
            ErrorKind::AlreadyExists => write!(f, "resource already exists"),
            ErrorKind::ServiceError => write!(f, "service error"),
            ErrorKind::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::new(ErrorKind::Serialization, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::Configuration, value)
    }
}

// NOTE: `SdkError` is the same smithy type for every service crate, this covers DynamoDB too.
impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some("NotFound" | "NoSuchKey" | "NoSuchBucket" | "ResourceNotFoundException") => {
                ErrorKind::NotFound
            }
            Some("BucketAlreadyExists" | "BucketAlreadyOwnedByYou" | "ResourceInUseException") => {
                ErrorKind::AlreadyExists
            }
            _ => ErrorKind::ServiceError,
        };

        Error::new(kind, value)
    }
}

pub(crate) fn configuration<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Configuration, err)
}

pub(crate) fn client_construction<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ClientConstruction, err)
}

pub(crate) fn serialization<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Serialization, err)
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_and_source() {
        let err = configuration("table name is required");
        assert_eq!(&ErrorKind::Configuration, err.kind());
        assert_eq!("invalid configuration", err.to_string());
        assert_eq!(
            "table name is required",
            err.source().unwrap().to_string()
        );
    }

    #[test]
    fn test_json_error_is_serialization() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(&ErrorKind::Serialization, err.kind());
    }
}
