/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// How a table is billed for reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingMode {
    /// Capacity is reserved up front, see [`ProvisionedThroughput`].
    Provisioned,

    /// On-demand capacity, billed per request.
    PayPerRequest,
}

impl BillingMode {
    /// The wire name of the billing mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingMode::Provisioned => "PROVISIONED",
            BillingMode::PayPerRequest => "PAY_PER_REQUEST",
        }
    }
}

impl fmt::Display for BillingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an attribute in a table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Partition key
    Hash,
    /// Sort key
    Range,
}

/// Data type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarAttributeType {
    /// String
    S,
    /// Number
    N,
    /// Binary
    B,
}

/// One element of a table's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySchemaElement {
    attribute_name: String,
    key_type: KeyType,
}

impl KeySchemaElement {
    /// Create a new key schema element
    pub fn new(attribute_name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            key_type,
        }
    }

    /// The name of the key attribute
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// The role of the key attribute
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }
}

/// Declares the data type of an attribute used in a key schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeDefinition {
    attribute_name: String,
    attribute_type: ScalarAttributeType,
}

impl AttributeDefinition {
    /// Create a new attribute definition
    pub fn new(attribute_name: impl Into<String>, attribute_type: ScalarAttributeType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            attribute_type,
        }
    }

    /// The name of the attribute
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// The data type of the attribute
    pub fn attribute_type(&self) -> ScalarAttributeType {
        self.attribute_type
    }
}

/// Reserved capacity for a table using [`BillingMode::Provisioned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProvisionedThroughput {
    read_capacity_units: u64,
    write_capacity_units: u64,
}

impl ProvisionedThroughput {
    /// Create a new throughput setting
    pub fn new(read_capacity_units: u64, write_capacity_units: u64) -> Self {
        Self {
            read_capacity_units,
            write_capacity_units,
        }
    }

    /// Consistent reads per second
    pub fn read_capacity_units(&self) -> u64 {
        self.read_capacity_units
    }

    /// Writes per second
    pub fn write_capacity_units(&self) -> u64 {
        self.write_capacity_units
    }
}

/// Storage class of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableClass {
    /// The default class
    Standard,
    /// Lower storage cost for tables that are rarely read
    StandardInfrequentAccess,
}

/// What is written to the table's stream when an item changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamViewType {
    /// Only the key attributes of the changed item
    KeysOnly,
    /// The item as it appears after the change
    NewImage,
    /// The item as it appeared before the change
    OldImage,
    /// Both the new and the old images of the item
    NewAndOldImages,
}

/// Attributes copied into a secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Projection {
    /// Only the table and index keys
    KeysOnly,
    /// Every attribute
    All,
    /// The keys plus the listed non-key attributes
    Include(Vec<String>),
}

/// Server-side encryption at rest with an AWS KMS key.
///
/// Tables without one are encrypted with an AWS owned key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SseSpecification {
    kms_master_key_id: Option<String>,
}

impl SseSpecification {
    /// Encrypt with the AWS managed key for DynamoDB
    pub fn aws_managed() -> Self {
        Self::default()
    }

    /// Encrypt with a customer managed key (key id, ARN, alias name or alias ARN)
    pub fn customer_managed(kms_master_key_id: impl Into<String>) -> Self {
        Self {
            kms_master_key_id: Some(kms_master_key_id.into()),
        }
    }

    /// The customer managed key, `None` for the AWS managed key
    pub fn kms_master_key_id(&self) -> Option<&str> {
        self.kms_master_key_id.as_deref()
    }
}

/// An index with a partition key that can differ from the table's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalSecondaryIndex {
    index_name: String,
    key_schema: Vec<KeySchemaElement>,
    projection: Projection,
    provisioned_throughput: Option<ProvisionedThroughput>,
}

impl GlobalSecondaryIndex {
    /// Create a new global secondary index
    pub fn new(
        index_name: impl Into<String>,
        key_schema: Vec<KeySchemaElement>,
        projection: Projection,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            key_schema,
            projection,
            provisioned_throughput: None,
        }
    }

    /// Reserve capacity for the index, required when the table is provisioned
    pub fn with_provisioned_throughput(mut self, throughput: ProvisionedThroughput) -> Self {
        self.provisioned_throughput = Some(throughput);
        self
    }

    /// The name of the index
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// The key of the index
    pub fn key_schema(&self) -> &[KeySchemaElement] {
        &self.key_schema
    }

    /// Attributes copied into the index
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Reserved capacity for the index
    pub fn provisioned_throughput(&self) -> Option<&ProvisionedThroughput> {
        self.provisioned_throughput.as_ref()
    }
}

/// An index that shares the table's partition key and uses a different sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalSecondaryIndex {
    index_name: String,
    key_schema: Vec<KeySchemaElement>,
    projection: Projection,
}

impl LocalSecondaryIndex {
    /// Create a new local secondary index
    pub fn new(
        index_name: impl Into<String>,
        key_schema: Vec<KeySchemaElement>,
        projection: Projection,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            key_schema,
            projection,
        }
    }

    /// The name of the index
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// The key of the index
    pub fn key_schema(&self) -> &[KeySchemaElement] {
        &self.key_schema
    }

    /// Attributes copied into the index
    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}
