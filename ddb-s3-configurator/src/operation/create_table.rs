/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::BTreeMap;

use crate::error::{self, Error};
use crate::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType,
    LocalSecondaryIndex, Projection, ProvisionedThroughput, ScalarAttributeType, SseSpecification,
    StreamViewType, TableClass,
};

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 255;
const MAX_GLOBAL_SECONDARY_INDEXES: usize = 20;
const MAX_LOCAL_SECONDARY_INDEXES: usize = 5;

/// Input type for creating a table in the table store
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct CreateTableInput {
    /// The name of the table to create.
    pub table_name: String,

    /// The primary key of the table.
    pub key_schema: Vec<KeySchemaElement>,

    /// Data types of the attributes named in the key schema.
    pub attribute_definitions: Vec<AttributeDefinition>,

    /// How reads and writes are billed. `None` leaves the store's default in place.
    pub billing_mode: Option<BillingMode>,

    /// Reserved capacity, required when billing mode is provisioned.
    pub provisioned_throughput: Option<ProvisionedThroughput>,

    /// Tags to attach to the table.
    pub tags: BTreeMap<String, String>,

    /// Whether the table is protected from deletion.
    pub deletion_protection_enabled: Option<bool>,

    /// Global secondary indexes to create with the table.
    pub global_secondary_indexes: Vec<GlobalSecondaryIndex>,

    /// Local secondary indexes to create with the table.
    pub local_secondary_indexes: Vec<LocalSecondaryIndex>,

    /// Storage class of the table. `None` is the standard class.
    pub table_class: Option<TableClass>,

    /// Enables the table's stream with the given view type.
    pub stream_view_type: Option<StreamViewType>,

    /// Encryption at rest with a KMS key. `None` uses an AWS owned key.
    pub sse_specification: Option<SseSpecification>,
}

impl CreateTableInput {
    /// Creates a new builder-style object to manufacture [`CreateTableInput`].
    pub fn builder() -> CreateTableInputBuilder {
        CreateTableInputBuilder::default()
    }

    /// The name of the table to create.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The primary key of the table.
    pub fn key_schema(&self) -> &[KeySchemaElement] {
        &self.key_schema
    }

    /// Data types of the attributes named in the key schema.
    pub fn attribute_definitions(&self) -> &[AttributeDefinition] {
        &self.attribute_definitions
    }

    /// How reads and writes are billed.
    pub fn billing_mode(&self) -> Option<BillingMode> {
        self.billing_mode
    }

    /// Reserved capacity for provisioned tables.
    pub fn provisioned_throughput(&self) -> Option<&ProvisionedThroughput> {
        self.provisioned_throughput.as_ref()
    }

    /// Tags to attach to the table.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Whether the table is protected from deletion.
    pub fn deletion_protection_enabled(&self) -> Option<bool> {
        self.deletion_protection_enabled
    }

    /// Global secondary indexes to create with the table.
    pub fn global_secondary_indexes(&self) -> &[GlobalSecondaryIndex] {
        &self.global_secondary_indexes
    }

    /// Local secondary indexes to create with the table.
    pub fn local_secondary_indexes(&self) -> &[LocalSecondaryIndex] {
        &self.local_secondary_indexes
    }

    /// Storage class of the table.
    pub fn table_class(&self) -> Option<TableClass> {
        self.table_class
    }

    /// View type of the table's stream, `None` when the stream is disabled.
    pub fn stream_view_type(&self) -> Option<StreamViewType> {
        self.stream_view_type
    }

    /// Encryption at rest with a KMS key.
    pub fn sse_specification(&self) -> Option<&SseSpecification> {
        self.sse_specification.as_ref()
    }
}

/// A builder for [`CreateTableInput`].
///
/// This is the descriptor handed to [`Configurator::create_table`](crate::Configurator::create_table).
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateTableInputBuilder {
    pub(crate) table_name: Option<String>,
    pub(crate) key_schema: Vec<KeySchemaElement>,
    pub(crate) attribute_definitions: Vec<AttributeDefinition>,
    pub(crate) billing_mode: Option<BillingMode>,
    pub(crate) provisioned_throughput: Option<ProvisionedThroughput>,
    pub(crate) tags: BTreeMap<String, String>,
    pub(crate) deletion_protection_enabled: Option<bool>,
    pub(crate) global_secondary_indexes: Vec<GlobalSecondaryIndex>,
    pub(crate) local_secondary_indexes: Vec<LocalSecondaryIndex>,
    pub(crate) table_class: Option<TableClass>,
    pub(crate) stream_view_type: Option<StreamViewType>,
    pub(crate) sse_specification: Option<SseSpecification>,
}

impl CreateTableInputBuilder {
    /// The name of the table to create.
    ///
    /// This field is required.
    pub fn table_name(mut self, input: impl Into<String>) -> Self {
        self.table_name = Some(input.into());
        self
    }

    /// The name of the table to create.
    pub fn set_table_name(mut self, input: Option<String>) -> Self {
        self.table_name = input;
        self
    }

    /// The name of the table to create.
    pub fn get_table_name(&self) -> &Option<String> {
        &self.table_name
    }

    /// Appends an element to the key schema.
    pub fn key_schema(mut self, input: KeySchemaElement) -> Self {
        self.key_schema.push(input);
        self
    }

    /// Replaces the key schema.
    pub fn set_key_schema(mut self, input: Vec<KeySchemaElement>) -> Self {
        self.key_schema = input;
        self
    }

    /// The key schema.
    pub fn get_key_schema(&self) -> &[KeySchemaElement] {
        &self.key_schema
    }

    /// Appends an attribute definition.
    pub fn attribute_definitions(mut self, input: AttributeDefinition) -> Self {
        self.attribute_definitions.push(input);
        self
    }

    /// Replaces the attribute definitions.
    pub fn set_attribute_definitions(mut self, input: Vec<AttributeDefinition>) -> Self {
        self.attribute_definitions = input;
        self
    }

    /// The attribute definitions.
    pub fn get_attribute_definitions(&self) -> &[AttributeDefinition] {
        &self.attribute_definitions
    }

    /// Declares `name` as the partition key of the table with the given type.
    ///
    /// Shorthand for adding both the key schema element and its attribute definition.
    pub fn hash_key(self, name: impl Into<String>, attribute_type: ScalarAttributeType) -> Self {
        let name = name.into();
        self.key_schema(KeySchemaElement::new(name.clone(), KeyType::Hash))
            .attribute_definitions(AttributeDefinition::new(name, attribute_type))
    }

    /// Declares `name` as the sort key of the table with the given type.
    pub fn range_key(self, name: impl Into<String>, attribute_type: ScalarAttributeType) -> Self {
        let name = name.into();
        self.key_schema(KeySchemaElement::new(name.clone(), KeyType::Range))
            .attribute_definitions(AttributeDefinition::new(name, attribute_type))
    }

    /// How reads and writes are billed.
    pub fn billing_mode(mut self, input: BillingMode) -> Self {
        self.billing_mode = Some(input);
        self
    }

    /// How reads and writes are billed.
    pub fn set_billing_mode(mut self, input: Option<BillingMode>) -> Self {
        self.billing_mode = input;
        self
    }

    /// How reads and writes are billed.
    pub fn get_billing_mode(&self) -> &Option<BillingMode> {
        &self.billing_mode
    }

    /// Reserved capacity for provisioned tables.
    pub fn provisioned_throughput(mut self, input: ProvisionedThroughput) -> Self {
        self.provisioned_throughput = Some(input);
        self
    }

    /// Reserved capacity for provisioned tables.
    pub fn set_provisioned_throughput(mut self, input: Option<ProvisionedThroughput>) -> Self {
        self.provisioned_throughput = input;
        self
    }

    /// Reserved capacity for provisioned tables.
    pub fn get_provisioned_throughput(&self) -> &Option<ProvisionedThroughput> {
        &self.provisioned_throughput
    }

    /// Adds a tag, replacing any previous value for the same key.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Replaces all tags.
    pub fn set_tags(mut self, input: BTreeMap<String, String>) -> Self {
        self.tags = input;
        self
    }

    /// Tags to attach to the table.
    pub fn get_tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Whether the table is protected from deletion.
    pub fn deletion_protection_enabled(mut self, input: bool) -> Self {
        self.deletion_protection_enabled = Some(input);
        self
    }

    /// Whether the table is protected from deletion.
    pub fn set_deletion_protection_enabled(mut self, input: Option<bool>) -> Self {
        self.deletion_protection_enabled = input;
        self
    }

    /// Whether the table is protected from deletion.
    pub fn get_deletion_protection_enabled(&self) -> &Option<bool> {
        &self.deletion_protection_enabled
    }

    /// Appends a global secondary index.
    pub fn global_secondary_index(mut self, input: GlobalSecondaryIndex) -> Self {
        self.global_secondary_indexes.push(input);
        self
    }

    /// Replaces the global secondary indexes.
    pub fn set_global_secondary_indexes(mut self, input: Vec<GlobalSecondaryIndex>) -> Self {
        self.global_secondary_indexes = input;
        self
    }

    /// The global secondary indexes.
    pub fn get_global_secondary_indexes(&self) -> &[GlobalSecondaryIndex] {
        &self.global_secondary_indexes
    }

    /// Appends a local secondary index.
    pub fn local_secondary_index(mut self, input: LocalSecondaryIndex) -> Self {
        self.local_secondary_indexes.push(input);
        self
    }

    /// Replaces the local secondary indexes.
    pub fn set_local_secondary_indexes(mut self, input: Vec<LocalSecondaryIndex>) -> Self {
        self.local_secondary_indexes = input;
        self
    }

    /// The local secondary indexes.
    pub fn get_local_secondary_indexes(&self) -> &[LocalSecondaryIndex] {
        &self.local_secondary_indexes
    }

    /// Storage class of the table.
    pub fn table_class(mut self, input: TableClass) -> Self {
        self.table_class = Some(input);
        self
    }

    /// Storage class of the table.
    pub fn set_table_class(mut self, input: Option<TableClass>) -> Self {
        self.table_class = input;
        self
    }

    /// Storage class of the table.
    pub fn get_table_class(&self) -> &Option<TableClass> {
        &self.table_class
    }

    /// Enables the table's stream with the given view type.
    pub fn stream_view_type(mut self, input: StreamViewType) -> Self {
        self.stream_view_type = Some(input);
        self
    }

    /// Enables the table's stream with the given view type, or disables it with `None`.
    pub fn set_stream_view_type(mut self, input: Option<StreamViewType>) -> Self {
        self.stream_view_type = input;
        self
    }

    /// View type of the table's stream.
    pub fn get_stream_view_type(&self) -> &Option<StreamViewType> {
        &self.stream_view_type
    }

    /// Encryption at rest with a KMS key.
    pub fn sse_specification(mut self, input: SseSpecification) -> Self {
        self.sse_specification = Some(input);
        self
    }

    /// Encryption at rest with a KMS key.
    pub fn set_sse_specification(mut self, input: Option<SseSpecification>) -> Self {
        self.sse_specification = input;
        self
    }

    /// Encryption at rest with a KMS key.
    pub fn get_sse_specification(&self) -> &Option<SseSpecification> {
        &self.sse_specification
    }

    /// Consumes the builder and constructs a [`CreateTableInput`].
    ///
    /// Fails with [`ErrorKind::Configuration`](crate::error::ErrorKind::Configuration) when the
    /// descriptor could not describe a valid table.
    pub fn build(self) -> Result<CreateTableInput, Error> {
        let table_name = self
            .table_name
            .ok_or_else(|| error::configuration("table name is required"))?;
        validate_name("table", &table_name)?;

        validate_key_schema("table", &self.key_schema, &self.attribute_definitions)?;
        validate_throughput("table", self.billing_mode, self.provisioned_throughput.as_ref())?;
        validate_indexes(
            &self.key_schema,
            &self.attribute_definitions,
            self.billing_mode,
            &self.global_secondary_indexes,
            &self.local_secondary_indexes,
        )?;
        validate_attribute_definitions(
            &self.attribute_definitions,
            &self.key_schema,
            &self.global_secondary_indexes,
            &self.local_secondary_indexes,
        )?;

        Ok(CreateTableInput {
            table_name,
            key_schema: self.key_schema,
            attribute_definitions: self.attribute_definitions,
            billing_mode: self.billing_mode,
            provisioned_throughput: self.provisioned_throughput,
            tags: self.tags,
            deletion_protection_enabled: self.deletion_protection_enabled,
            global_secondary_indexes: self.global_secondary_indexes,
            local_secondary_indexes: self.local_secondary_indexes,
            table_class: self.table_class,
            stream_view_type: self.stream_view_type,
            sse_specification: self.sse_specification,
        })
    }
}

/// Table and index naming rules, see
/// <https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/HowItWorks.NamingRulesDataTypes.html>
fn validate_name(what: &str, name: &str) -> Result<(), Error> {
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.len()) {
        return Err(error::configuration(format!(
            "{what} name `{name}` must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters long"
        )));
    }

    let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
    if !name.chars().all(valid_char) {
        return Err(error::configuration(format!(
            "{what} name `{name}` may only contain letters, digits, '_', '-' and '.'"
        )));
    }

    Ok(())
}

fn validate_key_schema(
    what: &str,
    key_schema: &[KeySchemaElement],
    attribute_definitions: &[AttributeDefinition],
) -> Result<(), Error> {
    let hash_keys = key_schema
        .iter()
        .filter(|k| k.key_type() == KeyType::Hash)
        .count();
    let range_keys = key_schema.len() - hash_keys;

    if hash_keys != 1 {
        return Err(error::configuration(format!(
            "{what} key schema must contain exactly one hash key, found {hash_keys}"
        )));
    }
    if range_keys > 1 {
        return Err(error::configuration(format!(
            "{what} key schema may contain at most one range key, found {range_keys}"
        )));
    }

    for element in key_schema {
        let defined = attribute_definitions
            .iter()
            .any(|def| def.attribute_name() == element.attribute_name());
        if !defined {
            return Err(error::configuration(format!(
                "key attribute `{}` has no attribute definition",
                element.attribute_name()
            )));
        }
    }

    Ok(())
}

fn validate_throughput(
    what: &str,
    billing_mode: Option<BillingMode>,
    throughput: Option<&ProvisionedThroughput>,
) -> Result<(), Error> {
    match (billing_mode, throughput) {
        (Some(BillingMode::Provisioned), None) => Err(error::configuration(format!(
            "provisioned billing mode requires provisioned throughput for {what}"
        ))),
        (Some(BillingMode::PayPerRequest), Some(_)) => Err(error::configuration(format!(
            "provisioned throughput cannot be set for {what} with pay-per-request billing mode"
        ))),
        _ => Ok(()),
    }
}

fn validate_projection(index_name: &str, projection: &Projection) -> Result<(), Error> {
    match projection {
        Projection::Include(attributes) if attributes.is_empty() => {
            Err(error::configuration(format!(
                "index `{index_name}` includes no non-key attributes"
            )))
        }
        _ => Ok(()),
    }
}

fn hash_key(key_schema: &[KeySchemaElement]) -> Option<&str> {
    key_schema
        .iter()
        .find(|k| k.key_type() == KeyType::Hash)
        .map(KeySchemaElement::attribute_name)
}

fn validate_indexes(
    table_key_schema: &[KeySchemaElement],
    attribute_definitions: &[AttributeDefinition],
    billing_mode: Option<BillingMode>,
    global: &[GlobalSecondaryIndex],
    local: &[LocalSecondaryIndex],
) -> Result<(), Error> {
    if global.len() > MAX_GLOBAL_SECONDARY_INDEXES {
        return Err(error::configuration(format!(
            "at most {MAX_GLOBAL_SECONDARY_INDEXES} global secondary indexes are allowed, found {}",
            global.len()
        )));
    }
    if local.len() > MAX_LOCAL_SECONDARY_INDEXES {
        return Err(error::configuration(format!(
            "at most {MAX_LOCAL_SECONDARY_INDEXES} local secondary indexes are allowed, found {}",
            local.len()
        )));
    }

    for index in global {
        let what = format!("index `{}`", index.index_name());
        validate_name("index", index.index_name())?;
        validate_key_schema(&what, index.key_schema(), attribute_definitions)?;
        validate_projection(index.index_name(), index.projection())?;
        validate_throughput(&what, billing_mode, index.provisioned_throughput())?;
    }

    for index in local {
        let what = format!("index `{}`", index.index_name());
        validate_name("index", index.index_name())?;
        validate_key_schema(&what, index.key_schema(), attribute_definitions)?;
        validate_projection(index.index_name(), index.projection())?;

        if hash_key(index.key_schema()) != hash_key(table_key_schema) {
            return Err(error::configuration(format!(
                "local {what} must use the table's hash key"
            )));
        }
        if index.key_schema().len() != 2 {
            return Err(error::configuration(format!(
                "local {what} requires a range key"
            )));
        }
    }

    let mut names: Vec<&str> = global
        .iter()
        .map(GlobalSecondaryIndex::index_name)
        .chain(local.iter().map(LocalSecondaryIndex::index_name))
        .collect();
    names.sort_unstable();
    if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(error::configuration(format!(
            "index name `{}` is used more than once",
            pair[0]
        )));
    }

    Ok(())
}

/// Every definition must name a key attribute of the table or of one of its indexes.
fn validate_attribute_definitions(
    attribute_definitions: &[AttributeDefinition],
    table_key_schema: &[KeySchemaElement],
    global: &[GlobalSecondaryIndex],
    local: &[LocalSecondaryIndex],
) -> Result<(), Error> {
    let key_attributes: Vec<&str> = table_key_schema
        .iter()
        .chain(global.iter().flat_map(GlobalSecondaryIndex::key_schema))
        .chain(local.iter().flat_map(LocalSecondaryIndex::key_schema))
        .map(KeySchemaElement::attribute_name)
        .collect();

    for (i, def) in attribute_definitions.iter().enumerate() {
        let name = def.attribute_name();
        if attribute_definitions[..i]
            .iter()
            .any(|d| d.attribute_name() == name)
        {
            return Err(error::configuration(format!(
                "attribute `{name}` is defined more than once"
            )));
        }
        if !key_attributes.contains(&name) {
            return Err(error::configuration(format!(
                "attribute `{name}` is defined but not used by any key schema"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    fn orders() -> CreateTableInputBuilder {
        CreateTableInput::builder()
            .table_name("orders")
            .hash_key("key", ScalarAttributeType::S)
    }

    #[test]
    fn test_build_minimal() {
        let input = orders().build().unwrap();
        assert_eq!("orders", input.table_name());
        assert_eq!(1, input.key_schema().len());
        assert_eq!(KeyType::Hash, input.key_schema()[0].key_type());
        assert_eq!(None, input.billing_mode());
    }

    #[test]
    fn test_missing_table_name() {
        let err = CreateTableInput::builder()
            .hash_key("key", ScalarAttributeType::S)
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let long = "t".repeat(MAX_NAME_LEN + 1);
        for name in ["", "a", "ab", "bad name!", "orders/2024", long.as_str()] {
            let err = orders().table_name(name).build().unwrap_err();
            assert_eq!(&ErrorKind::Configuration, err.kind(), "name: {name}");
        }

        for name in ["abc", "Orders_2024.v-1", "t".repeat(MAX_NAME_LEN).as_str()] {
            let input = orders().table_name(name).build().unwrap();
            assert_eq!(name, input.table_name());
        }
    }

    #[test]
    fn test_key_schema_validation() {
        let no_key = CreateTableInput::builder().table_name("orders").build();
        assert_eq!(&ErrorKind::Configuration, no_key.unwrap_err().kind());

        let two_hash = orders().hash_key("other", ScalarAttributeType::N).build();
        assert_eq!(&ErrorKind::Configuration, two_hash.unwrap_err().kind());

        let undefined = CreateTableInput::builder()
            .table_name("orders")
            .key_schema(KeySchemaElement::new("key", KeyType::Hash))
            .build();
        assert_eq!(&ErrorKind::Configuration, undefined.unwrap_err().kind());

        let unused = orders()
            .attribute_definitions(AttributeDefinition::new("extra", ScalarAttributeType::S))
            .build();
        assert_eq!(&ErrorKind::Configuration, unused.unwrap_err().kind());

        let duplicate = orders()
            .attribute_definitions(AttributeDefinition::new("key", ScalarAttributeType::S))
            .build();
        assert_eq!(&ErrorKind::Configuration, duplicate.unwrap_err().kind());

        let composite = orders()
            .range_key("sort", ScalarAttributeType::N)
            .build()
            .unwrap();
        assert_eq!(2, composite.key_schema().len());
    }

    fn by_status() -> GlobalSecondaryIndex {
        GlobalSecondaryIndex::new(
            "by-status",
            vec![KeySchemaElement::new("status", KeyType::Hash)],
            Projection::KeysOnly,
        )
    }

    #[test]
    fn test_secondary_indexes() {
        let status = AttributeDefinition::new("status", ScalarAttributeType::S);
        let created = AttributeDefinition::new("created", ScalarAttributeType::N);
        let by_created = LocalSecondaryIndex::new(
            "by-created",
            vec![
                KeySchemaElement::new("key", KeyType::Hash),
                KeySchemaElement::new("created", KeyType::Range),
            ],
            Projection::Include(vec!["total".to_owned()]),
        );

        let input = orders()
            .attribute_definitions(status.clone())
            .attribute_definitions(created.clone())
            .billing_mode(BillingMode::PayPerRequest)
            .global_secondary_index(by_status())
            .local_secondary_index(by_created.clone())
            .build()
            .unwrap();
        assert_eq!(1, input.global_secondary_indexes().len());
        assert_eq!("by-created", input.local_secondary_indexes()[0].index_name());

        // index attributes must be defined
        let err = orders().global_secondary_index(by_status()).build().unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        // provisioned tables need throughput on every global index
        let err = orders()
            .attribute_definitions(status.clone())
            .billing_mode(BillingMode::Provisioned)
            .provisioned_throughput(ProvisionedThroughput::new(5, 5))
            .global_secondary_index(by_status())
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let input = orders()
            .attribute_definitions(status.clone())
            .billing_mode(BillingMode::Provisioned)
            .provisioned_throughput(ProvisionedThroughput::new(5, 5))
            .global_secondary_index(
                by_status().with_provisioned_throughput(ProvisionedThroughput::new(1, 1)),
            )
            .build()
            .unwrap();
        let throughput = input.global_secondary_indexes()[0].provisioned_throughput();
        assert_eq!(Some(&ProvisionedThroughput::new(1, 1)), throughput);

        // local indexes share the table's hash key and need a range key
        let wrong_hash = LocalSecondaryIndex::new(
            "by-created",
            vec![
                KeySchemaElement::new("created", KeyType::Hash),
                KeySchemaElement::new("key", KeyType::Range),
            ],
            Projection::All,
        );
        let err = orders()
            .attribute_definitions(created.clone())
            .local_secondary_index(wrong_hash)
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let no_range = LocalSecondaryIndex::new(
            "by-key",
            vec![KeySchemaElement::new("key", KeyType::Hash)],
            Projection::All,
        );
        let err = orders().local_secondary_index(no_range).build().unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let empty_include = GlobalSecondaryIndex::new(
            "by-status",
            vec![KeySchemaElement::new("status", KeyType::Hash)],
            Projection::Include(Vec::new()),
        );
        let err = orders()
            .attribute_definitions(status.clone())
            .global_secondary_index(empty_include)
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let err = orders()
            .attribute_definitions(status)
            .global_secondary_index(by_status())
            .global_secondary_index(by_status())
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());
    }

    #[test]
    fn test_table_options() {
        let input = orders()
            .table_class(TableClass::StandardInfrequentAccess)
            .stream_view_type(StreamViewType::NewAndOldImages)
            .sse_specification(SseSpecification::customer_managed("alias/orders"))
            .build()
            .unwrap();
        assert_eq!(Some(TableClass::StandardInfrequentAccess), input.table_class());
        assert_eq!(Some(StreamViewType::NewAndOldImages), input.stream_view_type());
        assert_eq!(
            Some("alias/orders"),
            input.sse_specification().and_then(SseSpecification::kms_master_key_id)
        );
    }

    #[test]
    fn test_throughput_consistent_with_billing_mode() {
        let err = orders()
            .billing_mode(BillingMode::Provisioned)
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let err = orders()
            .billing_mode(BillingMode::PayPerRequest)
            .provisioned_throughput(ProvisionedThroughput::new(5, 5))
            .build()
            .unwrap_err();
        assert_eq!(&ErrorKind::Configuration, err.kind());

        let input = orders()
            .billing_mode(BillingMode::Provisioned)
            .provisioned_throughput(ProvisionedThroughput::new(10, 5))
            .build()
            .unwrap();
        assert_eq!(10, input.provisioned_throughput().unwrap().read_capacity_units());
    }
}
