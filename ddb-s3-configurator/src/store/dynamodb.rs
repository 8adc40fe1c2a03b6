/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::create_table::builders::CreateTableFluentBuilder;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{self as ddb, AttributeValue};
use aws_sdk_dynamodb::Client;
use bytes::Bytes;

use super::{TableStore, KEY_ATTRIBUTE, VALUE_ATTRIBUTE};
use crate::error::{self, Error, ErrorKind};
use crate::operation::create_table::CreateTableInput;
use crate::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType,
    LocalSecondaryIndex, Projection, ProvisionedThroughput, ScalarAttributeType, SseSpecification,
    StreamViewType, TableClass,
};

#[async_trait]
impl TableStore for Client {
    async fn create_table(&self, input: CreateTableInput) -> Result<(), Error> {
        let request = copy_fields_to_create_table_request(&input, Client::create_table(self))?;
        request.send().await?;
        tracing::debug!(table = input.table_name(), "created table");
        Ok(())
    }

    async fn put_item(&self, table: &str, key: &str, value: Bytes) -> Result<(), Error> {
        tracing::debug!(table, key, len = value.len(), "put item");
        Client::put_item(self)
            .table_name(table)
            .item(KEY_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .item(VALUE_ATTRIBUTE, AttributeValue::B(Blob::new(value.to_vec())))
            .send()
            .await?;
        Ok(())
    }

    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Bytes>, Error> {
        tracing::debug!(table, key, "get item");
        let output = Client::get_item(self)
            .table_name(table)
            .key(KEY_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .consistent_read(true)
            .send()
            .await?;

        let Some(mut item) = output.item else {
            return Ok(None);
        };

        match item.remove(VALUE_ATTRIBUTE) {
            Some(AttributeValue::B(blob)) => Ok(Some(Bytes::from(blob.into_inner()))),
            _ => Err(Error::new(
                ErrorKind::ServiceError,
                format!("item `{key}` in table `{table}` has no binary `{VALUE_ATTRIBUTE}` attribute"),
            )),
        }
    }
}

/// Copy fields from `CreateTableInput` to `CreateTableFluentBuilder`
fn copy_fields_to_create_table_request(
    input: &CreateTableInput,
    builder: CreateTableFluentBuilder,
) -> Result<CreateTableFluentBuilder, Error> {
    let table_key_schema = key_schema(input.key_schema())?;

    let attribute_definitions = input
        .attribute_definitions()
        .iter()
        .map(attribute_definition)
        .collect::<Result<Vec<_>, _>>()?;

    let provisioned_throughput = input
        .provisioned_throughput()
        .map(provisioned_throughput)
        .transpose()?;

    let global_secondary_indexes = input
        .global_secondary_indexes()
        .iter()
        .map(global_secondary_index)
        .collect::<Result<Vec<_>, _>>()?;

    let local_secondary_indexes = input
        .local_secondary_indexes()
        .iter()
        .map(local_secondary_index)
        .collect::<Result<Vec<_>, _>>()?;

    let stream_specification = input
        .stream_view_type()
        .map(stream_specification)
        .transpose()?;

    let tags = input
        .tags()
        .iter()
        .map(|(key, value)| ddb::Tag::builder().key(key).value(value).build())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(builder
        .table_name(input.table_name())
        .set_key_schema(Some(table_key_schema))
        .set_attribute_definitions(Some(attribute_definitions))
        .set_billing_mode(input.billing_mode().map(billing_mode))
        .set_provisioned_throughput(provisioned_throughput)
        .set_tags((!tags.is_empty()).then_some(tags))
        .set_deletion_protection_enabled(input.deletion_protection_enabled())
        .set_global_secondary_indexes(
            (!global_secondary_indexes.is_empty()).then_some(global_secondary_indexes),
        )
        .set_local_secondary_indexes(
            (!local_secondary_indexes.is_empty()).then_some(local_secondary_indexes),
        )
        .set_table_class(input.table_class().map(table_class))
        .set_stream_specification(stream_specification)
        .set_sse_specification(input.sse_specification().map(sse_specification)))
}

fn key_schema_element(element: &KeySchemaElement) -> Result<ddb::KeySchemaElement, Error> {
    let key_type = match element.key_type() {
        KeyType::Hash => ddb::KeyType::Hash,
        KeyType::Range => ddb::KeyType::Range,
    };
    Ok(ddb::KeySchemaElement::builder()
        .attribute_name(element.attribute_name())
        .key_type(key_type)
        .build()?)
}

fn key_schema(elements: &[KeySchemaElement]) -> Result<Vec<ddb::KeySchemaElement>, Error> {
    elements.iter().map(key_schema_element).collect()
}

fn attribute_definition(def: &AttributeDefinition) -> Result<ddb::AttributeDefinition, Error> {
    let attribute_type = match def.attribute_type() {
        ScalarAttributeType::S => ddb::ScalarAttributeType::S,
        ScalarAttributeType::N => ddb::ScalarAttributeType::N,
        ScalarAttributeType::B => ddb::ScalarAttributeType::B,
    };
    Ok(ddb::AttributeDefinition::builder()
        .attribute_name(def.attribute_name())
        .attribute_type(attribute_type)
        .build()?)
}

fn projection(projection: &Projection) -> ddb::Projection {
    let builder = ddb::Projection::builder();
    match projection {
        Projection::KeysOnly => builder.projection_type(ddb::ProjectionType::KeysOnly),
        Projection::All => builder.projection_type(ddb::ProjectionType::All),
        Projection::Include(attributes) => builder
            .projection_type(ddb::ProjectionType::Include)
            .set_non_key_attributes(Some(attributes.clone())),
    }
    .build()
}

fn global_secondary_index(index: &GlobalSecondaryIndex) -> Result<ddb::GlobalSecondaryIndex, Error> {
    let throughput = index
        .provisioned_throughput()
        .map(provisioned_throughput)
        .transpose()?;
    Ok(ddb::GlobalSecondaryIndex::builder()
        .index_name(index.index_name())
        .set_key_schema(Some(key_schema(index.key_schema())?))
        .projection(projection(index.projection()))
        .set_provisioned_throughput(throughput)
        .build()?)
}

fn local_secondary_index(index: &LocalSecondaryIndex) -> Result<ddb::LocalSecondaryIndex, Error> {
    Ok(ddb::LocalSecondaryIndex::builder()
        .index_name(index.index_name())
        .set_key_schema(Some(key_schema(index.key_schema())?))
        .projection(projection(index.projection()))
        .build()?)
}

fn table_class(class: TableClass) -> ddb::TableClass {
    match class {
        TableClass::Standard => ddb::TableClass::Standard,
        TableClass::StandardInfrequentAccess => ddb::TableClass::StandardInfrequentAccess,
    }
}

fn stream_specification(view_type: StreamViewType) -> Result<ddb::StreamSpecification, Error> {
    let view_type = match view_type {
        StreamViewType::KeysOnly => ddb::StreamViewType::KeysOnly,
        StreamViewType::NewImage => ddb::StreamViewType::NewImage,
        StreamViewType::OldImage => ddb::StreamViewType::OldImage,
        StreamViewType::NewAndOldImages => ddb::StreamViewType::NewAndOldImages,
    };
    Ok(ddb::StreamSpecification::builder()
        .stream_enabled(true)
        .stream_view_type(view_type)
        .build()?)
}

fn sse_specification(sse: &SseSpecification) -> ddb::SseSpecification {
    ddb::SseSpecification::builder()
        .enabled(true)
        .sse_type(ddb::SseType::Kms)
        .set_kms_master_key_id(sse.kms_master_key_id().map(str::to_owned))
        .build()
}

fn billing_mode(mode: BillingMode) -> ddb::BillingMode {
    match mode {
        BillingMode::Provisioned => ddb::BillingMode::Provisioned,
        BillingMode::PayPerRequest => ddb::BillingMode::PayPerRequest,
    }
}

fn provisioned_throughput(
    throughput: &ProvisionedThroughput,
) -> Result<ddb::ProvisionedThroughput, Error> {
    let units = |value: u64| {
        i64::try_from(value)
            .map_err(|_| error::configuration(format!("capacity units {value} out of range")))
    };
    Ok(ddb::ProvisionedThroughput::builder()
        .read_capacity_units(units(throughput.read_capacity_units())?)
        .write_capacity_units(units(throughput.write_capacity_units())?)
        .build()?)
}
