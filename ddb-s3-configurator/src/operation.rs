/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Table creation descriptor
pub mod create_table;

/// Bucket creation descriptor
pub mod create_bucket;

/// Object write descriptor
pub mod put_object;
