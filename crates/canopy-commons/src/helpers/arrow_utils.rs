//! Arrow schema and RecordBatch builder utilities for reducing boilerplate.
//!
//! This module provides convenient helpers for creating Arrow schemas and
//! RecordBatches with common column types, reducing code duplication across
//! backends and test fixtures.

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, StringBuilder,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Create a non-dictionary UTF-8 field.
pub fn field_utf8(name: &str, nullable: bool) -> Field {
    Field::new(name, DataType::Utf8, nullable)
}

/// Create an Int32 field.
pub fn field_int32(name: &str, nullable: bool) -> Field {
    Field::new(name, DataType::Int32, nullable)
}

/// Create an Int64 field.
pub fn field_int64(name: &str, nullable: bool) -> Field {
    Field::new(name, DataType::Int64, nullable)
}

/// Create a Float64 field.
pub fn field_float64(name: &str, nullable: bool) -> Field {
    Field::new(name, DataType::Float64, nullable)
}

/// Create a Boolean field.
pub fn field_boolean(name: &str, nullable: bool) -> Field {
    Field::new(name, DataType::Boolean, nullable)
}

/// Build an Arc-wrapped schema from fields.
pub fn schema(fields: Vec<Field>) -> SchemaRef {
    Arc::new(Schema::new(fields))
}

/// Builder for constructing Arrow RecordBatches with type-safe column additions.
///
/// Columns must be added in schema order; `build` fails on count or type
/// mismatch.
///
/// # Example
///
/// ```rust
/// use canopy_commons::arrow_utils::{field_int32, field_utf8, schema, RecordBatchBuilder};
///
/// let schema = schema(vec![field_int32("id", false), field_utf8("name", true)]);
/// let mut builder = RecordBatchBuilder::new(schema);
/// builder
///     .add_int32_column(vec![Some(1), Some(2)])
///     .add_string_column(vec![Some("a"), None]);
/// let batch = builder.build().unwrap();
/// assert_eq!(batch.num_rows(), 2);
/// ```
pub struct RecordBatchBuilder {
    schema: SchemaRef,
    columns: Vec<ArrayRef>,
}

impl RecordBatchBuilder {
    /// Create a new RecordBatchBuilder with the given schema.
    pub fn new(schema: SchemaRef) -> Self {
        let capacity = schema.fields().len();
        Self {
            schema,
            columns: Vec::with_capacity(capacity),
        }
    }

    fn push_array(&mut self, array: ArrayRef) -> &mut Self {
        self.columns.push(array);
        self
    }

    /// Add a string column (UTF-8) to the batch.
    pub fn add_string_column(&mut self, data: Vec<Option<&str>>) -> &mut Self {
        let mut builder = StringBuilder::with_capacity(data.len(), data.len() * 32);
        for value in data {
            match value {
                Some(s) => builder.append_value(s),
                None => builder.append_null(),
            }
        }
        self.push_array(Arc::new(builder.finish()))
    }

    /// Add an Int32 column to the batch.
    pub fn add_int32_column(&mut self, data: Vec<Option<i32>>) -> &mut Self {
        self.push_array(Arc::new(Int32Array::from(data)))
    }

    /// Add an Int64 column to the batch.
    pub fn add_int64_column(&mut self, data: Vec<Option<i64>>) -> &mut Self {
        self.push_array(Arc::new(Int64Array::from(data)))
    }

    /// Add a Float64 column to the batch.
    pub fn add_float64_column(&mut self, data: Vec<Option<f64>>) -> &mut Self {
        self.push_array(Arc::new(Float64Array::from(data)))
    }

    /// Add a Boolean column to the batch.
    pub fn add_boolean_column(&mut self, data: Vec<Option<bool>>) -> &mut Self {
        self.push_array(Arc::new(BooleanArray::from(data)))
    }

    /// Add a pre-built array column directly.
    ///
    /// Use this for array types not covered by the convenience methods.
    pub fn add_array_column(&mut self, array: ArrayRef) -> &mut Self {
        self.push_array(array)
    }

    /// Build the RecordBatch from accumulated columns.
    pub fn build(self) -> Result<RecordBatch, ArrowError> {
        RecordBatch::try_new(self.schema, self.columns)
    }
}

/// Helper function to create an empty RecordBatch for a given schema.
///
/// Useful for tables that hold no rows yet but need a valid batch structure.
pub fn empty_batch(schema: SchemaRef) -> Result<RecordBatch, ArrowError> {
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| arrow::array::new_empty_array(field.data_type()))
        .collect();
    RecordBatch::try_new(schema, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_schema() -> SchemaRef {
        schema(vec![
            field_utf8("id", false),
            field_int64("count", false),
            field_boolean("active", true),
        ])
    }

    #[test]
    fn test_basic_batch_builder() {
        let mut builder = RecordBatchBuilder::new(test_schema());

        builder
            .add_string_column(vec![Some("id1"), Some("id2")])
            .add_int64_column(vec![Some(100), Some(200)])
            .add_boolean_column(vec![Some(true), None]);

        let batch = builder.build().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 3);
    }

    #[test]
    fn test_empty_batch() {
        let batch = empty_batch(test_schema()).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 3);
    }

    #[test]
    fn test_column_count_mismatch() {
        let mut builder = RecordBatchBuilder::new(test_schema());

        // Only add 2 columns when schema expects 3
        builder
            .add_string_column(vec![Some("id1")])
            .add_int64_column(vec![Some(100)]);

        assert!(builder.build().is_err());
    }
}
