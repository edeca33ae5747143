//! Parquet encode/decode helpers for namespace backends.
//!
//! All operations work on in-memory buffers; backends own the transport
//! (filesystem, object store, ...) around them.

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;

use crate::error::{NamespaceError, Result};

/// Serialize Arrow RecordBatches to Parquet format in memory.
pub(crate) fn serialize_to_parquet(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Bytes> {
    let batch_count = batches.len();
    let row_count: u64 = batches.iter().map(|batch| batch.num_rows() as u64).sum();
    let span = tracing::info_span!(
        "parquet.serialize",
        batch_count = batch_count,
        row_count = row_count
    );
    let _span_guard = span.entered();

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(zstd_level()))
        .set_max_row_group_size(128 * 1024) // 128K rows per group
        .build();

    let mut buffer = Vec::with_capacity(1024 * 1024);
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, Some(props))
            .map_err(|e| NamespaceError::Parquet(e.to_string()))?;

        for batch in batches {
            writer
                .write(batch)
                .map_err(|e| NamespaceError::Parquet(e.to_string()))?;
        }

        writer
            .close()
            .map_err(|e| NamespaceError::Parquet(e.to_string()))?;
    }

    tracing::debug!(size_bytes = buffer.len(), "Parquet serialization completed");
    Ok(Bytes::from(buffer))
}

fn zstd_level() -> ZstdLevel {
    // Keep this small to avoid heavy CPU on the write path. If the Parquet
    // crate changes accepted ranges, fall back to default.
    ZstdLevel::try_new(1).unwrap_or_default()
}

/// Parse a Parquet file from in-memory bytes into its schema and all
/// RecordBatches.
///
/// This reads the entire file into memory, so use carefully for large files.
pub(crate) fn parse_parquet_from_bytes(bytes: Bytes) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)
        .map_err(|e| NamespaceError::Parquet(e.to_string()))?;

    let schema = builder.schema().clone();
    let row_group_count = builder.metadata().num_row_groups();
    let reader = builder
        .build()
        .map_err(|e| NamespaceError::Parquet(e.to_string()))?;

    let mut batches = Vec::with_capacity(row_group_count);
    for batch_result in reader {
        let batch = batch_result.map_err(|e| NamespaceError::Parquet(e.to_string()))?;
        batches.push(batch);
    }

    Ok((schema, batches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use canopy_commons::arrow_utils::{field_int64, field_utf8, schema};
    use std::sync::Arc;

    #[test]
    fn test_serialize_then_parse_preserves_rows_and_schema() {
        let schema = schema(vec![field_int64("id", false), field_utf8("name", true)]);
        let batch = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec![Some("a"), None, Some("c")])),
            ],
        )
        .unwrap();

        let bytes = serialize_to_parquet(Arc::clone(&schema), &[batch]).unwrap();
        let (read_schema, read_batches) = parse_parquet_from_bytes(bytes).unwrap();

        assert_eq!(read_schema.fields().len(), 2);
        assert_eq!(read_schema.field(0).name(), "id");
        let total_rows: usize = read_batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 3);
    }

    #[test]
    fn test_parse_garbage_fails() {
        let result = parse_parquet_from_bytes(Bytes::from_static(b"not a parquet file"));
        assert!(matches!(result, Err(NamespaceError::Parquet(_))));
    }
}
