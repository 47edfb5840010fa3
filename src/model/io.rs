use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, debug_span, warn};

use super::{KeyedVectors, ModelError};

impl KeyedVectors {
    /// Load a model in word2vec text format.
    ///
    /// First line is `<count> <dim>`, then one `<label> <f32>...` row per
    /// line. Labels cannot contain spaces in this format, which matches the
    /// bracketed article-name convention (`[記事名]`) of the Japanese
    /// entity-vector distributions.
    pub fn load_word2vec_text(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let _span = debug_span!("load_word2vec_text", path = %path.display()).entered();

        let mut reader = BufReader::new(File::open(path)?);
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let (count, dim) = parse_header(header.trim())?;

        let mut model = Self::with_capacity(count, dim);
        let mut vector: Vec<f32> = Vec::with_capacity(dim);
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let label = fields
                .next()
                .ok_or_else(|| ModelError::Parse("blank row".to_string()))?;
            vector.clear();
            for field in fields {
                let value = field.parse::<f32>().map_err(|e| {
                    ModelError::Parse(format!("bad float {field:?} for {label:?}: {e}"))
                })?;
                vector.push(value);
            }
            model.push(label.to_string(), &vector)?;
        }
        if model.len() != count {
            warn!(
                declared = count,
                loaded = model.len(),
                "row count differs from header"
            );
        }
        debug!(rows = model.len(), dim, "model loaded");
        Ok(model)
    }

    /// Load a model in word2vec binary format.
    ///
    /// Same `<count> <dim>` header, then per row: label bytes, one space,
    /// `dim` little-endian f32s, optionally followed by a newline. The file
    /// is memory-mapped; entity-vector models run to gigabytes and only one
    /// sequential pass is needed.
    pub fn load_word2vec_binary(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let _span = debug_span!("load_word2vec_binary", path = %path.display()).entered();

        let file = File::open(path)?;
        let map = unsafe { Mmap::map(&file)? };
        let data: &[u8] = &map;

        let newline = data
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| ModelError::InvalidHeader("missing header line".to_string()))?;
        let header = std::str::from_utf8(&data[..newline])
            .map_err(|e| ModelError::InvalidHeader(e.to_string()))?;
        let (count, dim) = parse_header(header.trim())?;

        let mut model = Self::with_capacity(count, dim);
        let mut vector: Vec<f32> = Vec::with_capacity(dim);
        let mut offset = newline + 1;
        for row in 0..count {
            while offset < data.len() && (data[offset] == b'\n' || data[offset] == b' ') {
                offset += 1;
            }
            let label_start = offset;
            while offset < data.len() && data[offset] != b' ' {
                offset += 1;
            }
            if offset >= data.len() {
                return Err(ModelError::Parse(format!("truncated label at row {row}")));
            }
            let label = std::str::from_utf8(&data[label_start..offset])
                .map_err(|e| ModelError::Parse(format!("label at row {row}: {e}")))?
                .to_string();
            offset += 1;

            let vector_end = offset + dim * 4;
            if vector_end > data.len() {
                return Err(ModelError::Parse(format!("truncated vector for {label:?}")));
            }
            vector.clear();
            for chunk in data[offset..vector_end].chunks_exact(4) {
                vector.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
            }
            offset = vector_end;
            model.push(label, &vector)?;
        }
        debug!(rows = model.len(), dim, "model loaded");
        Ok(model)
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), ModelError> {
    let mut parts = line.split_whitespace();
    let count = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| ModelError::InvalidHeader(line.to_string()))?;
    let dim = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| ModelError::InvalidHeader(line.to_string()))?;
    if parts.next().is_some() {
        return Err(ModelError::InvalidHeader(line.to_string()));
    }
    Ok((count, dim))
}
