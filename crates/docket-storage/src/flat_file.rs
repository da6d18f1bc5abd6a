use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use docket_core::{DocketError, DocketResult, NewRecord, Record, RecordId, RemovalHook};
use tempfile::NamedTempFile;

use crate::cache::ReadCache;
use crate::codec::{decode_row, encode_row, header, is_header};

/// One dataset backed by one flat file.
///
/// The file is the only source of truth: rows are kept in insertion order,
/// there is no index, and deletion rewrites the whole file.
pub struct FlatFileStore {
    dir: PathBuf,
    path: PathBuf,
    cache: ReadCache,
    skipped_rows: usize,
}

impl FlatFileStore {
    /// Open `dir/name`, creating the directory and writing the header row if
    /// the file does not exist yet. Existing content is left untouched.
    pub fn open(dir: &Path, name: &str) -> DocketResult<Self> {
        std::fs::create_dir_all(dir).map_err(|e| DocketError::io(dir, e))?;
        let path = dir.join(name);

        let needs_header = match std::fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(DocketError::io(&path, e)),
        };
        if needs_header {
            std::fs::write(&path, format!("{}\n", header())).map_err(|e| DocketError::io(&path, e))?;
            tracing::debug!(path = %path.display(), "created dataset");
        }

        let dir = path.parent().unwrap_or(dir).to_path_buf();
        Ok(Self { dir, path, cache: ReadCache::default(), skipped_rows: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows skipped as malformed during the most recent file read.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Assign a fresh id to `new` and append it.
    pub fn append(&mut self, new: NewRecord) -> DocketResult<Record> {
        new.validate()?;
        let record = new.with_id(RecordId::generate());
        self.append_record(&record)?;
        Ok(record)
    }

    /// Append a record that already carries its id.
    pub fn append_record(&mut self, record: &Record) -> DocketResult<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| DocketError::io(&self.path, e))?;
        writeln!(f, "{}", encode_row(record)).map_err(|e| DocketError::io(&self.path, e))?;
        self.cache.invalidate();
        tracing::debug!(id = %record.id, path = %self.path.display(), "appended record");
        Ok(())
    }

    /// Cached rows, read from the file when the cache is stale.
    pub fn records(&mut self) -> DocketResult<&[Record]> {
        let path = &self.path;
        let skipped = &mut self.skipped_rows;
        self.cache.get_or_load(|| read_dataset(path, skipped))
    }

    /// All records in file order, always freshly read.
    pub fn scan_all(&mut self) -> DocketResult<Vec<Record>> {
        self.cache.invalidate();
        Ok(self.records()?.to_vec())
    }

    /// First record with `id`, always freshly read.
    pub fn find_by_id(&mut self, id: &RecordId) -> DocketResult<Option<Record>> {
        self.cache.invalidate();
        Ok(self.records()?.iter().find(|r| &r.id == id).cloned())
    }

    /// Rewrite the dataset without `target`, then notify `hook`.
    ///
    /// Works on raw lines: the header is rewritten and every other non-empty
    /// line is kept verbatim in its original order, including rows that do
    /// not decode. Only rows decoding to the target id are dropped.
    ///
    /// The compacted file is written to a temporary sibling carrying the
    /// dataset's permissions and renamed over it, so a failure mid-write
    /// leaves the previous file intact. Returns whether a row with the
    /// target id was present.
    pub fn remove(&mut self, target: &Record, hook: &mut dyn RemovalHook) -> DocketResult<bool> {
        self.cache.invalidate();
        let text = std::fs::read_to_string(&self.path).map_err(|e| DocketError::io(&self.path, e))?;

        let mut dropped = 0usize;
        let mut kept: Vec<&str> = Vec::new();
        for (_, line) in data_lines(&text) {
            match decode_row(line) {
                Ok(r) if r.id == target.id => dropped += 1,
                _ => kept.push(line),
            }
        }

        let perms = std::fs::metadata(&self.path)
            .map_err(|e| DocketError::io(&self.path, e))?
            .permissions();
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| DocketError::io(&self.dir, e))?;
        {
            let mut w = BufWriter::new(tmp.as_file_mut());
            writeln!(w, "{}", header()).map_err(|e| DocketError::io(&self.path, e))?;
            for line in &kept {
                writeln!(w, "{}", line).map_err(|e| DocketError::io(&self.path, e))?;
            }
            w.flush().map_err(|e| DocketError::io(&self.path, e))?;
        }
        tmp.as_file().set_permissions(perms).map_err(|e| DocketError::io(&self.path, e))?;
        tmp.as_file().sync_all().map_err(|e| DocketError::io(&self.path, e))?;
        tmp.persist(&self.path).map_err(|e| DocketError::io(&self.path, e.error))?;

        let found = dropped > 0;
        tracing::info!(
            id = %target.id,
            found,
            remaining = kept.len(),
            path = %self.path.display(),
            "compacted dataset"
        );
        hook.on_record_removed(target);
        Ok(found)
    }
}

/// Non-empty lines after the header, with their zero-based line index. A
/// first line that is not the header is returned as data.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(idx, line)| !(*idx == 0 && is_header(line)))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn read_dataset(path: &Path, skipped: &mut usize) -> DocketResult<Vec<Record>> {
    let text = std::fs::read_to_string(path).map_err(|e| DocketError::io(path, e))?;
    if let Some(first) = text.lines().next() {
        if !is_header(first) {
            tracing::warn!(path = %path.display(), line = first, "dataset has no header row");
        }
    }

    *skipped = 0;
    let mut records = Vec::new();
    for (idx, line) in data_lines(&text) {
        match decode_row(line) {
            Ok(r) => records.push(r),
            Err(e) => {
                *skipped += 1;
                tracing::warn!(path = %path.display(), line = idx + 1, error = %e, "skipping malformed row");
            }
        }
    }
    tracing::debug!(path = %path.display(), records = records.len(), skipped = *skipped, "read dataset");
    Ok(records)
}
