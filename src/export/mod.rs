use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use csv::WriterBuilder;
use log::{debug, warn};
use crate::error::ExportError;
use crate::transaction::Transaction;

const COLUMN_COUNT: usize = 14;

/// Output columns, in order. [`transaction_record`] fills exactly one value per column.
pub(crate) const CSV_COLUMNS: [&str; COLUMN_COUNT] = [
    "CardNumber",
    "Id",
    "Category",
    "MoneyAmount",
    "MoneyBalance",
    "StarAmount",
    "StarBalance",
    "DateTimeUnix",
    "Description",
    "Points",
    "LocationId",
    "LocationName",
    "CheckNumber",
    "Currency",
];

/// Flatten a transaction into a CSV row matching [`CSV_COLUMNS`]. `date` is the already
/// normalised timestamp.
pub(crate) fn transaction_record(card_number: &str, t: &Transaction, date: &str) -> [String; COLUMN_COUNT] {
    [
        card_number.to_string(),
        t.id.to_string(),
        t.category.clone(),
        t.money_amount.normalize().to_string(),
        t.money_balance.normalize().to_string(),
        t.star_amount.to_string(),
        t.star_balance.to_string(),
        date.to_string(),
        t.description.clone(),
        t.points.to_string(),
        t.location_id.to_string(),
        t.location_name.clone(),
        t.check_number.clone(),
        t.currency.clone(),
    ]
}

/// Writes transactions as CSV rows to any writer
pub(crate) struct TransactionCsvWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> TransactionCsvWriter<W> {
    pub(crate) fn new(inner: W) -> TransactionCsvWriter<W> {
        let writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        TransactionCsvWriter { writer, rows: 0 }
    }

    pub(crate) fn write_header(&mut self) -> Result<(), ExportError> {
        self.writer.write_record(CSV_COLUMNS)?;
        Ok(())
    }

    pub(crate) fn write_row(&mut self, record: &[String; COLUMN_COUNT]) -> Result<(), ExportError> {
        self.writer.write_record(record)?;
        self.rows += 1;
        Ok(())
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows and hand back the underlying writer.
    pub(crate) fn finish(self) -> Result<W, ExportError> {
        self.writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }
}

/// Output file that only appears under its final name once committed. Rows are written to a
/// `.part` sibling, which is removed again if the file is dropped without [`PendingFile::commit`].
pub(crate) struct PendingFile {
    final_path: PathBuf,
    part_path: PathBuf,
    file: File,
    committed: bool,
}

impl PendingFile {
    pub(crate) fn create(final_path: &Path) -> Result<PendingFile, ExportError> {
        let mut part_name = final_path.as_os_str().to_owned();
        part_name.push(".part");
        let part_path = PathBuf::from(part_name);

        debug!("Writing export to {}", part_path.display());
        let file = File::create(&part_path)?;
        Ok(PendingFile {
            final_path: final_path.to_path_buf(),
            part_path,
            file,
            committed: false,
        })
    }

    pub(crate) fn file(&self) -> &File {
        &self.file
    }

    pub(crate) fn commit(mut self) -> Result<(), ExportError> {
        self.file.sync_all()?;
        fs::rename(&self.part_path, &self.final_path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = fs::remove_file(&self.part_path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Unable to remove partial export {}: {}", self.part_path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;
    use rust_decimal::Decimal;
    use crate::export::{transaction_record, PendingFile, TransactionCsvWriter, CSV_COLUMNS};
    use crate::transaction::Transaction;

    fn latte() -> Transaction {
        Transaction {
            id: 98765,
            category: "Purchase".into(),
            money_amount: Decimal::new(-675, 2),
            money_balance: Decimal::new(2450, 2),
            star_amount: 1,
            star_balance: 12,
            raw_date_time: "/Date(1609459200000-0000)/".into(),
            description: "Caffe Latte, Tall".into(),
            points: 6,
            location_id: 1042,
            location_name: "Zürich Bahnhofstrasse".into(),
            check_number: "A-17".into(),
            currency: "CHF".into(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("starbucks-export-{}-{}", std::process::id(), name));
        path
    }

    #[test]
    fn test_header_only() {
        let mut writer = TransactionCsvWriter::new(vec![]);
        writer.write_header().unwrap();
        assert_eq!(writer.rows(), 0);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(output, format!("{}\n", CSV_COLUMNS.join(",")));
        assert_eq!(CSV_COLUMNS.len(), 14);
    }

    #[test]
    fn test_record() {
        let record = transaction_record("6000123412341234", &latte(), "2021-01-01T00:00:00Z");
        assert_eq!(record, [
            "6000123412341234", "98765", "Purchase", "-6.75", "24.5", "1", "12", "2021-01-01T00:00:00Z",
            "Caffe Latte, Tall", "6", "1042", "Zürich Bahnhofstrasse", "A-17", "CHF",
        ]);
    }

    #[test]
    fn test_row_quoting() {
        let mut writer = TransactionCsvWriter::new(vec![]);
        writer.write_header().unwrap();
        writer.write_row(&transaction_record("1", &latte(), "2021-01-01T00:00:00Z")).unwrap();
        assert_eq!(writer.rows(), 1);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1,98765,Purchase,-6.75,24.5,1,12,2021-01-01T00:00:00Z,\"Caffe Latte, Tall\",6,1042,Zürich Bahnhofstrasse,A-17,CHF");
    }

    #[test]
    fn test_pending_file_commit() {
        let path = temp_path("commit.csv");
        let pending = PendingFile::create(&path).unwrap();
        pending.file().write_all(b"CardNumber\n").unwrap();
        assert!(!path.exists());

        pending.commit().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "CardNumber\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_pending_file_dropped() {
        let path = temp_path("dropped.csv");
        let mut part_path = path.clone().into_os_string();
        part_path.push(".part");
        {
            let pending = PendingFile::create(&path).unwrap();
            pending.file().write_all(b"partial").unwrap();
            assert!(PathBuf::from(&part_path).exists());
        }
        assert!(!PathBuf::from(&part_path).exists());
        assert!(!path.exists());
    }
}
