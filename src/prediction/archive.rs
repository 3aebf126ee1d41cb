use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::domain::{ConfirmationRate, TrainNumber, TravelClass};
use super::history::{ConfirmationHistoryProvider, HistoryError};

/// One historical journey on a train/class/date: how many tickets sat on the
/// waitlist and how many of those ended up confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub train: TrainNumber,
    pub journey_date: NaiveDate,
    pub class: TravelClass,
    pub total_waitlisted: u32,
    pub confirmed: u32,
}

impl BookingRecord {
    pub fn rate(&self) -> Option<ConfirmationRate> {
        ConfirmationRate::from_counts(self.confirmed, self.total_waitlisted)
    }
}

/// In-memory booking history backing the provider contract. Lookups average
/// per-record confirmation ratios, excluding journeys that never had a
/// waitlist.
#[derive(Debug, Default, Clone)]
pub struct BookingArchive {
    records: Vec<BookingRecord>,
}

impl BookingArchive {
    pub fn new(records: Vec<BookingRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: BookingRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hydrate from a CSV export with the columns
    /// `train_no,journey_date,class_type,total_wl,confirmed_tickets`
    /// (dates as YYYY-MM-DD).
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ArchiveError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<ArchiveRow>().enumerate() {
            // Header occupies the first line of the file.
            let line = index + 2;
            let row = row?;
            records.push(row.into_record(line)?);
        }

        Ok(Self::new(records))
    }

    fn mean_rate<'a, I>(records: I) -> Option<ConfirmationRate>
    where
        I: Iterator<Item = &'a BookingRecord>,
    {
        let rates: Vec<f64> = records
            .filter_map(BookingRecord::rate)
            .map(ConfirmationRate::value)
            .collect();

        if rates.is_empty() {
            return None;
        }

        let mean = rates.iter().sum::<f64>() / rates.len() as f64;
        Some(ConfirmationRate::new(mean))
    }
}

impl ConfirmationHistoryProvider for BookingArchive {
    fn specific_date_rate(
        &self,
        train: &TrainNumber,
        journey_date: NaiveDate,
        class: TravelClass,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        Ok(Self::mean_rate(self.records.iter().filter(|record| {
            record.train == *train && record.journey_date == journey_date && record.class == class
        })))
    }

    fn similar_date_rate(
        &self,
        train: &TrainNumber,
        class: TravelClass,
        day_of_week: u32,
        month: u32,
    ) -> Result<Option<ConfirmationRate>, HistoryError> {
        Ok(Self::mean_rate(self.records.iter().filter(|record| {
            record.train == *train
                && record.class == class
                && record.journey_date.weekday().number_from_sunday() == day_of_week
                && record.journey_date.month() == month
        })))
    }
}

/// Error enumeration for archive hydration.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("unable to read history export: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed history export: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct ArchiveRow {
    train_no: String,
    journey_date: String,
    class_type: String,
    #[serde(rename = "total_wl")]
    total_waitlisted: u32,
    #[serde(rename = "confirmed_tickets")]
    confirmed: u32,
}

impl ArchiveRow {
    fn into_record(self, line: usize) -> Result<BookingRecord, ArchiveError> {
        let journey_date = NaiveDate::parse_from_str(&self.journey_date, "%Y-%m-%d").map_err(
            |err| ArchiveError::InvalidRecord {
                line,
                reason: format!("journey_date '{}' is not YYYY-MM-DD ({err})", self.journey_date),
            },
        )?;

        let class = TravelClass::from_str(&self.class_type).map_err(|err| {
            ArchiveError::InvalidRecord {
                line,
                reason: err.to_string(),
            }
        })?;

        Ok(BookingRecord {
            train: TrainNumber(self.train_no),
            journey_date,
            class,
            total_waitlisted: self.total_waitlisted,
            confirmed: self.confirmed,
        })
    }
}
