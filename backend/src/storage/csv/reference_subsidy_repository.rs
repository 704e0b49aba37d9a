//! # CSV Reference Subsidy Repository
//!
//! Stores the reference subsidies of every legislative term in a single
//! `reference_subsidies.csv` at the root of the data directory:
//!
//! ```text
//! legislature,kind,amount,law,effective_date
//! 2021-2025,state-deputy,25322.25,Lei 17.400/2021,2022-01-01
//! 2021-2025,stf-minister,39293.32,Lei 13.752/2018,2019-01-01
//! ```
//!
//! Rows that cannot be read (bad term key, unknown kind, bad date) or that
//! fail validation (negative amount, blank law) are skipped with a warning so one bad row does not hide the rest of the table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use shared::ReferenceSubsidyKind;
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::legislature::Legislature;
use crate::domain::models::reference_subsidy::ReferenceSubsidy;
use crate::storage::ReferenceSubsidyStorage;

/// One row of `reference_subsidies.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReferenceSubsidyRecord {
    legislature: String,
    kind: String,
    amount: f64,
    law: String,
    effective_date: String,
}

impl ReferenceSubsidyRecord {
    fn from_domain(subsidy: &ReferenceSubsidy) -> Self {
        Self {
            legislature: subsidy.legislature.key(),
            kind: subsidy.kind.as_str().to_string(),
            amount: subsidy.amount,
            law: subsidy.law.clone(),
            effective_date: subsidy.effective_date.format("%Y-%m-%d").to_string(),
        }
    }

    fn to_domain(&self) -> Result<ReferenceSubsidy> {
        let legislature: Legislature = self.legislature.parse()?;
        let kind: ReferenceSubsidyKind = self.kind.parse().map_err(anyhow::Error::msg)?;
        let effective_date = NaiveDate::parse_from_str(&self.effective_date, "%Y-%m-%d")
            .with_context(|| format!("Invalid effective date '{}'", self.effective_date))?;

        let subsidy = ReferenceSubsidy {
            legislature,
            kind,
            amount: self.amount,
            law: self.law.clone(),
            effective_date,
        };
        subsidy.validate()?;
        Ok(subsidy)
    }

    fn matches(&self, legislature: &Legislature, kind: ReferenceSubsidyKind) -> bool {
        self.legislature.trim() == legislature.key() && self.kind.trim() == kind.as_str()
    }
}

/// CSV-based reference subsidy repository
#[derive(Clone)]
pub struct ReferenceSubsidyRepository {
    connection: CsvConnection,
}

impl ReferenceSubsidyRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<ReferenceSubsidyRecord>> {
        let file_path = self.connection.reference_subsidies_file_path();
        if !file_path.exists() {
            debug!("No reference subsidy table at {}", file_path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for (line, result) in csv_reader.deserialize::<ReferenceSubsidyRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable reference subsidy row {}: {}", line + 1, e),
            }
        }
        Ok(records)
    }

    fn write_records(&self, records: &[ReferenceSubsidyRecord]) -> Result<()> {
        let mut csv_writer = Writer::from_writer(Vec::new());
        for record in records {
            csv_writer.serialize(record)?;
        }
        let contents = csv_writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;

        let file_path = self.connection.reference_subsidies_file_path();
        self.connection.write_atomically(&file_path, &contents)?;
        debug!("Wrote {} reference subsidy rows to {}", records.len(), file_path.display());
        Ok(())
    }

    fn convert(record: &ReferenceSubsidyRecord) -> Option<ReferenceSubsidy> {
        match record.to_domain() {
            Ok(subsidy) => Some(subsidy),
            Err(e) => {
                warn!("Skipping invalid reference subsidy row {:?}: {}", record, e);
                None
            }
        }
    }
}

#[async_trait]
impl ReferenceSubsidyStorage for ReferenceSubsidyRepository {
    async fn get_reference_subsidy(
        &self,
        legislature: &Legislature,
        kind: ReferenceSubsidyKind,
    ) -> Result<Option<ReferenceSubsidy>> {
        let records = self.read_records()?;
        // the last row wins if the file was edited by hand and holds duplicates
        let subsidy = records
            .iter()
            .rev()
            .filter(|record| record.matches(legislature, kind))
            .find_map(Self::convert);

        debug!(
            "Reference subsidy {} for {}: {}",
            kind,
            legislature,
            if subsidy.is_some() { "found" } else { "not found" }
        );
        Ok(subsidy)
    }

    async fn list_reference_subsidies(&self, legislature: &Legislature) -> Result<Vec<ReferenceSubsidy>> {
        let records = self.read_records()?;
        Ok(records
            .iter()
            .filter(|record| record.legislature.trim() == legislature.key())
            .filter_map(Self::convert)
            .collect())
    }

    async fn store_reference_subsidy(&self, subsidy: &ReferenceSubsidy) -> Result<()> {
        let _guard = self.connection.lock_for_write();

        let mut records = self.read_records()?;
        records.retain(|record| !record.matches(&subsidy.legislature, subsidy.kind));
        records.push(ReferenceSubsidyRecord::from_domain(subsidy));
        self.write_records(&records)?;

        info!(
            "Stored {} reference subsidy for {}: R$ {:.2} ({})",
            subsidy.kind, subsidy.legislature, subsidy.amount, subsidy.law
        );
        Ok(())
    }
}
