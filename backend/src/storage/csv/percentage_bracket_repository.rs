//! # CSV Percentage Bracket Repository
//!
//! Stores the councilor ceiling brackets of every term in
//! `percentage_brackets.csv`. An empty `maximum` means the bracket has no
//! upper bound.
//! Rows with a percentage outside 0..=100 are skipped with a warning.
//!
//! ```text
//! legislature,minimum,maximum,percentage
//! 2021-2025,0,10000,20
//! 2021-2025,10001,50000,30
//! 2021-2025,500001,,75
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::legislature::Legislature;
use crate::domain::models::percentage_bracket::PercentageBracket;
use crate::storage::PercentageBracketStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PercentageBracketRecord {
    legislature: String,
    minimum: u64,
    maximum: Option<u64>,
    percentage: f64,
}

impl PercentageBracketRecord {
    fn new(legislature: &Legislature, bracket: &PercentageBracket) -> Self {
        Self {
            legislature: legislature.key(),
            minimum: bracket.minimum,
            maximum: bracket.maximum,
            percentage: bracket.percentage,
        }
    }

    fn belongs_to(&self, legislature: &Legislature) -> bool {
        self.legislature.trim() == legislature.key()
    }
}

/// CSV-based percentage bracket repository
#[derive(Clone)]
pub struct PercentageBracketRepository {
    connection: CsvConnection,
}

impl PercentageBracketRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<PercentageBracketRecord>> {
        let file_path = self.connection.percentage_brackets_file_path();
        if !file_path.exists() {
            debug!("No percentage bracket table at {}", file_path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for (line, result) in csv_reader.deserialize::<PercentageBracketRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable percentage bracket row {}: {}", line + 1, e),
            }
        }
        Ok(records)
    }

    fn write_records(&self, records: &[PercentageBracketRecord]) -> Result<()> {
        let mut csv_writer = Writer::from_writer(Vec::new());
        for record in records {
            csv_writer.serialize(record)?;
        }
        let contents = csv_writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;

        let file_path = self.connection.percentage_brackets_file_path();
        self.connection.write_atomically(&file_path, &contents)
    }
}

#[async_trait]
impl PercentageBracketStorage for PercentageBracketRepository {
    async fn list_percentage_brackets(&self, legislature: &Legislature) -> Result<Vec<PercentageBracket>> {
        let brackets: Vec<PercentageBracket> = self
            .read_records()?
            .into_iter()
            .filter(|record| record.belongs_to(legislature))
            .filter_map(|record| {
                let bracket = PercentageBracket::new(record.minimum, record.maximum, record.percentage);
                match bracket.validate() {
                    Ok(()) => Some(bracket),
                    Err(e) => {
                        warn!("Skipping invalid percentage bracket row {:?}: {}", record, e);
                        None
                    }
                }
            })
            .collect();

        debug!("Loaded {} percentage brackets for {}", brackets.len(), legislature);
        Ok(brackets)
    }

    async fn replace_percentage_brackets(
        &self,
        legislature: &Legislature,
        brackets: &[PercentageBracket],
    ) -> Result<()> {
        let _guard = self.connection.lock_for_write();

        let mut records = self.read_records()?;
        records.retain(|record| !record.belongs_to(legislature));
        records.extend(
            brackets
                .iter()
                .map(|bracket| PercentageBracketRecord::new(legislature, bracket)),
        );
        self.write_records(&records)?;

        info!("Replaced percentage brackets for {} ({} brackets)", legislature, brackets.len());
        Ok(())
    }
}
