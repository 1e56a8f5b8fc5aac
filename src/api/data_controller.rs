use std::io::Read;

use tracing::debug;

use crate::core::{ReferenceCode, Table, TableIntake, TableSet};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::AnalyticsEngine;

impl<R: Renderer> AnalyticsEngine<R> {
    #[must_use]
    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Appends a table without selecting it.
    pub fn add_table(&mut self, table: Table) -> usize {
        let index = self.tables.push(table);
        self.sync_interaction();
        index
    }

    /// Parses a CSV export and appends it as a new table.
    pub fn intake_csv(&mut self, title: &str, reader: impl Read) -> ChartResult<usize> {
        let index = self.tables.intake_csv(title, reader)?;
        self.sync_interaction();
        Ok(index)
    }

    pub fn remove_table(&mut self, index: usize) -> ChartResult<Table> {
        let removed = self.tables.remove(index)?;
        self.sync_interaction();
        Ok(removed)
    }

    pub fn rename_table(&mut self, index: usize, title: &str) -> ChartResult<()> {
        self.tables.rename(index, title)
    }

    /// Flips selection of one table and returns whether it is now selected.
    pub fn toggle_table_selected(&mut self, index: usize) -> ChartResult<bool> {
        let selected = self.tables.toggle_selected(index)?;
        self.sync_interaction();
        Ok(selected)
    }

    pub fn set_selection(&mut self, selection: &[usize]) -> ChartResult<()> {
        self.tables.set_selection(selection)?;
        self.sync_interaction();
        Ok(())
    }

    #[must_use]
    pub fn reference_code(&self) -> &ReferenceCode {
        &self.reference
    }

    /// Parses and stores the reference code; the previous one stays on error.
    pub fn set_reference_code(&mut self, input: &str) -> ChartResult<()> {
        let reference = ReferenceCode::parse(input)?;
        debug!(commands = reference.len(), "set reference code");
        self.set_reference(reference);
        Ok(())
    }

    pub fn set_reference(&mut self, reference: ReferenceCode) {
        self.reference = reference;
        self.sync_interaction();
    }

    pub fn clear_reference_code(&mut self) {
        debug!("cleared reference code");
        self.set_reference(ReferenceCode::none());
    }
}
