use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// One logged event: header name → raw cell text, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A run-log as supplied by the table manager. Read-only to the analytics core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from positional cell values.
    ///
    /// Headers must be unique. Rows shorter than the header list are padded
    /// with empty cells; longer rows are rejected.
    pub fn new(
        title: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> ChartResult<Self> {
        let title = title.into();
        let unique: IndexSet<&str> = headers.iter().map(String::as_str).collect();
        if unique.len() != headers.len() {
            return Err(ChartError::InvalidData(format!(
                "table `{title}` has duplicate headers"
            )));
        }

        let mut mapped = Vec::with_capacity(rows.len());
        for (row_index, values) in rows.into_iter().enumerate() {
            if values.len() > headers.len() {
                return Err(ChartError::InvalidData(format!(
                    "table `{title}` row {row_index} has {} cells for {} headers",
                    values.len(),
                    headers.len()
                )));
            }
            let mut values = values.into_iter();
            let cells = headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect();
            mapped.push(Row { cells });
        }

        Ok(Self {
            title,
            headers,
            rows: mapped,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn header_position(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|candidate| candidate == header)
    }
}

/// Selected table as seen by the chart pipeline.
///
/// `color_index` is the position inside the current selection, not the table's
/// identity, so colors move when the selection changes.
#[derive(Debug, Clone, Copy)]
pub struct SelectedTable<'a> {
    pub table_index: usize,
    pub color_index: usize,
    pub table: &'a Table,
}

/// Uploaded tables plus the ordered selection used for charting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    tables: Vec<Table>,
    selection: Vec<usize>,
}

impl TableSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a table and returns its index.
    pub fn push(&mut self, table: Table) -> usize {
        self.tables.push(table);
        let index = self.tables.len() - 1;
        debug!(
            index,
            title = self.tables[index].title(),
            rows = self.tables[index].rows().len(),
            "table added"
        );
        index
    }

    /// Removes a table and shifts selection indices that pointed past it.
    pub fn remove(&mut self, index: usize) -> ChartResult<Table> {
        if index >= self.tables.len() {
            return Err(ChartError::UnknownTable(index));
        }
        let removed = self.tables.remove(index);
        self.selection.retain(|&selected| selected != index);
        for selected in &mut self.selection {
            if *selected > index {
                *selected -= 1;
            }
        }
        debug!(
            index,
            title = removed.title(),
            selected = self.selection.len(),
            "table removed"
        );
        Ok(removed)
    }

    /// Renames a table. Blank names are rejected and leave the title unchanged.
    pub fn rename(&mut self, index: usize, title: &str) -> ChartResult<()> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ChartError::InvalidData(
                "table title must not be blank".to_owned(),
            ));
        }
        let table = self
            .tables
            .get_mut(index)
            .ok_or(ChartError::UnknownTable(index))?;
        table.title = trimmed.to_owned();
        Ok(())
    }

    /// Flips selection of one table and returns whether it is now selected.
    pub fn toggle_selected(&mut self, index: usize) -> ChartResult<bool> {
        if index >= self.tables.len() {
            return Err(ChartError::UnknownTable(index));
        }
        if let Some(position) = self.selection.iter().position(|&selected| selected == index) {
            self.selection.remove(position);
            Ok(false)
        } else {
            self.selection.push(index);
            Ok(true)
        }
    }

    /// Replaces the whole selection. Duplicates keep their first position.
    pub fn set_selection(&mut self, selection: &[usize]) -> ChartResult<()> {
        if let Some(&bad) = selection.iter().find(|&&index| index >= self.tables.len()) {
            return Err(ChartError::UnknownTable(bad));
        }
        let unique: IndexSet<usize> = selection.iter().copied().collect();
        self.selection = unique.into_iter().collect();
        Ok(())
    }

    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    #[must_use]
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn selected(&self) -> impl Iterator<Item = SelectedTable<'_>> {
        self.selection
            .iter()
            .enumerate()
            .filter_map(|(color_index, &table_index)| {
                self.tables.get(table_index).map(|table| SelectedTable {
                    table_index,
                    color_index,
                    table,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{Table, TableSet};
    use crate::ChartError;

    fn table(title: &str) -> Table {
        Table::new(title, vec!["Button".to_owned()], vec![vec!["Play".to_owned()]])
            .expect("table")
    }

    #[test]
    fn short_rows_are_padded_to_headers() {
        let table = Table::new(
            "t",
            vec!["a".to_owned(), "b".to_owned()],
            vec![vec!["1".to_owned()]],
        )
        .expect("table");
        let row = &table.rows()[0];
        assert_eq!(row.get("a"), Some("1"));
        assert_eq!(row.get("b"), Some(""));
        assert_eq!(row.headers().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = Table::new("t", vec!["a".to_owned(), "a".to_owned()], Vec::new())
            .expect_err("duplicate headers");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn removing_a_table_shifts_selection() {
        let mut set = TableSet::new();
        for title in ["a", "b", "c", "d"] {
            set.push(table(title));
        }
        set.set_selection(&[3, 1, 2]).expect("selection");

        set.remove(1).expect("remove");

        assert_eq!(set.selection(), &[2, 1]);
        let titles: Vec<_> = set.selected().map(|s| s.table.title().to_owned()).collect();
        assert_eq!(titles, vec!["d", "c"]);
    }

    #[test]
    fn toggle_keeps_first_selection_order() {
        let mut set = TableSet::new();
        set.push(table("a"));
        set.push(table("b"));

        assert!(set.toggle_selected(1).expect("toggle"));
        assert!(set.toggle_selected(0).expect("toggle"));
        let colors: Vec<_> = set
            .selected()
            .map(|s| (s.table_index, s.color_index))
            .collect();
        assert_eq!(colors, vec![(1, 0), (0, 1)]);

        assert!(!set.toggle_selected(1).expect("toggle"));
        assert_eq!(set.selection(), &[0]);
        assert!(matches!(
            set.toggle_selected(9),
            Err(ChartError::UnknownTable(9))
        ));
    }

    #[test]
    fn rename_trims_and_rejects_blank() {
        let mut set = TableSet::new();
        set.push(table("a"));
        set.rename(0, "  Team Rover  ").expect("rename");
        assert_eq!(set.get(0).map(Table::title), Some("Team Rover"));
        assert!(set.rename(0, "   ").is_err());
        assert_eq!(set.get(0).map(Table::title), Some("Team Rover"));
    }
}
