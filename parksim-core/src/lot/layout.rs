//! Lot design loading.
//!
//! A layout file is a comma-separated grid of spot labels, one row per line.
//! The first row fixes the width. A blank line, or the end of the file,
//! ends the layout section.

use std::fs;
use std::path::Path;

use super::car::CarType;
use super::spot::SpotPosition;
use crate::{LotError, Result};

/// Separator between spot labels on a row.
const SEPARATOR: char = ',';

/// Immutable grid of spot types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotLayout {
    rows: usize,
    columns: usize,
    cells: Vec<CarType>,
}

impl LotLayout {
    /// Builds a layout from explicit rows.
    ///
    /// # Errors
    ///
    /// - `LotError::EmptyLayout` - No rows, or a first row with no cells
    /// - `LotError::RowTooShort` - A row has fewer cells than the first row
    pub fn from_rows(rows: Vec<Vec<CarType>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(LotError::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(rows.len() * columns);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() < columns {
                return Err(LotError::RowTooShort {
                    row: row_index,
                    expected: columns,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(&row[..columns]);
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            cells,
        })
    }

    /// Parses layout text.
    ///
    /// # Errors
    ///
    /// - `LotError::EmptyLayout` - Text has no rows before the first blank line
    /// - `LotError::UnknownLabel` - A cell label does not name a spot type
    /// - `LotError::RowTooShort` - A row has fewer cells than the first row
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        let mut columns = None;

        for (row_index, line) in text.lines().map(str::trim_end).enumerate() {
            if line.trim().is_empty() {
                break;
            }

            let mut labels: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
            // trailing separators do not open a new column
            while labels.last().is_some_and(|label| label.is_empty()) {
                labels.pop();
            }
            let width = *columns.get_or_insert(labels.len());
            if labels.len() > width {
                tracing::warn!(
                    "Row {row_index} has {} cells, keeping the first {width}",
                    labels.len()
                );
            }

            let row = labels
                .iter()
                .take(width)
                .enumerate()
                .map(|(column, label)| {
                    CarType::from_label(label).ok_or_else(|| LotError::UnknownLabel {
                        label: label.to_string(),
                        row: row_index,
                        column,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    /// Reads and parses a layout file.
    ///
    /// # Errors
    ///
    /// - `LotError::Io` - File could not be read
    /// - Any error returned by [`LotLayout::parse`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let layout = Self::parse(&text)?;
        tracing::debug!(
            "Loaded {}x{} layout from {}",
            layout.rows,
            layout.columns,
            path.display()
        );
        Ok(layout)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Spot type at `position`, or `None` when out of range.
    pub fn spot_type(&self, position: SpotPosition) -> Option<CarType> {
        self.index_of(position).map(|index| self.cells[index])
    }

    /// Flat row-major index of `position`, or `None` when out of range.
    pub fn index_of(&self, position: SpotPosition) -> Option<usize> {
        (position.row < self.rows && position.column < self.columns)
            .then(|| position.row * self.columns + position.column)
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (SpotPosition, CarType)> + '_ {
        self.cells.iter().enumerate().map(|(index, &spot_type)| {
            (
                SpotPosition::new(index / self.columns, index % self.columns),
                spot_type,
            )
        })
    }

    /// Number of cells that can host a car.
    pub fn capacity(&self) -> usize {
        self.cells.iter().filter(|spot_type| !spot_type.is_na()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stops_at_blank_line() {
        let layout = LotLayout::parse("E, S, R\nL, N, R\n\nthis is not a layout\n").unwrap();

        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.columns(), 3);
        assert_eq!(
            layout.spot_type(SpotPosition::new(1, 1)),
            Some(CarType::Na)
        );
        assert_eq!(layout.capacity(), 5);
    }

    #[test]
    fn test_first_row_fixes_width() {
        let layout = LotLayout::parse("R, R\nS, S, L\n").unwrap();

        assert_eq!(layout.columns(), 2);
        assert_eq!(
            layout.spot_type(SpotPosition::new(1, 1)),
            Some(CarType::Small)
        );
        assert_eq!(layout.spot_type(SpotPosition::new(1, 2)), None);
    }

    #[test]
    fn test_trailing_separator_is_ignored() {
        let layout = LotLayout::parse("R, S,\nL, E,\n").unwrap();

        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.columns(), 2);
        assert_eq!(
            layout.spot_type(SpotPosition::new(1, 1)),
            Some(CarType::Electric)
        );
        assert_eq!(layout.capacity(), 4);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let result = LotLayout::parse("R, R, R\nS, S\n");
        assert!(matches!(
            result,
            Err(LotError::RowTooShort {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_unknown_label_reports_location() {
        let result = LotLayout::parse("R, R\nR, X\n");
        match result {
            Err(LotError::UnknownLabel { label, row, column }) => {
                assert_eq!(label, "X");
                assert_eq!((row, column), (1, 1));
            }
            other => panic!("expected unknown label error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(LotLayout::parse(""), Err(LotError::EmptyLayout)));
        assert!(matches!(
            LotLayout::parse("\nR, R\n"),
            Err(LotError::EmptyLayout)
        ));
    }

    #[test]
    fn test_cells_iterate_row_major() {
        let layout = LotLayout::parse("E, S\nR, L\n").unwrap();
        let order: Vec<_> = layout.cells().collect();

        assert_eq!(order[1], (SpotPosition::new(0, 1), CarType::Small));
        assert_eq!(order[2], (SpotPosition::new(1, 0), CarType::Regular));
    }
}
