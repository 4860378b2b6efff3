// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::util::pad_to_width;

/// A column of a [`Table`] rendering rows of type `T`.
pub trait TableColumn<T> {
    fn name(&self) -> &'static str;
    fn format(&self, data: &T) -> String;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

const SEPARATOR: &str = " ";

/// Aligned plain-text table, widths measured in terminal columns.
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    header: bool,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            header: false,
        }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    fn widths(&self, cells: &[Vec<String>]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let header = if self.header { col.name().width() } else { 0 };
                cells
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.width())
                    .fold(header, usize::max)
            })
            .collect()
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();
        let widths = self.widths(&cells);
        let last = self.columns.len().saturating_sub(1);

        if self.header {
            for (i, (col, width)) in self.columns.iter().zip(&widths).enumerate() {
                let left = col.padding_direction() == PaddingDirection::Left;
                // Last column does not need padding if it's left-aligned
                let name = if i == last && left {
                    col.name().to_string()
                } else {
                    pad_to_width(col.name(), *width, left)
                };
                let sep = if i == last { "\n" } else { SEPARATOR };
                write!(f, "{}{sep}", name.bold())?;
            }
        }

        for (row, data) in cells.into_iter().zip(self.data) {
            for (i, ((col, width), cell)) in self.columns.iter().zip(&widths).zip(row).enumerate() {
                let left = col.padding_direction() == PaddingDirection::Left;
                let cell = if i == last && left {
                    cell
                } else {
                    pad_to_width(&cell, *width, left)
                };
                match col.color(data) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                let sep = if i == last { "\n" } else { SEPARATOR };
                write!(f, "{sep}")?;
            }
        }

        Ok(())
    }
}
