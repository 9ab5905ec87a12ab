//! Calendar content produced by the views.
//!
//! A [`Markup`] is a list of rows; each row divides the popup's inner width
//! between its cells in proportion to their `span`. Clickable cells carry
//! [`ClickAction`] tags instead of class names, so dispatch is a plain match.

use chrono::NaiveDate;

/// Semantic click targets understood by the views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    PrevMonth,
    NextMonth,
    ShowMonths,
    ShowYears,
    SelectDay(NaiveDate),
    Today,
    Clear,
    Close,
    SelectMonth(u32),
    SelectYear(i32),
}

/// Visual state of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlags {
    /// Holds the highlighted date; receives focus after render
    pub current: bool,
    pub selected: bool,
    pub today: bool,
    /// Day belonging to the previous/next month
    pub edge: bool,
    pub disabled: bool,
    pub heading: bool,
}

/// Position of a cell inside a [`Markup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub actions: Vec<ClickAction>,
    pub flags: CellFlags,
    pub focusable: bool,
    pub span: u16,
}

impl Cell {
    /// Non-interactive text
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
            flags: CellFlags::default(),
            focusable: false,
            span: 1,
        }
    }

    /// Focusable cell that dispatches `action` when clicked
    pub fn button(text: impl Into<String>, action: ClickAction) -> Self {
        Self {
            text: text.into(),
            actions: vec![action],
            flags: CellFlags::default(),
            focusable: true,
            span: 1,
        }
    }

    pub fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_span(mut self, span: u16) -> Self {
        self.span = span.max(1);
        self
    }

    pub fn heading(mut self) -> Self {
        self.flags.heading = true;
        self
    }
}

/// Rendered view content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub rows: Vec<Vec<Cell>>,
    /// Inner width in terminal columns
    pub width: u16,
}

impl Markup {
    pub fn new(width: u16) -> Self {
        Self { rows: Vec::new(), width }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.rows.len()).unwrap_or(u16::MAX)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.rows.get(id.row).and_then(|row| row.get(id.col))
    }

    /// First cell flagged as current
    pub fn current_cell(&self) -> Option<CellId> {
        self.find(|cell| cell.flags.current)
    }

    pub fn find(&self, pred: impl Fn(&Cell) -> bool) -> Option<CellId> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(&pred)
                .map(|c| CellId::new(r, c))
        })
    }

    /// Column offset and width of a cell relative to the inner area
    pub fn cell_bounds(&self, id: CellId) -> Option<(u16, u16)> {
        let row = self.rows.get(id.row)?;
        if id.col >= row.len() {
            return None;
        }
        let total: u32 = row.iter().map(|c| u32::from(c.span)).sum();
        let before: u32 = row[..id.col].iter().map(|c| u32::from(c.span)).sum();
        let through = before + u32::from(row[id.col].span);
        let width = u32::from(self.width);
        let start = before * width / total;
        let end = through * width / total;
        Some((start as u16, (end - start) as u16))
    }

    /// Cell under a point relative to the inner area's top-left corner
    pub fn hit_test(&self, x: u16, y: u16) -> Option<CellId> {
        let row = usize::from(y);
        let cells = self.rows.get(row)?;
        (0..cells.len())
            .map(|col| CellId::new(row, col))
            .find(|id| {
                self.cell_bounds(*id)
                    .is_some_and(|(start, width)| x >= start && x < start + width)
            })
    }
}
