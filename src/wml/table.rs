//! Table helpers: grid spans, vertical merges, headers and widths.
use super::filter::CountFilter;
use super::{Attr, Document, NodeId, NodeType, Relation, Tag};
use crate::common::{Error, Result};

/// Twips (twentieths of a point) per centimetre.
pub const TWIPS_PER_CM: f64 = 567.0;

/// Marker stripped from header cell text.
const HEADER_MARKER: &str = "<*>";

impl Document {
    /// First `w:tr` of a table.
    fn first_row(&self, table: NodeId) -> Result<NodeId> {
        if let Some(row) = self.first_of(table, Tag::TRow)? {
            return Ok(row);
        }
        let seen: Vec<String> = self
            .as_stream_filtered(table, NodeType::Composite, Relation::Descendant, &mut CountFilter::new(10))?
            .filter_map(|id| self.kind(id).ok().map(|kind| kind.type_name()))
            .collect();
        Err(Error::Processing(format!(
            "w:tr wasn't found in table {}, first nodes: {}",
            table,
            seen.join(", ")
        )))
    }

    fn starts_vertical_merge(&self, cell: NodeId) -> Result<bool> {
        self.has_property(cell, Tag::TCellProp, Tag::VMerge, "val", "restart")
    }

    /// `w:vmerge` of the row's first cell.
    fn row_merging(&self, row: NodeId) -> Result<Option<NodeId>> {
        match self.first_of(row, Tag::TCell)? {
            Some(cell) => self.find_property_element(cell, Tag::TCellProp, Tag::VMerge),
            None => Ok(None),
        }
    }

    /// Whether the row's first cell continues a vertical merge.
    fn continues_vertical_merge(&self, row: NodeId) -> Result<bool> {
        match self.first_of(row, Tag::TCell)? {
            Some(cell) if !self.starts_vertical_merge(cell)? => Ok(self
                .find_property_element(cell, Tag::TCellProp, Tag::VMerge)?
                .is_some()),
            _ => Ok(false),
        }
    }

    /// Horizontal span of a cell; `0` unless `w:gridSpan` is greater than 1.
    pub fn grid_span_value(&self, cell: NodeId) -> Result<u32> {
        let Some(grid_span) = self.find_property_element(cell, Tag::TCellProp, Tag::GridSpan)? else {
            return Ok(0);
        };
        match self.find_attribute_by_name(grid_span, "val")? {
            Some(attr) => {
                let span: u32 = attr
                    .value
                    .trim()
                    .parse()
                    .map_err(|e| Error::Processing(format!("Invalid w:gridSpan '{}' on {}: {}", attr.value, cell, e)))?;
                Ok(if span > 1 { span } else { 0 })
            },
            None => Ok(0),
        }
    }

    /// Set a cell's `w:gridSpan`, creating the `w:tcPr` and `w:gridSpan` as
    /// needed. Spans of 1 or less leave the cell untouched.
    pub fn set_grid_span_value(&mut self, cell: NodeId, span: u32) -> Result<()> {
        if span <= 1 {
            return Ok(());
        }
        let value = span.to_string();
        let Some(tcpr) = self.find_property(cell, Tag::TCellProp)? else {
            let tcpr = self.create_element(Tag::TCellProp)?;
            let grid_span = self.create_with_attributes(Tag::GridSpan, [Attr::w("val", value)])?;
            self.add(tcpr, grid_span)?;
            return self.set_property(cell, tcpr);
        };
        match self.first_of(tcpr, Tag::GridSpan)? {
            Some(grid_span) => {
                let namespace = self
                    .find_attribute_by_name(grid_span, "val")?
                    .map_or_else(|| "w".to_string(), |a| a.namespace.clone());
                self.update_attribute_by_name(grid_span, "val", Attr::new(namespace, "val", value))
            },
            None => {
                let grid_span = self.create_with_attributes(Tag::GridSpan, [Attr::w("val", value)])?;
                self.add(tcpr, grid_span)
            },
        }
    }

    fn vmerge_property(&mut self, value: &str) -> Result<NodeId> {
        let tcpr = self.create_element(Tag::TCellProp)?;
        let vmerge = self.create_with_attributes(Tag::VMerge, [Attr::w("val", value)])?;
        self.add(tcpr, vmerge)?;
        Ok(tcpr)
    }

    /// Detached `w:tcPr` opening a vertical merge.
    #[inline]
    pub fn create_vmerge_start(&mut self) -> Result<NodeId> {
        self.vmerge_property("restart")
    }

    /// Detached `w:tcPr` continuing a vertical merge.
    #[inline]
    pub fn create_vmerge_continue(&mut self) -> Result<NodeId> {
        self.vmerge_property("continue")
    }

    /// Detached row with one cell per entry, each spanning that many grid
    /// columns.
    pub fn create_merged_row(&mut self, spans: &[u32]) -> Result<NodeId> {
        let row = self.create_element(Tag::TRow)?;
        for span in spans {
            let cell = self.create_element(Tag::TCell)?;
            self.set_grid_span_value(cell, *span)?;
            self.add(row, cell)?;
        }
        Ok(row)
    }

    /// Hide the horizontal inner border of a row through its `w:tblPrEx`.
    pub fn set_transparent_separator(&mut self, row: NodeId) -> Result<()> {
        let inside_h = self.create_with_attributes(
            Tag::InsideH,
            [Attr::w("val", "nil"), Attr::w("color", "000000"), Attr::w("sz", "0")],
        )?;
        let borders = self.create_element(Tag::TblBorders)?;
        self.add(borders, inside_h)?;
        let exceptions = self.create_element(Tag::TblPropEx)?;
        self.add(exceptions, borders)?;
        self.set_property(row, exceptions)
    }

    /// The row plus the following rows merged into it vertically.
    pub fn merged_rows(&self, row: NodeId) -> Result<Vec<NodeId>> {
        let mut rows = vec![row];
        let Some(cell) = self.first_of(row, Tag::TCell)? else {
            return Ok(rows);
        };
        if !self.starts_vertical_merge(cell)? {
            return Ok(rows);
        }
        let mut next = self.next(row)?;
        while let Some(candidate) = next
            && self.kind(candidate)?.is(Tag::TRow)
            && self.continues_vertical_merge(candidate)?
        {
            rows.push(candidate);
            next = self.next(candidate)?;
        }
        Ok(rows)
    }

    /// Every row of the table, grouped by vertical merge.
    pub fn all_merged_rows(&self, table: NodeId) -> Result<Vec<Vec<NodeId>>> {
        let mut groups = Vec::new();
        let mut current = Some(self.first_row(table)?);
        while let Some(row) = current
            && self.kind(row)?.is(Tag::TRow)
        {
            let group = self.merged_rows(row)?;
            current = match group.last() {
                Some(last) => self.next(*last)?,
                None => None,
            };
            groups.push(group);
        }
        Ok(groups)
    }

    /// Rows forming the table header: the first row and any rows merged
    /// into it.
    pub fn table_header(&self, table: NodeId) -> Result<Vec<NodeId>> {
        self.merged_rows(self.first_row(table)?)
    }

    /// Text of each first-row cell, with `<*>` markers removed and trimmed.
    pub fn table_headers(&self, table: NodeId) -> Result<Vec<String>> {
        let row = self.first_row(table)?;
        self.as_stream(row, Tag::TCell)?
            .map(|cell| {
                self.get_text(cell)
                    .map(|text| text.replace(HEADER_MARKER, "").trim().to_string())
            })
            .collect()
    }

    /// Sum of the `w:gridCol` widths, in centimetres.
    pub fn table_width_cm(&self, table: NodeId) -> Result<f64> {
        let Some(grid) = self.first_of(table, Tag::TblGrid)? else {
            return Ok(0.0);
        };
        let mut twips = 0i64;
        for column in self.as_stream(grid, Tag::GridCol)? {
            if let Some(attr) = self.find_attribute_by_name(column, "w")? {
                twips += attr.value.trim().parse::<i64>().map_err(|e| {
                    Error::Processing(format!("Invalid w:gridCol width '{}' on {}: {}", attr.value, column, e))
                })?;
            }
        }
        Ok(twips as f64 / TWIPS_PER_CM)
    }

    /// Whether the node sits anywhere below a table, row or cell.
    pub fn is_node_inside_table(&self, node: NodeId) -> Result<bool> {
        let mut current = self.parent(node)?;
        while let Some(parent) = current {
            if matches!(self.tag(parent)?, Some(Tag::TCell | Tag::TRow | Tag::Tbl)) {
                return Ok(true);
            }
            current = self.parent(parent)?;
        }
        Ok(false)
    }

    /// 1-based grid column of a cell, counting the spans of the cells before
    /// it. `None` if the cell is not found in its row.
    pub fn cell_position_counting_span(&self, cell: NodeId) -> Result<Option<usize>> {
        let row = self.get_parent(cell)?;
        if !self.kind(row)?.is(Tag::TRow) {
            return Err(Error::Processing(format!("Parent {} of cell {} is not a w:tr", row, cell)));
        }
        let mut position = 1;
        for current in self.as_stream(row, Tag::TCell)? {
            if current == cell {
                return Ok(Some(position));
            }
            position += match self.grid_span_value(current)? {
                0 => 1,
                span => span as usize,
            };
        }
        Ok(None)
    }

    /// Whether two rows have the same number of cells with the same text.
    pub fn rows_content_equal(&self, a: NodeId, b: NodeId) -> Result<bool> {
        let cells_a: Vec<NodeId> = self.as_stream(a, Tag::TCell)?.collect();
        let cells_b: Vec<NodeId> = self.as_stream(b, Tag::TCell)?.collect();
        if cells_a.len() != cells_b.len() {
            return Ok(false);
        }
        for (x, y) in cells_a.into_iter().zip(cells_b) {
            if self.get_text(x)? != self.get_text(y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether every `border` element under the row's cell borders is
    /// `w:val="nil"`. A row without such borders is not invisible.
    pub fn cells_have_invisible_border(&self, row: NodeId, border: Tag) -> Result<bool> {
        let mut found = 0usize;
        for cell in self.as_stream(row, Tag::TCell)? {
            for property in self.properties(cell)? {
                for borders in self.as_stream(*property, Tag::TCellBorders)? {
                    for side in self.as_stream(borders, border)? {
                        let nil = self
                            .attributes(side)?
                            .iter()
                            .any(|a| a.name == "val" && a.value == "nil");
                        if !nil {
                            return Ok(false);
                        }
                        found += 1;
                    }
                }
            }
        }
        Ok(found > 0)
    }

    /// Last row of the vertical merge the row belongs to, moving forward.
    pub fn skip_merged_rows(&self, row: NodeId) -> Result<NodeId> {
        let mut current = row;
        while let Some(next) = self.next(current)? {
            if self.row_merging(current)?.is_none() {
                break;
            }
            let Some(vmerge) = self.row_merging(next)? else {
                break;
            };
            if self.attributes(vmerge)?.contains(&Attr::w("val", "restart")) {
                break;
            }
            current = next;
        }
        Ok(current)
    }
}
