//! Faceting: splitting one chart into a grid or wrapped sequence of panels.
//!
//! A facet specification partitions the dataset's records by one or two
//! keys. Every record lands in exactly one panel, so the union of panel
//! row sets equals the dataset with no duplication or omission.

use super::Channel;
use crate::chart::Dataset;
use crate::error::{Error, Result};

/// Faceting specification.
#[derive(Debug, Clone, Default)]
pub enum Facet {
    /// Single panel holding every record.
    #[default]
    None,
    /// One panel per level of `key`, laid out in a wrapped sequence.
    Wrap {
        /// Column to partition by.
        key: String,
        /// Number of panel columns; defaults to ceil(sqrt(levels)).
        ncol: Option<usize>,
    },
    /// Panel grid over the cross product of two keys' levels.
    Grid {
        /// Column whose levels become grid rows.
        row: String,
        /// Column whose levels become grid columns.
        col: String,
    },
}

impl Facet {
    /// No faceting.
    #[must_use]
    pub fn none() -> Self {
        Facet::None
    }

    /// Wrap panels over the levels of `key`.
    #[must_use]
    pub fn wrap(key: &str) -> Self {
        Facet::Wrap {
            key: key.to_string(),
            ncol: None,
        }
    }

    /// Wrap panels with an explicit column count.
    #[must_use]
    pub fn wrap_ncol(key: &str, ncol: usize) -> Self {
        Facet::Wrap {
            key: key.to_string(),
            ncol: Some(ncol.max(1)),
        }
    }

    /// Grid panels over the cross product of `row` and `col` levels.
    #[must_use]
    pub fn grid(row: &str, col: &str) -> Self {
        Facet::Grid {
            row: row.to_string(),
            col: col.to_string(),
        }
    }

    /// Columns this specification partitions by.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Facet::None => Vec::new(),
            Facet::Wrap { key, .. } => vec![key.as_str()],
            Facet::Grid { row, col } => vec![row.as_str(), col.as_str()],
        }
    }

    /// Partition a dataset into panels.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMapping` if a facet key names a column absent from
    /// the dataset schema.
    pub fn partition(&self, data: &Dataset) -> Result<FacetLayout> {
        for key in self.keys() {
            if !data.has_column(key) {
                return Err(Error::InvalidMapping {
                    channel: Channel::Facet,
                    column: key.to_string(),
                });
            }
        }

        match self {
            Facet::None => Ok(FacetLayout {
                n_rows: 1,
                n_cols: 1,
                panels: vec![FacetPanel {
                    label: String::new(),
                    row: 0,
                    col: 0,
                    indices: (0..data.n_rows()).collect(),
                }],
            }),
            Facet::Wrap { key, ncol } => {
                let labels = row_labels(data, key);
                let levels = data.levels(key);
                let k = levels.len().max(1);
                let n_cols = ncol.unwrap_or_else(|| (k as f32).sqrt().ceil() as usize).max(1);
                let n_rows = k.div_ceil(n_cols);

                let panels = levels
                    .iter()
                    .enumerate()
                    .map(|(i, level)| FacetPanel {
                        label: level.clone(),
                        row: i / n_cols,
                        col: i % n_cols,
                        indices: matching_rows(&labels, |l| l == level.as_str()),
                    })
                    .collect();

                Ok(FacetLayout {
                    n_rows,
                    n_cols,
                    panels,
                })
            }
            Facet::Grid { row, col } => {
                let row_level_of = row_labels(data, row);
                let col_level_of = row_labels(data, col);
                let row_levels = data.levels(row);
                let col_levels = data.levels(col);

                let mut panels = Vec::with_capacity(row_levels.len() * col_levels.len());
                for (ri, r_level) in row_levels.iter().enumerate() {
                    for (ci, c_level) in col_levels.iter().enumerate() {
                        let indices = (0..data.n_rows())
                            .filter(|&i| {
                                row_level_of[i] == *r_level && col_level_of[i] == *c_level
                            })
                            .collect();
                        panels.push(FacetPanel {
                            label: format!("{r_level} / {c_level}"),
                            row: ri,
                            col: ci,
                            indices,
                        });
                    }
                }

                Ok(FacetLayout {
                    n_rows: row_levels.len().max(1),
                    n_cols: col_levels.len().max(1),
                    panels,
                })
            }
        }
    }
}

/// Per-row facet label for a key column. Rows without a value (short or
/// missing cells) fall into the "NA" level.
fn row_labels(data: &Dataset, key: &str) -> Vec<String> {
    let col = data.values(key).unwrap_or(&[]);
    (0..data.n_rows())
        .map(|i| col.get(i).map_or_else(|| "NA".to_string(), super::Value::label))
        .collect()
}

fn matching_rows(labels: &[String], pred: impl Fn(&str) -> bool) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, l)| pred(l))
        .map(|(i, _)| i)
        .collect()
}

/// One panel of a faceted chart.
#[derive(Debug, Clone)]
pub struct FacetPanel {
    /// Level label shown on the panel strip.
    pub label: String,
    /// Grid row of the panel.
    pub row: usize,
    /// Grid column of the panel.
    pub col: usize,
    /// Dataset row indices owned by this panel.
    pub indices: Vec<usize>,
}

/// The computed panel layout of a chart.
#[derive(Debug, Clone)]
pub struct FacetLayout {
    /// Number of panel rows.
    pub n_rows: usize,
    /// Number of panel columns.
    pub n_cols: usize,
    /// Panels in row-major order.
    pub panels: Vec<FacetPanel>,
}

impl FacetLayout {
    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the layout holds no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut data = Dataset::new();
        data.add_numeric("x", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        data.add_numeric("y", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        data.add_categorical("kind", &["a", "b", "c", "a", "b", "a"]);
        data.add_categorical("side", &["l", "l", "r", "r", "l", "r"]);
        data
    }

    #[test]
    fn test_no_facet_single_panel() {
        let layout = Facet::none().partition(&sample()).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.panels[0].indices.len(), 6);
    }

    #[test]
    fn test_wrap_panel_count_matches_levels() {
        let layout = Facet::wrap("kind").partition(&sample()).unwrap();
        assert_eq!(layout.len(), 3);
    }

    #[test]
    fn test_wrap_union_covers_all_rows_exactly_once() {
        let layout = Facet::wrap("kind").partition(&sample()).unwrap();

        let mut all: Vec<usize> = layout
            .panels
            .iter()
            .flat_map(|p| p.indices.iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_wrap_panel_membership() {
        let layout = Facet::wrap("kind").partition(&sample()).unwrap();
        assert_eq!(layout.panels[0].label, "a");
        assert_eq!(layout.panels[0].indices, vec![0, 3, 5]);
        assert_eq!(layout.panels[1].label, "b");
        assert_eq!(layout.panels[1].indices, vec![1, 4]);
    }

    #[test]
    fn test_wrap_default_ncol() {
        // 3 levels -> ceil(sqrt(3)) = 2 columns, 2 rows
        let layout = Facet::wrap("kind").partition(&sample()).unwrap();
        assert_eq!(layout.n_cols, 2);
        assert_eq!(layout.n_rows, 2);
    }

    #[test]
    fn test_wrap_explicit_ncol() {
        let layout = Facet::wrap_ncol("kind", 3).partition(&sample()).unwrap();
        assert_eq!(layout.n_cols, 3);
        assert_eq!(layout.n_rows, 1);
        assert_eq!(layout.panels[2].col, 2);
        assert_eq!(layout.panels[2].row, 0);
    }

    #[test]
    fn test_grid_cross_product() {
        let layout = Facet::grid("kind", "side").partition(&sample()).unwrap();
        // 3 kinds x 2 sides
        assert_eq!(layout.len(), 6);
        assert_eq!(layout.n_rows, 3);
        assert_eq!(layout.n_cols, 2);
    }

    #[test]
    fn test_grid_empty_combination_has_empty_panel() {
        let layout = Facet::grid("kind", "side").partition(&sample()).unwrap();
        // kind=c only appears with side=r, so (c, l) is empty
        let empty = layout
            .panels
            .iter()
            .find(|p| p.label == "c / l")
            .expect("panel exists for empty combination");
        assert!(empty.indices.is_empty());
    }

    #[test]
    fn test_grid_union_covers_all_rows_exactly_once() {
        let layout = Facet::grid("kind", "side").partition(&sample()).unwrap();

        let mut all: Vec<usize> = layout
            .panels
            .iter()
            .flat_map(|p| p.indices.iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unknown_key_is_invalid_mapping() {
        let err = Facet::wrap("nope").partition(&sample()).expect_err("must fail");
        assert!(matches!(
            err,
            Error::InvalidMapping {
                channel: Channel::Facet,
                column,
            } if column == "nope"
        ));
    }

    #[test]
    fn test_wrap_on_numeric_column_uses_value_levels() {
        let mut data = Dataset::new();
        data.add_numeric("x", &[1.0, 2.0, 3.0]);
        data.add_numeric("y", &[1.0, 2.0, 3.0]);
        data.add_numeric("cyl", &[4.0, 6.0, 4.0]);

        let layout = Facet::wrap("cyl").partition(&data).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.panels[0].label, "4");
        assert_eq!(layout.panels[0].indices, vec![0, 2]);
    }

    #[test]
    fn test_facet_keys() {
        assert!(Facet::none().keys().is_empty());
        assert_eq!(Facet::wrap("k").keys(), vec!["k"]);
        assert_eq!(Facet::grid("r", "c").keys(), vec!["r", "c"]);
    }

    #[test]
    fn test_partition_is_deterministic() {
        let data = sample();
        let a = Facet::wrap("kind").partition(&data).unwrap();
        let b = Facet::wrap("kind").partition(&data).unwrap();
        let labels_a: Vec<_> = a.panels.iter().map(|p| p.label.clone()).collect();
        let labels_b: Vec<_> = b.panels.iter().map(|p| p.label.clone()).collect();
        assert_eq!(labels_a, labels_b);
    }
}
