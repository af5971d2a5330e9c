//! Column-major dataset with typed variables.

use rustc_hash::FxHashMap;

use super::variable::{Variable, VariableKind};
use super::DataType;
use crate::errors::ValidationError;

/// An ordered set of named variables and an ordered set of cases.
///
/// Cells are stored column-major as `f64`. Discrete cells are validated on
/// construction to be integral codes in `0..num_categories`, so `get_int`
/// never has to round.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    name: String,
    variables: Vec<Variable>,
    index: FxHashMap<String, usize>,
    columns: Vec<Vec<f64>>,
    num_rows: usize,
}

impl DataSet {
    /// Build a dataset from row-major cases.
    pub fn from_rows(
        name: impl Into<String>,
        variables: Vec<Variable>,
        rows: &[Vec<f64>],
    ) -> Result<Self, ValidationError> {
        let width = variables.len();
        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ValidationError::RaggedRow {
                    row: r,
                    expected: width,
                    actual: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                columns[c].push(value);
            }
        }
        Self::from_columns(name, variables, columns)
    }

    /// Build a dataset from one vector per variable.
    pub fn from_columns(
        name: impl Into<String>,
        variables: Vec<Variable>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        let num_rows = columns.first().map_or(0, Vec::len);

        let mut index = FxHashMap::default();
        for (i, variable) in variables.iter().enumerate() {
            if index.insert(variable.name.clone(), i).is_some() {
                return Err(ValidationError::DuplicateVariable {
                    name: variable.name.clone(),
                });
            }
        }

        if columns.len() != variables.len() {
            return Err(ValidationError::RaggedRow {
                row: 0,
                expected: variables.len(),
                actual: columns.len(),
            });
        }

        for (variable, column) in variables.iter().zip(&columns) {
            if column.len() != num_rows {
                return Err(ValidationError::RaggedColumn {
                    variable: variable.name.clone(),
                    expected: num_rows,
                    actual: column.len(),
                });
            }
            validate_column(variable, column)?;
        }

        Ok(Self {
            name: name.into(),
            variables,
            index,
            columns,
            num_rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column index of `name`, or `UnknownVariable`.
    pub fn require_index(&self, name: &str) -> Result<usize, ValidationError> {
        self.index_of(name)
            .ok_or_else(|| ValidationError::UnknownVariable {
                name: name.to_string(),
            })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.variables.len()
    }

    /// Cell value as a real number.
    ///
    /// # Panics
    /// Panics if `row` or `column` is out of bounds, like slice indexing.
    pub fn get_double(&self, row: usize, column: usize) -> f64 {
        self.columns[column][row]
    }

    /// Cell value as a category code, `None` for continuous columns.
    pub fn get_int(&self, row: usize, column: usize) -> Option<u32> {
        if self.variables[column].is_discrete() {
            Some(self.columns[column][row] as u32)
        } else {
            None
        }
    }

    pub fn column(&self, column: usize) -> &[f64] {
        &self.columns[column]
    }

    /// The column for `name`, or `UnknownVariable`.
    pub fn column_by_name(&self, name: &str) -> Result<&[f64], ValidationError> {
        let i = self.require_index(name)?;
        Ok(&self.columns[i])
    }

    /// Continuous if every variable is continuous, discrete if every variable
    /// is discrete, mixed otherwise. An empty dataset counts as continuous.
    pub fn data_type(&self) -> DataType {
        let continuous = self.variables.iter().filter(|v| v.is_continuous()).count();
        if continuous == self.variables.len() {
            DataType::Continuous
        } else if continuous == 0 {
            DataType::Discrete
        } else {
            DataType::Mixed
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.data_type() == DataType::Continuous
    }

    /// The dataset restricted to its continuous columns.
    pub fn continuous_subset(&self) -> DataSet {
        let keep: Vec<usize> = (0..self.variables.len())
            .filter(|&i| self.variables[i].is_continuous())
            .collect();
        self.project(&keep)
    }

    /// The dataset restricted to `names`, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<DataSet, ValidationError> {
        let keep = names
            .iter()
            .map(|n| self.require_index(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.project(&keep))
    }

    /// Check that `name` can serve as a binary response: discrete codes must
    /// all be 0 or 1, continuous values must all be exactly 0.0 or 1.0.
    pub fn validate_binary_response(&self, name: &str) -> Result<(), ValidationError> {
        let column = self.require_index(name)?;
        for (row, &value) in self.columns[column].iter().enumerate() {
            if value != 0.0 && value != 1.0 {
                return Err(ValidationError::NonBinaryResponse {
                    variable: name.to_string(),
                    row,
                    value,
                });
            }
        }
        Ok(())
    }

    fn project(&self, keep: &[usize]) -> DataSet {
        let variables: Vec<Variable> = keep.iter().map(|&i| self.variables[i].clone()).collect();
        let index = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.clone(), i))
            .collect();
        DataSet {
            name: self.name.clone(),
            variables,
            index,
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            num_rows: self.num_rows,
        }
    }
}

fn validate_column(variable: &Variable, column: &[f64]) -> Result<(), ValidationError> {
    for (row, &value) in column.iter().enumerate() {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                variable: variable.name.clone(),
                row,
            });
        }
        if let VariableKind::Discrete { num_categories } = variable.kind {
            if value < 0.0 || value.fract() != 0.0 || value >= f64::from(num_categories) {
                return Err(ValidationError::CategoryOutOfRange {
                    variable: variable.name.clone(),
                    row,
                    value,
                    categories: num_categories,
                });
            }
        }
    }
    Ok(())
}
