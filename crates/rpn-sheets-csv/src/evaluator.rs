//! Formula evaluation over CSV records

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use rpn_sheets_core::{CellAddress, Error as CoreError};
use rpn_sheets_formula::{
    format_number, parse_rpn, FormulaResult, FunctionRegistry, MapVarTable, VarTable,
};

use crate::error::CsvResult;
use crate::options::CsvEvalOptions;
use crate::reader::RecordReader;
use crate::writer::RecordWriter;

/// Counters collected while evaluating a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    /// Records read, including blank lines
    pub rows: usize,
    /// Fields read (blank lines have none)
    pub cells: usize,
    /// Fields that started with the formula prefix
    pub formulas: usize,
    /// Formulas that produced a value
    pub evaluated: usize,
    /// Formulas replaced by the error text
    pub errors: usize,
}

/// Evaluates formula cells in CSV documents
///
/// Cells are visited top to bottom, left to right. A formula can only see numeric
/// cells and formula results that come before it.
#[derive(Debug, Clone)]
pub struct CsvEvaluator {
    options: CsvEvalOptions,
    functions: FunctionRegistry,
}

impl CsvEvaluator {
    /// Create an evaluator with the built-in math functions
    pub fn new(options: CsvEvalOptions) -> Self {
        Self::with_functions(options, FunctionRegistry::new())
    }

    /// Create an evaluator that resolves function calls against `functions`
    pub fn with_functions(options: CsvEvalOptions, functions: FunctionRegistry) -> Self {
        Self { options, functions }
    }

    /// Evaluator options
    pub fn options(&self) -> &CsvEvalOptions {
        &self.options
    }

    /// Functions available to formulas
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Read CSV from `reader`, evaluate every formula, and write the result to `writer`
    ///
    /// The input is buffered in full. Blank lines are copied to the output and keep
    /// their line number, so a cell's row is always the line it starts on. Formula
    /// errors never abort the run; only IO and CSV syntax errors do.
    pub fn evaluate<R: Read, W: Write>(&self, mut reader: R, writer: W) -> CsvResult<EvaluationStats> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;

        let mut records = RecordReader::new(&input, &self.options);
        let mut csv_writer = RecordWriter::new(writer, &self.options);

        let mut vars = MapVarTable::new();
        let mut stats = EvaluationStats::default();
        let mut record = csv::StringRecord::new();
        let mut output: Vec<String> = Vec::new();

        while let Some(position) = records.read(&mut record)? {
            for _ in 0..position.blank_lines_before {
                stats.rows += 1;
                csv_writer.write_blank()?;
            }

            let row = u32::try_from(position.line - 1)
                .map_err(|_| CoreError::InvalidAddress(format!("row {}", position.line)))?;
            stats.rows += 1;
            output.clear();

            for (col, field) in record.iter().enumerate() {
                let col = u32::try_from(col)
                    .map_err(|_| CoreError::InvalidAddress(format!("column {}", col + 1)))?;
                let key = CellAddress::new(row, col).to_a1_string();
                stats.cells += 1;

                let text = match field.strip_prefix(self.options.formula_prefix) {
                    Some(formula) => {
                        stats.formulas += 1;
                        match self.evaluate_formula(formula, &vars) {
                            Ok(value) => {
                                stats.evaluated += 1;
                                log::trace!("{} = {}", key, value);
                                vars.set(&key, value);
                                format_number(value)
                            }
                            Err(e) => {
                                stats.errors += 1;
                                log::debug!("{}: {}", key, e);
                                self.options.error_text.clone()
                            }
                        }
                    }
                    None => {
                        if let Ok(value) = field.trim().parse::<f64>() {
                            log::trace!("{} = {}", key, value);
                            vars.set(&key, value);
                        }
                        field.to_string()
                    }
                };
                output.push(text);
            }

            csv_writer.write_record(&output)?;
        }

        for _ in 0..records.trailing_blank_lines() {
            stats.rows += 1;
            csv_writer.write_blank()?;
        }

        csv_writer.flush()?;
        Ok(stats)
    }

    /// Evaluate the CSV file at `path`, writing the result to `writer`
    pub fn evaluate_file<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        writer: W,
    ) -> CsvResult<EvaluationStats> {
        let file = File::open(path)?;
        self.evaluate(file, writer)
    }

    /// Evaluate an in-memory CSV document
    pub fn evaluate_to_string(&self, input: &str) -> CsvResult<String> {
        let mut buffer = Vec::new();
        self.evaluate(input.as_bytes(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn evaluate_formula(&self, formula: &str, vars: &MapVarTable) -> FormulaResult<f64> {
        parse_rpn(formula, &self.functions)?.eval(vars)
    }
}

impl Default for CsvEvaluator {
    fn default() -> Self {
        Self::new(CsvEvalOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rpn_sheets_formula::UnaryFunction;

    fn run(input: &str) -> String {
        CsvEvaluator::default().evaluate_to_string(input).unwrap()
    }

    #[test]
    fn test_plain_cells_pass_through() {
        assert_eq!(run("x,1.5\nhello, world \n"), "x,1.5\nhello, world \n");
    }

    #[test]
    fn test_formula_references_earlier_cell() {
        assert_eq!(run("x,1.5\ny,=B1 4 * 1 +\n"), "x,1.5\ny,7.0\n");
    }

    #[test]
    fn test_formula_results_are_bound() {
        assert_eq!(
            run("x,1.5\ny,=B1 4 * 1 +\nz,=B1 B2 *\n"),
            "x,1.5\ny,7.0\nz,10.5\n"
        );
    }

    #[test]
    fn test_failed_formula_writes_error_text() {
        assert_eq!(run("x,=A1\n"), "x,#N/A\n");
        assert_eq!(run("=1 bar()\n"), "#N/A\n");
        assert_eq!(run("=B2,2\n"), "#N/A,2\n");
        assert_eq!(run("=notacell\n"), "#N/A\n");
        assert_eq!(run("1,=A1 4 abs()\n"), "1,#N/A\n");
        assert_eq!(run("=\n"), "#N/A\n");
    }

    #[test]
    fn test_failed_formula_is_not_bound() {
        assert_eq!(run("=1 +,=A1 1 +\n"), "#N/A,#N/A\n");
    }

    #[test]
    fn test_numeric_cells_are_trimmed_before_binding() {
        assert_eq!(run(" 2 ,=A1 A1 *\n"), " 2 ,4.0\n");
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert_eq!(run("1,=A1 1 +"), "1,2.0\n");
    }

    #[test]
    fn test_columns_past_z() {
        let mut input: Vec<String> = (1..=27).map(|n| n.to_string()).collect();
        input.push("=AA1 Z1 -".to_string());
        let output = run(&input.join(","));
        assert!(output.ends_with(",1.0\n"), "{}", output);
    }

    #[test]
    fn test_stats() {
        let mut buffer = Vec::new();
        let stats = CsvEvaluator::default()
            .evaluate("x,1.5\ny,=B1 2 *,=C9\n".as_bytes(), &mut buffer)
            .unwrap();
        assert_eq!(
            stats,
            EvaluationStats {
                rows: 2,
                cells: 5,
                formulas: 2,
                evaluated: 1,
                errors: 1,
            }
        );
    }

    #[test]
    fn test_blank_lines_keep_row_numbers() {
        let mut buffer = Vec::new();
        let stats = CsvEvaluator::default()
            .evaluate("2\n\n=A1 A3 *\n=A3 1 +\n\n".as_bytes(), &mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "2\n\n#N/A\n#N/A\n\n");
        assert_eq!(stats.rows, 5);
        assert_eq!(stats.cells, 3);

        assert_eq!(run("2\n\n=A1 3 *\n=A3 1 +\n"), "2\n\n6.0\n7.0\n");
    }

    #[test]
    fn test_custom_functions() {
        let functions: FunctionRegistry =
            [UnaryFunction::new("double", |x| 2.0 * x)].into_iter().collect();
        let evaluator = CsvEvaluator::with_functions(CsvEvalOptions::default(), functions);
        assert_eq!(
            evaluator.evaluate_to_string("=4 double(),=4 sqrt()\n").unwrap(),
            "8.0,#N/A\n"
        );
    }

    #[test]
    fn test_custom_error_text() {
        let options = CsvEvalOptions::default().with_error_text("ERR");
        let output = CsvEvaluator::new(options).evaluate_to_string("=x\n").unwrap();
        assert_eq!(output, "ERR\n");
    }
}
