use super::model::{SOLVER_COLUMN_COUNT, SolverTable};
use crate::common::constants::SOLVER_COMMENT_MARKER;
use crate::domain::{AcraError, ParserResult};

pub fn parse_solver_output(output: &str) -> ParserResult<SolverTable> {
    let mut rows = Vec::new();

    for (index, line) in output.lines().enumerate() {
        if line.starts_with(SOLVER_COMMENT_MARKER) || line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(line, index + 1)?);
    }

    if rows.is_empty() {
        return Err(AcraError::parse(
            "PARSE.SOLVER_EMPTY",
            "solver output contains no data rows",
        ));
    }

    Ok(SolverTable::new(rows))
}

fn parse_row(line: &str, line_number: usize) -> ParserResult<[f64; SOLVER_COLUMN_COUNT]> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() != SOLVER_COLUMN_COUNT {
        return Err(AcraError::parse(
            "PARSE.SOLVER_ROW",
            format!(
                "line {}: expected {} fields but found {}",
                line_number,
                SOLVER_COLUMN_COUNT,
                fields.len()
            ),
        ));
    }

    let mut row = [0.0; SOLVER_COLUMN_COUNT];
    for (slot, field) in row.iter_mut().zip(&fields) {
        *slot = parse_real(field).ok_or_else(|| {
            AcraError::parse(
                "PARSE.SOLVER_NUMBER",
                format!("line {}: '{}' is not a finite number", line_number, field),
            )
        })?;
    }
    Ok(row)
}

/// Accepts Fortran double-precision exponents (`1.5D+02`). NaN and infinity
/// are rejected since the result document has no encoding for them.
fn parse_real(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .or_else(|| token.replace(['D', 'd'], "e").parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::parse_solver_output;
    use crate::domain::AcraErrorCategory;
    use crate::modules::solver::SolverColumn;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let output = "# ACRANEB2 single column\n# p hr_sw hr_lw tau_d tau_u\n\
                      10000.0 1.5 -0.5 0.01 0.02\n\n\
                      50000.0 2.5 -1.5 0.03 0.04\n";

        let table = parse_solver_output(output).expect("output should parse");
        assert_eq!(table.level_count(), 2);
        assert_eq!(table.column(SolverColumn::Pressure), vec![10000.0, 50000.0]);
        assert_eq!(
            table.column(SolverColumn::HeatingRateLongwave),
            vec![-0.5, -1.5]
        );
    }

    #[test]
    fn single_row_output_is_still_a_table() {
        let table = parse_solver_output("1 2 3 4 5").expect("output should parse");
        assert_eq!(table.rows(), &[[1.0, 2.0, 3.0, 4.0, 5.0]]);
    }

    #[test]
    fn fortran_exponents_are_accepted() {
        let table = parse_solver_output("1.0D+05 2.5d-01 -1.0E+00 0.0 3.0D0\n")
            .expect("output should parse");
        assert_eq!(table.rows(), &[[1.0e5, 0.25, -1.0, 0.0, 3.0]]);
    }

    #[test]
    fn indented_hash_is_not_a_comment() {
        let error = parse_solver_output("  # not a comment\n").expect_err("bad row");
        assert_eq!(error.placeholder(), "PARSE.SOLVER_ROW");
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let error = parse_solver_output("# header\n1 2 3 4 5\n1 2 3 4\n").expect_err("short row");

        assert_eq!(error.category(), AcraErrorCategory::ParseError);
        assert_eq!(error.placeholder(), "PARSE.SOLVER_ROW");
        assert_eq!(error.message(), "line 3: expected 5 fields but found 4");
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let error = parse_solver_output("1 2 three 4 5\n").expect_err("bad number");
        assert_eq!(error.placeholder(), "PARSE.SOLVER_NUMBER");
        assert!(error.message().contains("'three'"));
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        for output in ["nan 1 2 0.1 0.2\n", "1 2 inf 0.1 0.2\n", "1 2 3 -Infinity 0.2\n", "1 2 3 4 1.0D+400\n"] {
            let error = parse_solver_output(output).expect_err("non-finite field");
            assert_eq!(error.category(), AcraErrorCategory::ParseError, "{}", output);
            assert_eq!(error.placeholder(), "PARSE.SOLVER_NUMBER", "{}", output);
        }
    }

    #[test]
    fn comment_only_output_is_empty() {
        let error = parse_solver_output("# nothing\n# here\n").expect_err("no rows");
        assert_eq!(error.placeholder(), "PARSE.SOLVER_EMPTY");
    }
}
