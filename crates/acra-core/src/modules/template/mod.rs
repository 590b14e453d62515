//! Namelist templates in the Jinja syntax the solver inputs are written in:
//! `{{ NAME }}` substitutions with the `join` and `length` filters,
//! `{% if [not] NAME %}` with optional `{% else %}`, `{% for x in NAME %}` with
//! the `loop.*` variables, `{# ... #}` comments and `-` whitespace control.
//!
//! Values render as Fortran namelist literals rather than Python reprs.

mod model;
mod parser;

pub use model::{TemplateContext, TemplateValue, format_real};

use crate::domain::{AcraError, AcraResult};
use model::format_reals;
use parser::{Expression, Filter, Node, parse_template};
use std::fs;
use std::path::Path;

/// A parsed namelist template; rendering is a pure function of the context.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> AcraResult<Self> {
        Ok(Self {
            nodes: parse_template(source)?,
        })
    }

    pub fn load(path: &Path) -> AcraResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| {
            AcraError::config_io(
                "IO.TEMPLATE_READ",
                format!("{}: {}", path.display(), source),
            )
        })?;
        Self::parse(&source).map_err(|error| {
            AcraError::new(
                error.category(),
                error.placeholder(),
                format!("{}: {}", path.display(), error.message()),
            )
        })
    }

    pub fn render(&self, context: &TemplateContext) -> AcraResult<String> {
        let mut scope = Scope {
            context,
            locals: Vec::new(),
        };
        let mut rendered = String::new();
        render_nodes(&self.nodes, &mut scope, &mut rendered)?;
        Ok(rendered)
    }
}

/// Case context plus the variables bound by enclosing loops, innermost last.
struct Scope<'a> {
    context: &'a TemplateContext,
    locals: Vec<(String, TemplateValue)>,
}

impl Scope<'_> {
    fn lookup(&self, name: &str, line: usize) -> AcraResult<&TemplateValue> {
        self.locals
            .iter()
            .rev()
            .find(|(local, _)| local == name)
            .map(|(_, value)| value)
            .or_else(|| self.context.get(name))
            .ok_or_else(|| {
                AcraError::template_render(
                    "TEMPLATE.UNDEFINED",
                    format!("line {}: '{}' is not defined for this case", line, name),
                )
            })
    }

    fn evaluate(&self, expression: &Expression) -> AcraResult<TemplateValue> {
        let value = self.lookup(&expression.name, expression.line)?.clone();
        expression
            .filters
            .iter()
            .try_fold(value, |value, filter| apply_filter(filter, value, expression))
    }
}

fn render_nodes(nodes: &[Node], scope: &mut Scope<'_>, out: &mut String) -> AcraResult<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Output(expression) => {
                let value = scope.evaluate(expression)?;
                out.push_str(&value.render(&expression.name)?);
            }
            Node::Conditional {
                negated,
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if scope.evaluate(condition)?.is_truthy() != *negated {
                    then_branch
                } else {
                    else_branch
                };
                render_nodes(branch, scope, out)?;
            }
            Node::Loop {
                variable,
                iterable,
                body,
            } => {
                let values = match scope.evaluate(iterable)? {
                    TemplateValue::RealArray(values) => values,
                    other => {
                        return Err(AcraError::template_render(
                            "TEMPLATE.NOT_ITERABLE",
                            format!(
                                "line {}: cannot loop over {} '{}'",
                                iterable.line,
                                other.kind(),
                                iterable.name
                            ),
                        ));
                    }
                };
                render_loop(variable, &values, body, scope, out)?;
            }
        }
    }
    Ok(())
}

fn render_loop(
    variable: &str,
    values: &[f64],
    body: &[Node],
    scope: &mut Scope<'_>,
    out: &mut String,
) -> AcraResult<()> {
    let length = values.len();
    for (index, value) in values.iter().enumerate() {
        let mark = scope.locals.len();
        scope.locals.extend([
            (variable.to_string(), TemplateValue::Real(*value)),
            ("loop.index".to_string(), count(index + 1)),
            ("loop.index0".to_string(), count(index)),
            ("loop.first".to_string(), TemplateValue::Bool(index == 0)),
            ("loop.last".to_string(), TemplateValue::Bool(index + 1 == length)),
            ("loop.length".to_string(), count(length)),
        ]);
        let rendered = render_nodes(body, scope, out);
        scope.locals.truncate(mark);
        rendered?;
    }
    Ok(())
}

fn apply_filter(
    filter: &Filter,
    value: TemplateValue,
    expression: &Expression,
) -> AcraResult<TemplateValue> {
    match (filter, value) {
        (Filter::Join(separator), TemplateValue::RealArray(values)) => {
            format_reals(&expression.name, &values)
                .map(|rendered| TemplateValue::Text(rendered.join(separator)))
        }
        (Filter::Length, TemplateValue::RealArray(values)) => Ok(count(values.len())),
        (Filter::Length, TemplateValue::Text(text)) => Ok(count(text.chars().count())),
        (filter, value) => Err(AcraError::template_render(
            "TEMPLATE.FILTER_TYPE",
            format!(
                "line {}: '{}' cannot be applied to {} '{}'",
                expression.line,
                filter.name(),
                value.kind(),
                expression.name
            ),
        )),
    }
}

fn count(value: usize) -> TemplateValue {
    TemplateValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}
