use crate::domain::{AcraError, ParserResult};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Filter {
    Join(String),
    Length,
}

impl Filter {
    pub(super) const fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::Length => "length",
        }
    }
}

/// A variable path such as `ZDEOSI` or `loop.last`, followed by filters.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Expression {
    pub(super) name: String,
    pub(super) filters: Vec<Filter>,
    pub(super) line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Text(String),
    Output(Expression),
    Conditional {
        negated: bool,
        condition: Expression,
        then_branch: Vec<Node>,
        else_branch: Vec<Node>,
    },
    Loop {
        variable: String,
        iterable: Expression,
        body: Vec<Node>,
    },
}

#[derive(Debug)]
enum OpenBlock {
    Conditional {
        negated: bool,
        condition: Expression,
        then_branch: Vec<Node>,
        else_branch: Option<Vec<Node>>,
    },
    Loop {
        variable: String,
        iterable: Expression,
        body: Vec<Node>,
    },
}

impl OpenBlock {
    const fn keyword(&self) -> &'static str {
        match self {
            Self::Conditional { .. } => "if",
            Self::Loop { .. } => "for",
        }
    }

    const fn line(&self) -> usize {
        match self {
            Self::Conditional { condition, .. } => condition.line,
            Self::Loop { iterable, .. } => iterable.line,
        }
    }

    fn branch_mut(&mut self) -> &mut Vec<Node> {
        match self {
            Self::Conditional {
                then_branch,
                else_branch,
                ..
            } => match else_branch {
                Some(branch) => branch,
                None => then_branch,
            },
            Self::Loop { body, .. } => body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Expression,
    Statement,
    Comment,
}

impl TagKind {
    fn from_opening(opening: &str) -> Option<Self> {
        match opening {
            "{{" => Some(Self::Expression),
            "{%" => Some(Self::Statement),
            "{#" => Some(Self::Comment),
            _ => None,
        }
    }

    const fn closing(self) -> &'static str {
        match self {
            Self::Expression => "}}",
            Self::Statement => "%}",
            Self::Comment => "#}",
        }
    }
}

pub(super) fn parse_template(source: &str) -> ParserResult<Vec<Node>> {
    let mut root = Vec::new();
    let mut open: Vec<OpenBlock> = Vec::new();
    let mut cursor = 0;
    let mut search = 0;
    let mut trim_next = false;

    while let Some(relative) = source[search..].find('{') {
        let start = search + relative;
        let Some(kind) = source
            .get(start..start + 2)
            .and_then(TagKind::from_opening)
        else {
            search = start + 1;
            continue;
        };

        let line = line_number(source, start);
        let body_start = start + 2;
        let body_end = source[body_start..]
            .find(kind.closing())
            .map(|offset| body_start + offset)
            .ok_or_else(|| {
                AcraError::template_render(
                    "TEMPLATE.UNTERMINATED_TAG",
                    format!("line {}: tag is missing its closing '{}'", line, kind.closing()),
                )
            })?;

        // `{%-` and `-%}` strip whitespace on that side of the tag.
        let raw = &source[body_start..body_end];
        let (trim_before, raw) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (trim_after, raw) = match raw.strip_suffix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let text = clip(&source[cursor..start], trim_next, trim_before);
        push_text(current_branch(&mut root, &mut open), text);
        cursor = body_end + 2;
        search = cursor;
        trim_next = trim_after;

        let body = raw.trim();
        match kind {
            TagKind::Comment => {}
            TagKind::Expression => {
                let expression = parse_expression(body, line)?;
                current_branch(&mut root, &mut open).push(Node::Output(expression));
            }
            TagKind::Statement => apply_statement(body, line, &mut root, &mut open)?,
        }
    }
    let text = clip(&source[cursor..], trim_next, false);
    push_text(current_branch(&mut root, &mut open), text);

    if let Some(unclosed) = open.last() {
        return Err(AcraError::template_render(
            "TEMPLATE.UNBALANCED_BLOCK",
            format!(
                "line {}: '{}' block is never closed",
                unclosed.line(),
                unclosed.keyword()
            ),
        ));
    }

    Ok(root)
}

fn apply_statement(
    body: &str,
    line: usize,
    root: &mut Vec<Node>,
    open: &mut Vec<OpenBlock>,
) -> ParserResult<()> {
    let (keyword, rest) = body
        .split_once(char::is_whitespace)
        .map_or((body, ""), |(keyword, rest)| (keyword, rest.trim()));

    match (keyword, rest) {
        ("if", condition) if !condition.is_empty() => {
            let (negated, condition) = parse_condition(condition, line)?;
            open.push(OpenBlock::Conditional {
                negated,
                condition,
                then_branch: Vec::new(),
                else_branch: None,
            });
        }
        ("else", "") => match open.last_mut() {
            Some(OpenBlock::Conditional { else_branch, .. }) if else_branch.is_none() => {
                *else_branch = Some(Vec::new());
            }
            _ => return Err(unbalanced(line, "else")),
        },
        ("endif", "") | ("endfor", "") => close_block(keyword, line, root, open)?,
        ("for", clause) if !clause.is_empty() => {
            let (variable, iterable) = clause
                .split_once(" in ")
                .ok_or_else(|| unknown_statement(line, body))?;
            open.push(OpenBlock::Loop {
                variable: parse_identifier(variable.trim(), line)?,
                iterable: parse_expression(iterable.trim(), line)?,
                body: Vec::new(),
            });
        }
        _ => return Err(unknown_statement(line, body)),
    }
    Ok(())
}

fn close_block(
    statement: &str,
    line: usize,
    root: &mut Vec<Node>,
    open: &mut Vec<OpenBlock>,
) -> ParserResult<()> {
    let block = open.pop().ok_or_else(|| unbalanced(line, statement))?;
    let node = match (statement, block) {
        (
            "endif",
            OpenBlock::Conditional {
                negated,
                condition,
                then_branch,
                else_branch,
            },
        ) => Node::Conditional {
            negated,
            condition,
            then_branch,
            else_branch: else_branch.unwrap_or_default(),
        },
        (
            "endfor",
            OpenBlock::Loop {
                variable,
                iterable,
                body,
            },
        ) => Node::Loop {
            variable,
            iterable,
            body,
        },
        (_, block) => {
            return Err(AcraError::template_render(
                "TEMPLATE.UNBALANCED_BLOCK",
                format!(
                    "line {}: '{}' closes the '{}' opened on line {}",
                    line,
                    statement,
                    block.keyword(),
                    block.line()
                ),
            ));
        }
    };
    current_branch(root, open).push(node);
    Ok(())
}

fn parse_condition(text: &str, line: usize) -> ParserResult<(bool, Expression)> {
    match text
        .strip_prefix("not")
        .filter(|rest| rest.starts_with(char::is_whitespace))
    {
        Some(rest) => Ok((true, parse_expression(rest.trim(), line)?)),
        None => Ok((false, parse_expression(text, line)?)),
    }
}

fn parse_expression(text: &str, line: usize) -> ParserResult<Expression> {
    let (path, mut rest) = text.split_at(text.find('|').unwrap_or(text.len()));
    let name = parse_path(path.trim(), line)?;

    let mut filters = Vec::new();
    while let Some(after_bar) = rest.strip_prefix('|') {
        let (filter, remaining) = parse_filter(after_bar.trim_start(), line)?;
        filters.push(filter);
        rest = remaining.trim_start();
    }
    if !rest.is_empty() {
        return Err(invalid_expression(line, text));
    }

    Ok(Expression {
        name,
        filters,
        line,
    })
}

fn parse_filter(text: &str, line: usize) -> ParserResult<(Filter, &str)> {
    let end = text
        .find(|next: char| !(next.is_ascii_alphanumeric() || next == '_'))
        .unwrap_or(text.len());
    let (name, rest) = text.split_at(end);
    let rest = rest.trim_start();

    let (argument, rest) = match rest.strip_prefix('(') {
        Some(inner) => {
            let inner = inner.trim_start();
            let (argument, after) = if inner.starts_with(['\'', '"']) {
                let (argument, after) = parse_string_literal(inner, line)?;
                (Some(argument), after.trim_start())
            } else {
                (None, inner)
            };
            let after = after
                .strip_prefix(')')
                .ok_or_else(|| invalid_expression(line, text))?;
            (argument, after)
        }
        None => (None, rest),
    };

    let filter = match (name, argument) {
        ("join", separator) => Filter::Join(separator.unwrap_or_default()),
        ("length" | "count", None) => Filter::Length,
        _ => {
            return Err(AcraError::template_render(
                "TEMPLATE.UNKNOWN_FILTER",
                format!("line {}: unsupported filter '{}'", line, text.trim_end()),
            ));
        }
    };
    Ok((filter, rest))
}

fn parse_string_literal(text: &str, line: usize) -> ParserResult<(String, &str)> {
    let mut chars = text.chars();
    let quote = chars.next().ok_or_else(|| invalid_expression(line, text))?;
    let body = &text[quote.len_utf8()..];
    let close = body
        .find(quote)
        .ok_or_else(|| invalid_expression(line, text))?;
    Ok((body[..close].to_string(), &body[close + quote.len_utf8()..]))
}

fn current_branch<'a>(root: &'a mut Vec<Node>, open: &'a mut [OpenBlock]) -> &'a mut Vec<Node> {
    match open.last_mut() {
        Some(top) => top.branch_mut(),
        None => root,
    }
}

fn clip(text: &str, trim_start: bool, trim_end: bool) -> &str {
    let text = if trim_start { text.trim_start() } else { text };
    if trim_end { text.trim_end() } else { text }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(previous)) = nodes.last_mut() {
        previous.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

fn parse_path(token: &str, line: usize) -> ParserResult<String> {
    for segment in token.split('.') {
        parse_identifier(segment, line).map_err(|_| invalid_name(line, token))?;
    }
    Ok(token.to_string())
}

fn parse_identifier(token: &str, line: usize) -> ParserResult<String> {
    let mut chars = token.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|next| next.is_ascii_alphanumeric() || next == '_');
    if !valid {
        return Err(invalid_name(line, token));
    }
    Ok(token.to_string())
}

fn invalid_name(line: usize, token: &str) -> AcraError {
    AcraError::template_render(
        "TEMPLATE.INVALID_NAME",
        format!("line {}: '{}' is not a placeholder name", line, token),
    )
}

fn invalid_expression(line: usize, text: &str) -> AcraError {
    AcraError::template_render(
        "TEMPLATE.INVALID_EXPRESSION",
        format!("line {}: cannot parse expression '{}'", line, text),
    )
}

fn unknown_statement(line: usize, body: &str) -> AcraError {
    AcraError::template_render(
        "TEMPLATE.UNKNOWN_STATEMENT",
        format!("line {}: unsupported statement '{{% {} %}}'", line, body),
    )
}

fn unbalanced(line: usize, statement: &str) -> AcraError {
    AcraError::template_render(
        "TEMPLATE.UNBALANCED_BLOCK",
        format!("line {}: '{}' without an open block", line, statement),
    )
}

fn line_number(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
