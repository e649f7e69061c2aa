//! Placeholder expression validator.
//!
//! Decides whether a string consists only of balanced `${...}` placeholders
//! interleaved with ordinary characters. Inside a placeholder the scanner
//! tracks quoted strings, nested backtick templates (which may open further
//! placeholders), brace nesting and backslash escapes. It never evaluates
//! anything.

/// Lexical context on top of the scanner stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Outside of any placeholder.
    Initial,
    /// The next character is taken verbatim.
    Escaped,
    Quot,
    Apos,
    /// Saw `$`, the following `{` opens an expression.
    TemplateHead,
    Expression,
    /// A backtick literal inside an expression.
    NestedTemplate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Keep,
    Push(Context),
    Pop,
    Replace(Context),
}

/// Placeholder span bookkeeping requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    None,
    SpanStart,
    SpanEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub op: StackOp,
    pub mark: Mark,
    /// Emit a backslash before the character.
    pub escape: bool,
}

impl Step {
    const KEEP: Step = Step::op(StackOp::Keep);

    const fn op(op: StackOp) -> Self {
        Step {
            op,
            mark: Mark::None,
            escape: false,
        }
    }
}

/// One entry of the transition table: what to do with `c` when `ctx` is on
/// top of the stack. `next` is the character following `c`, if any.
pub fn transition(ctx: Context, c: char, next: Option<char>) -> Step {
    match ctx {
        Context::Escaped => Step::op(StackOp::Pop),
        Context::Quot if c == '"' => Step::op(StackOp::Pop),
        Context::Apos if c == '\'' => Step::op(StackOp::Pop),
        Context::Quot | Context::Apos => Step::KEEP,
        Context::TemplateHead => Step::op(StackOp::Replace(Context::Expression)),
        Context::Initial => match c {
            '`' => Step {
                escape: true,
                ..Step::KEEP
            },
            '$' => Step {
                mark: Mark::SpanStart,
                ..template_text(c, next)
            },
            _ => template_text(c, next),
        },
        Context::NestedTemplate => match c {
            '`' => Step::op(StackOp::Pop),
            _ => template_text(c, next),
        },
        Context::Expression => match c {
            '"' => Step::op(StackOp::Push(Context::Quot)),
            '\'' => Step::op(StackOp::Push(Context::Apos)),
            '`' => Step::op(StackOp::Push(Context::NestedTemplate)),
            '{' => Step::op(StackOp::Push(Context::Expression)),
            '}' => Step {
                mark: Mark::SpanEnd,
                ..Step::op(StackOp::Pop)
            },
            _ => Step::KEEP,
        },
    }
}

// Shared by top-level text and backtick literals.
fn template_text(c: char, next: Option<char>) -> Step {
    match c {
        '$' if next == Some('{') => Step::op(StackOp::Push(Context::TemplateHead)),
        '\\' => Step::op(StackOp::Push(Context::Escaped)),
        _ => Step::KEEP,
    }
}

/// Validate `value` as a sequence of placeholder expressions.
///
/// Returns `value` unchanged when a single placeholder spans all of it,
/// `prefix + value + suffix` when it mixes literal text and placeholders
/// (top-level backticks are escaped), and `None` when some quote, backtick
/// or placeholder is left open.
pub fn encode(value: &str, prefix: &str, suffix: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len() + prefix.len() + suffix.len());
    let mut stack = vec![Context::Initial];
    let mut span_start = None;
    let mut span_end = None;

    let mut chars = value.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let step = transition(*stack.last()?, c, next);

        if step.escape {
            out.push('\\');
        }
        out.push(c);

        match step.mark {
            Mark::SpanStart => span_start = Some(i),
            Mark::SpanEnd => span_end = Some(i + c.len_utf8()),
            Mark::None => {}
        }
        match step.op {
            StackOp::Keep => {}
            StackOp::Push(ctx) => stack.push(ctx),
            StackOp::Pop => {
                stack.pop();
            }
            StackOp::Replace(ctx) => {
                if let Some(top) = stack.last_mut() {
                    *top = ctx;
                }
            }
        }
    }

    if stack != [Context::Initial] {
        return None;
    }
    if span_start == Some(0) && span_end == Some(value.len()) {
        Some(out)
    } else {
        Some(format!("{prefix}{out}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_escapes_backtick() {
        let step = transition(Context::Initial, '`', None);
        assert!(step.escape);
        assert_eq!(step.op, StackOp::Keep);
    }

    #[test]
    fn dollar_opens_only_before_brace() {
        let open = transition(Context::Initial, '$', Some('{'));
        assert_eq!(open.op, StackOp::Push(Context::TemplateHead));
        assert_eq!(open.mark, Mark::SpanStart);

        let plain = transition(Context::Initial, '$', Some('a'));
        assert_eq!(plain.op, StackOp::Keep);
        assert_eq!(plain.mark, Mark::SpanStart);

        let nested = transition(Context::NestedTemplate, '$', Some('{'));
        assert_eq!(nested.op, StackOp::Push(Context::TemplateHead));
        assert_eq!(nested.mark, Mark::None);
    }

    #[test]
    fn template_head_becomes_expression() {
        let step = transition(Context::TemplateHead, '{', None);
        assert_eq!(step.op, StackOp::Replace(Context::Expression));
    }

    #[test]
    fn expression_pushes_and_closes() {
        assert_eq!(
            transition(Context::Expression, '"', None).op,
            StackOp::Push(Context::Quot)
        );
        assert_eq!(
            transition(Context::Expression, '\'', None).op,
            StackOp::Push(Context::Apos)
        );
        assert_eq!(
            transition(Context::Expression, '`', None).op,
            StackOp::Push(Context::NestedTemplate)
        );
        assert_eq!(
            transition(Context::Expression, '{', None).op,
            StackOp::Push(Context::Expression)
        );
        let close = transition(Context::Expression, '}', None);
        assert_eq!(close.op, StackOp::Pop);
        assert_eq!(close.mark, Mark::SpanEnd);
    }

    #[test]
    fn quotes_ignore_backslash() {
        assert_eq!(transition(Context::Quot, '\\', Some('"')).op, StackOp::Keep);
        assert_eq!(transition(Context::Quot, '"', None).op, StackOp::Pop);
        assert_eq!(transition(Context::Apos, '"', None).op, StackOp::Keep);
        assert_eq!(transition(Context::Apos, '\'', None).op, StackOp::Pop);
    }

    #[test]
    fn escaped_consumes_one_char() {
        assert_eq!(transition(Context::Escaped, '`', None).op, StackOp::Pop);
        assert_eq!(
            transition(Context::NestedTemplate, '\\', Some('`')).op,
            StackOp::Push(Context::Escaped)
        );
    }

    #[test]
    fn multibyte_span_end_uses_byte_offsets() {
        assert_eq!(encode("${'é'}", "[", "]").as_deref(), Some("${'é'}"));
    }
}
