use thiserror::Error;

use crate::template_ast::{CompoundPart, Expression};

#[derive(Error, Debug)]
#[error("cannot serialize expression `{expression}`: {reason}")]
pub struct ExprError {
    pub expression: String,
    pub reason: String,
}

/// Turns a bound expression into text that is safe inside the target markup.
pub trait ExprSerializer {
    fn serialize(&self, expr: &Expression) -> Result<String, ExprError>;
}

/// Emits expression text as the upstream transforms left it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSerializer;

impl ExprSerializer for RawSerializer {
    fn serialize(&self, expr: &Expression) -> Result<String, ExprError> {
        Ok(match expr {
            Expression::Simple(s) => s.content.clone(),
            Expression::Compound(parts) => parts
                .iter()
                .map(|p| match p {
                    CompoundPart::Text(t) => t.as_str(),
                    CompoundPart::Expr(s) => s.content.as_str(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_ast::SimpleExpression;

    #[test]
    fn raw_serializer_concatenates_compound_parts() {
        let expr = Expression::Compound(vec![
            CompoundPart::Expr(SimpleExpression { content: "a".into(), is_static: false }),
            CompoundPart::Text(" + ".into()),
            CompoundPart::Expr(SimpleExpression { content: "b".into(), is_static: false }),
        ]);
        assert_eq!(RawSerializer.serialize(&expr).unwrap(), "a + b");
        assert_eq!(RawSerializer.serialize(&Expression::dynamic("x")).unwrap(), "x");
    }
}
