use std::io;

use thiserror::Error;

use crate::expr::ExprError;

pub type CodegenResult<T> = Result<T, CodegenError>;

#[derive(Error, Debug)]
pub enum CodegenError {
    /// A directive shape the generator cannot lower into an attribute.
    #[error("unknown directive `{directive}` on <{tag}>")]
    UnknownDirective { directive: String, tag: String },

    #[error("event binding `{directive}` on <{tag}> is missing its {missing}")]
    MalformedEvent {
        directive: String,
        tag: String,
        missing: &'static str,
    },

    #[error(transparent)]
    Expression(#[from] ExprError),

    #[error("failed to emit {file_name}")]
    Emit {
        file_name: String,
        #[source]
        source: io::Error,
    },
}
