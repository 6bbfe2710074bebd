//! sx engine: directive model, scope generation, compiler, text parser.

pub mod case;
pub mod value;
pub mod directive;
pub mod scope;
pub mod config;
pub mod stylesheet;
pub mod compiler;
pub mod tokenizer;
pub mod parser;
