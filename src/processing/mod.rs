/*! Statement processing

Assembles physical lines into logical statements.
!*/
mod assembler;

pub use assembler::{is_boundary, Statements};
