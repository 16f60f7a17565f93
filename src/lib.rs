//! A library for building and dumping Luma's mid-level IR.
//!
//! This crate provides the in-memory graph types for Luma's mid-level
//! intermediate representation (an ordered list of basic blocks, each owning
//! an ordered list of typed, single-assignment-style instructions) and a
//! deterministic debug-textualization engine for that graph. The text dump is
//! what the compiler's snapshot tests and miscompilation investigations diff
//! against, so it is byte-stable: same graph in, same text out.
//!
//! ## IR
//!
//! The graph type definitions live in the `luma_ir::ir` module. Instructions,
//! blocks, and types are arena-allocated and refer to each other by plain
//! copyable ids, so the graph may contain forward references and control-flow
//! cycles without any ownership cycles.
//!
//! ## Dumping the IR's Text Format
//!
//! When the `dump` Cargo feature is enabled, the `luma_ir::dump` module
//! renders an in-memory graph into the debug text format. The format is
//! write-only: nothing in this crate parses it back.

#![deny(missing_debug_implementations)]
#![deny(missing_docs)]

pub mod ir;

#[cfg(feature = "dump")]
pub mod dump;
