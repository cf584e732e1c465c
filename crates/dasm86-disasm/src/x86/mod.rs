//! x86 / x86-64 decoding.
//!
//! Decoding is a walk over static opcode tables (see [`tables`]). Each
//! instruction gets a fresh [`state::DecodeState`]; operand resolvers fill
//! it in, the mnemonic template is expanded last, and the formatter decides
//! which prefixes still need printing.

mod decoder;
mod format;
mod modrm;
mod names;
mod operand;
mod prefix;
mod state;
mod tables;
#[cfg(test)]
mod table_walk;
mod template;

pub use decoder::X86Disassembler;
