//! # dasm86-core
//!
//! Core abstractions for the dasm86 disassembler. This crate defines the
//! caller-facing configuration (address mode, output syntax, ISA flavour)
//! and the architecture-neutral result of decoding one instruction.

pub mod arch;
pub mod error;
pub mod instruction;
pub mod options;

pub use arch::{AddressMode, Isa64, Syntax};
pub use error::{FetchError, OptionsError};
pub use instruction::{InsnClass, Instruction};
pub use options::DisasmOptions;
