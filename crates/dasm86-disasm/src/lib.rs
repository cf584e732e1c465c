//! # dasm86-disasm
//!
//! Table-driven x86 / x86-64 instruction decoder.
//!
//! The decoder consumes bytes through a [`ByteSource`], walks static opcode
//! tables covering the legacy, REX, VEX, XOP and EVEX encoding spaces, and
//! renders the result in AT&T or Intel syntax.
//!
//! ```
//! use dasm86_core::DisasmOptions;
//! use dasm86_disasm::X86Disassembler;
//!
//! let disasm = X86Disassembler::new(DisasmOptions::default());
//! let insn = disasm.decode_bytes(&[0x48, 0x89, 0xe5], 0x1000);
//! assert_eq!(insn.text, "mov    %rsp,%rbp");
//! assert_eq!(insn.size, 3);
//! ```

pub mod error;
pub mod fetch;
pub mod traits;
pub mod x86;

pub use error::DecodeError;
pub use fetch::{ByteSource, SliceSource};
pub use traits::{DecodedInstruction, Disassembler};
pub use x86::X86Disassembler;
