//! Property-based tests for the x86 decoder.
//!
//! These tests verify invariants that should hold for every mode and syntax:
//! - Decoding never panics on arbitrary input
//! - Decoded instruction size is within valid bounds
//! - Deterministic decoding (same input → same output)
//! - Both syntaxes agree on instruction boundaries
//! - Intel operands are the AT&T operands in reverse
//! - Register indices past a small register file spoil only that operand

use proptest::prelude::*;

use dasm86_core::{AddressMode, DisasmOptions, Syntax};
use dasm86_disasm::traits::Disassembler;
use dasm86_disasm::X86Disassembler;

fn mode_strategy() -> impl Strategy<Value = AddressMode> {
    prop_oneof![Just(AddressMode::Mode16), Just(AddressMode::Mode32), Just(AddressMode::Mode64)]
}

fn decoder(mode: AddressMode, syntax: Syntax) -> X86Disassembler {
    X86Disassembler::new(DisasmOptions::new(mode).with_syntax(syntax))
}

/// Register or immediate text with its AT&T sigils removed, or `None` for
/// operands whose spelling differs between syntaxes beyond the sigil.
fn plain_operand(text: &str) -> Option<&str> {
    if text.contains(['(', '[', '{', ':', ' ']) {
        return None;
    }
    Some(text.trim_start_matches(['*', '%', '$']))
}

// =============================================================================
// Structural properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    /// Decoding arbitrary bytes should never panic.
    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..32), mode in mode_strategy()) {
        let disasm = decoder(mode, Syntax::Att);
        let _ = disasm.decode_instruction(&bytes, 0x1000);
        let _ = disasm.decode_bytes(&bytes, 0x1000);
    }

    /// Successfully decoded instructions have valid size.
    #[test]
    fn decoded_size_is_valid(bytes in prop::collection::vec(any::<u8>(), 1..32), mode in mode_strategy()) {
        let disasm = decoder(mode, Syntax::Att);
        if let Ok(decoded) = disasm.decode_instruction(&bytes, 0x1000) {
            prop_assert!(decoded.size >= 1, "Instruction size must be at least 1");
            prop_assert!(decoded.size <= 15, "Instruction size must be at most 15");
            prop_assert!(decoded.size <= bytes.len(), "Instruction size cannot exceed input length");
            prop_assert_eq!(decoded.instruction.bytes.as_slice(), &bytes[..decoded.size]);
        }
    }

    /// The lenient entry point always makes progress, even on garbage.
    #[test]
    fn lenient_decode_always_advances(bytes in prop::collection::vec(any::<u8>(), 1..32), mode in mode_strategy()) {
        let insn = decoder(mode, Syntax::Att).decode_bytes(&bytes, 0x1000);
        prop_assert!(insn.size >= 1);
        prop_assert!(insn.size <= bytes.len().min(15));
        prop_assert!(!insn.text.is_empty());
    }

    /// Decoding is deterministic: same input always produces same output.
    #[test]
    fn decode_is_deterministic(bytes in prop::collection::vec(any::<u8>(), 1..32), mode in mode_strategy()) {
        let disasm = decoder(mode, Syntax::Att);
        let first = disasm.decode_bytes(&bytes, 0x1000);
        let second = disasm.decode_bytes(&bytes, 0x1000);
        prop_assert_eq!(first, second);
    }

    /// Successfully decoded instructions carry the requested address.
    #[test]
    fn decoded_address_matches(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        addr in 0x1000u64..0xFFFF_FFFF_FFFF_0000u64
    ) {
        let disasm = decoder(AddressMode::Mode64, Syntax::Att);
        if let Ok(decoded) = disasm.decode_instruction(&bytes, addr) {
            prop_assert_eq!(decoded.instruction.address, addr, "Decoded address should match input address");
        }
    }

    /// Decoded instructions have non-empty mnemonics.
    #[test]
    fn decoded_has_mnemonic(bytes in prop::collection::vec(any::<u8>(), 1..32), mode in mode_strategy()) {
        let disasm = decoder(mode, Syntax::Att);
        if let Ok(decoded) = disasm.decode_instruction(&bytes, 0x1000) {
            prop_assert!(!decoded.instruction.mnemonic.is_empty(), "Mnemonic should not be empty");
        }
    }

    /// AT&T and Intel renderings consume the same bytes and classify alike.
    #[test]
    fn syntaxes_agree_on_boundaries(bytes in prop::collection::vec(any::<u8>(), 1..32), mode in mode_strategy()) {
        let att = decoder(mode, Syntax::Att).decode_bytes(&bytes, 0x1000);
        let intel = decoder(mode, Syntax::Intel).decode_bytes(&bytes, 0x1000);
        prop_assert_eq!(att.size, intel.size);
        prop_assert_eq!(att.class, intel.class);
        prop_assert_eq!(att.target, intel.target);
    }

    /// Intel lists register and immediate operands in the reverse of AT&T
    /// order. `enter` keeps table order in both, Intel joins a far pointer
    /// into one `seg:off` operand, and Intel spells out the implicit shift
    /// count of one.
    #[test]
    fn intel_operands_reverse_att(bytes in prop::collection::vec(any::<u8>(), 1..16), mode in mode_strategy()) {
        let att = decoder(mode, Syntax::Att).decode_bytes(&bytes, 0x1000);
        let intel = decoder(mode, Syntax::Intel).decode_bytes(&bytes, 0x1000);
        let far_pointer = intel.operands.iter().any(|op| op.contains(':') && !op.contains('['));
        if att.is_invalid() || far_pointer || intel.mnemonic.starts_with("enter") {
            return Ok(());
        }
        let mut intel_ops: Vec<&str> = intel.operands.iter().map(String::as_str).collect();
        if intel_ops.len() == att.operands.len() + 1 && intel_ops.last() == Some(&"1") {
            intel_ops.pop();
        }
        prop_assert_eq!(intel_ops.len(), att.operands.len(), "{} / {}", att.text, intel.text);

        let att_plain: Option<Vec<&str>> = att.operands.iter().rev().map(|op| plain_operand(op)).collect();
        let intel_plain: Option<Vec<&str>> = intel_ops.iter().map(|op| plain_operand(op)).collect();
        if let (Some(att_plain), Some(intel_plain)) = (att_plain, intel_plain) {
            prop_assert_eq!(att_plain, intel_plain, "{} / {}", att.text, intel.text);
        }
    }

    /// Sequential decoding covers all bytes (no gaps or overlaps).
    #[test]
    fn sequential_decode_covers_all_bytes(bytes in prop::collection::vec(any::<u8>(), 16..128)) {
        let disasm = decoder(AddressMode::Mode64, Syntax::Att);
        let mut offset = 0;
        let mut covered = vec![false; bytes.len()];
        let mut iterations = 0;
        let max_iterations = bytes.len() + 1;

        while offset < bytes.len() && iterations < max_iterations {
            iterations += 1;

            match disasm.decode_instruction(&bytes[offset..], 0x1000 + offset as u64) {
                Ok(inst) => {
                    prop_assert!(inst.size > 0, "Decoded size must be positive");
                    let end = (offset + inst.size).min(bytes.len());
                    for (i, covered_byte) in covered[offset..end].iter_mut().enumerate() {
                        prop_assert!(!*covered_byte, "Byte {} covered twice", offset + i);
                        *covered_byte = true;
                    }
                    offset += inst.size;
                }
                Err(_) => {
                    covered[offset] = true;
                    offset += 1;
                }
            }
        }

        for (i, &c) in covered.iter().enumerate() {
            prop_assert!(c, "Byte {} was not covered", i);
        }
    }

    /// Lenient decoding of a whole buffer consumes exactly the buffer.
    #[test]
    fn decode_all_tiles_the_buffer(bytes in prop::collection::vec(any::<u8>(), 1..128), mode in mode_strategy()) {
        let insns = decoder(mode, Syntax::Att).decode_all(&bytes, 0x4000);
        let mut next = 0x4000u64;
        for insn in &insns {
            prop_assert_eq!(insn.address, next);
            next += insn.size as u64;
        }
        prop_assert!(next >= 0x4000 + bytes.len() as u64);
    }
}

// =============================================================================
// Encoding-space properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// REX prefixes are handled without panicking.
    #[test]
    fn rex_prefix_handling(
        rex in 0x40u8..=0x4F,
        rest in prop::collection::vec(any::<u8>(), 1..15)
    ) {
        let disasm = decoder(AddressMode::Mode64, Syntax::Att);
        let mut bytes = vec![rex];
        bytes.extend(rest);
        let _ = disasm.decode_instruction(&bytes, 0x1000);
    }

    /// VEX prefixes are handled without panicking.
    #[test]
    fn vex_prefix_handling(
        vex_type in prop_oneof![Just(0xC4u8), Just(0xC5u8)],
        rest in prop::collection::vec(any::<u8>(), 2..15),
        mode in mode_strategy()
    ) {
        let disasm = decoder(mode, Syntax::Att);
        let mut bytes = vec![vex_type];
        bytes.extend(rest);
        let _ = disasm.decode_instruction(&bytes, 0x1000);
    }

    /// XOP escapes with a map field of 8 or more are handled without panicking.
    #[test]
    fn xop_prefix_handling(
        map in 8u8..=10,
        rxb in 0u8..8,
        rest in prop::collection::vec(any::<u8>(), 2..15)
    ) {
        let disasm = decoder(AddressMode::Mode64, Syntax::Intel);
        let mut bytes = vec![0x8F, (rxb << 5) | map];
        bytes.extend(rest);
        let _ = disasm.decode_instruction(&bytes, 0x1000);
    }

    /// EVEX prefixes are handled without panicking.
    #[test]
    fn evex_prefix_handling(
        rest in prop::collection::vec(any::<u8>(), 4..15),
        mode in mode_strategy()
    ) {
        let disasm = decoder(mode, Syntax::Att);
        let mut bytes = vec![0x62];
        bytes.extend(rest);
        let _ = disasm.decode_instruction(&bytes, 0x1000);
    }

    /// Escape sequences (0x0F, 0x0F38, 0x0F3A) are handled.
    #[test]
    fn escape_sequences(
        escape in prop_oneof![
            Just(vec![0x0Fu8]),
            Just(vec![0x0Fu8, 0x38]),
            Just(vec![0x0Fu8, 0x3A]),
            Just(vec![0x0Fu8, 0x0F]),
        ],
        rest in prop::collection::vec(any::<u8>(), 1..12),
        prefix in prop_oneof![Just(None), Just(Some(0x66u8)), Just(Some(0xF2u8)), Just(Some(0xF3u8))]
    ) {
        let disasm = decoder(AddressMode::Mode64, Syntax::Att);
        let mut bytes: Vec<u8> = prefix.into_iter().collect();
        bytes.extend(escape);
        bytes.extend(rest);
        let _ = disasm.decode_instruction(&bytes, 0x1000);
    }

    /// A prefix run that reaches fourteen bytes is printed as prefixes alone.
    #[test]
    fn overlong_prefix_runs_are_cut(prefix in prop_oneof![Just(0x26u8), Just(0x2Eu8), Just(0x3Eu8)], count in 14usize..20) {
        let mut bytes = vec![prefix; count];
        bytes.push(0x90);
        let insn = decoder(AddressMode::Mode32, Syntax::Att).decode_bytes(&bytes, 0);
        prop_assert_eq!(insn.size, 14);
        prop_assert_eq!(insn.text.split_whitespace().count(), 14);
    }
}

// =============================================================================
// Operand-level properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A mask register number widened past k7 prints `(bad)` in its slot
    /// while the rest of the instruction still decodes.
    #[test]
    fn mask_index_past_the_file_spoils_one_operand(reg in 0u8..8, rm in 0u8..8, syntax in prop_oneof![Just(Syntax::Att), Just(Syntax::Intel)]) {
        // kmovw k, k with VEX.R set.
        let bytes = [0xc4, 0x61, 0x78, 0x90, 0xc0 | (reg << 3) | rm];
        let insn = decoder(AddressMode::Mode64, syntax).decode_bytes(&bytes, 0x1000);
        prop_assert!(!insn.is_invalid(), "{}", insn.text);
        prop_assert_eq!(insn.size, bytes.len());
        prop_assert_eq!(insn.mnemonic.as_str(), "kmovw");
        prop_assert_eq!(insn.operands.len(), 2);
        let (dest, src) = match syntax {
            Syntax::Att => (&insn.operands[1], &insn.operands[0]),
            Syntax::Intel => (&insn.operands[0], &insn.operands[1]),
        };
        prop_assert_eq!(dest.as_str(), "(bad)");
        prop_assert!(src.ends_with(&format!("k{rm}")), "{}", src);
    }

    /// Tile registers widened past tmm7 behave the same way.
    #[test]
    fn tile_index_past_the_file_spoils_one_operand(reg in 0u8..8) {
        // tilezero with VEX.R set.
        let bytes = [0xc4, 0x62, 0x7b, 0x49, 0xc0 | (reg << 3)];
        let insn = decoder(AddressMode::Mode64, Syntax::Att).decode_bytes(&bytes, 0x1000);
        prop_assert!(!insn.is_invalid(), "{}", insn.text);
        prop_assert_eq!(insn.text.as_str(), "tilezero (bad)");
    }
}
