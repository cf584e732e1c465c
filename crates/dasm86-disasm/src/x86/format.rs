//! Final rendering: prefix names, operand order, padding and the
//! RIP-relative target comment.

use dasm86_core::{InsnClass, Instruction};

use super::prefix::{prefix_name, EnvelopeKind, PrefixFlags};
use super::state::DecodeState;
use super::tables::{Attrs, Flow};

/// Column the operands start at when prefixes and mnemonic are short.
const MNEMONIC_WIDTH: usize = 6;

impl Flow {
    pub fn class(self) -> InsnClass {
        match self {
            Flow::Normal => InsnClass::Normal,
            Flow::CondJump => InsnClass::ConditionalBranch,
            Flow::Jump => InsnClass::UnconditionalBranch,
            Flow::Call => InsnClass::Call,
            Flow::Ret | Flow::IndirectJump | Flow::IndirectCall => InsnClass::Indirect,
        }
    }
}

/// Joins prefix names, mnemonic and operands into one line.
pub(crate) fn layout(prefixes: &[String], mnemonic: &str, operands: &[String]) -> String {
    let mut text = String::new();
    for name in prefixes {
        text.push_str(name);
        text.push(' ');
    }
    text.push_str(mnemonic);
    if !operands.is_empty() {
        while text.len() < MNEMONIC_WIDTH {
            text.push(' ');
        }
        text.push(' ');
        text.push_str(&operands.join(","));
    }
    text
}

impl DecodeState<'_> {
    /// Drops the prefixes that decoding consumed. Whatever is left prints
    /// by name.
    pub fn remove_used_prefixes(&mut self) {
        let flags = self.prefixes.flags;
        let used = self.used & flags;
        let p = &mut self.prefixes;
        if used.contains(PrefixFlags::DATA) {
            p.remove(p.last_data);
        }
        if used.contains(PrefixFlags::ADDR) {
            p.remove(p.last_addr);
        }
        if used.contains(PrefixFlags::REPZ) {
            p.remove(p.last_repz);
        }
        if used.contains(PrefixFlags::REPNZ) {
            p.remove(p.last_repnz);
        }
        if used.contains(PrefixFlags::LOCK) {
            p.remove(p.last_lock);
        }
        let segments =
            PrefixFlags::CS | PrefixFlags::SS | PrefixFlags::DS | PrefixFlags::ES | PrefixFlags::FS | PrefixFlags::GS;
        match p.segment {
            Some(seg) if used.contains(seg.flag()) => p.remove(p.segment_at),
            _ if used.intersects(segments) => p.remove(p.last_seg),
            _ => {}
        }
        if self.env.is_none() && self.rex ^ self.rex_used == 0 {
            p.remove(p.last_rex);
        }
    }

    /// Printed names of the remaining prefixes, with the attribute-driven
    /// substitutions (`rep`, `bnd`, `notrack`, `xacquire`, `xrelease`).
    pub fn prefix_names(&self) -> Vec<String> {
        let p = &self.prefixes;
        let attrs = self.attrs;
        let memory = matches!(self.modrm, Some(m) if !m.is_register());
        let mut subst: Vec<(usize, &'static str)> = Vec::new();

        if attrs.contains(Attrs::REP) {
            if let Some(at) = p.last_repz {
                subst.push((at, "rep"));
            }
        }
        if attrs.contains(Attrs::BND) {
            if let Some(at) = p.last_repnz {
                subst.push((at, "bnd"));
            }
        }
        if attrs.contains(Attrs::NOTRACK) && self.notrack_applies() {
            if let Some(at) = p.last_seg {
                subst.push((at, "notrack"));
            }
        }
        if memory && attrs.intersects(Attrs::HLE_ANY) {
            let lock = p.flags.contains(PrefixFlags::LOCK);
            let any = attrs.contains(Attrs::HLE_ANY);
            let locked = attrs.contains(Attrs::HLE) && (lock || any);
            let release_last = p.last_repz > p.last_repnz || p.last_repnz.is_none();
            if let Some(at) = p.last_repz {
                if locked || (attrs.contains(Attrs::HLE_STORE) && release_last) {
                    subst.push((at, "xrelease"));
                }
            }
            if let Some(at) = p.last_repnz {
                if locked {
                    subst.push((at, "xacquire"));
                }
            }
        }

        let mut names = Vec::new();
        let fwait_unused = p.flags.contains(PrefixFlags::FWAIT) && !self.used.contains(PrefixFlags::FWAIT);
        for at in 0..p.count {
            if fwait_unused && p.fwait_at == Some(at) {
                names.push("fwait".to_string());
            }
            let byte = p.bytes[at];
            if byte == 0 {
                continue;
            }
            let name = subst
                .iter()
                .find(|(i, _)| *i == at)
                .map(|(_, name)| *name)
                .or_else(|| prefix_name(byte, self.mode64, self.opts.data16, self.opts.addr16));
            if let Some(name) = name {
                names.push(name.to_string());
            }
        }
        if fwait_unused && p.fwait_at == Some(p.count) {
            names.push("fwait".to_string());
        }
        names
    }

    /// A 3E prefix on an indirect branch reads as `notrack`. Intel64 does
    /// not support it together with 66 in long mode.
    pub fn notrack_applies(&self) -> bool {
        self.prefixes.flags.contains(PrefixFlags::DS) && (!self.mode64 || self.prefixes.last_data.is_none())
    }

    /// EVEX `{%kN}{z}` decoration for the destination operand.
    fn mask_decoration(&self) -> String {
        let Some(env) = self.env.filter(|env| env.kind == EnvelopeKind::Evex) else {
            return String::new();
        };
        let mut out = String::new();
        if env.mask != 0 {
            out.push('{');
            out.push_str(&self.names.mask(env.mask));
            out.push('}');
        }
        if env.zeroing {
            out.push_str("{z}");
        }
        out
    }

    /// Builds the final instruction from the expanded mnemonic and the
    /// operand texts in table order.
    pub fn render(&mut self, mnemonic: String, mut operands: Vec<String>, bytes: Vec<u8>) -> Instruction {
        self.remove_used_prefixes();
        let prefixes = self.prefix_names();

        let decoration = self.mask_decoration();
        if !decoration.is_empty() {
            if let Some(first) = operands.iter_mut().find(|op| !op.is_empty()) {
                first.push_str(&decoration);
            }
        }
        operands.retain(|op| !op.is_empty());
        if !self.intel() && !self.attrs.contains(Attrs::KEEP_ORDER) {
            operands.reverse();
        }

        let size = bytes.len();
        let mut text = layout(&prefixes, &mnemonic, &operands);
        let mut data_ref = None;
        if let Some((disp, addr_bits)) = self.rip_disp {
            let mut target = self.address.wrapping_add(size as u64).wrapping_add(disp as u64);
            if addr_bits == 32 {
                target &= 0xffff_ffff;
            }
            text.push_str(&format!("        # {target:#x}"));
            data_ref = Some(target);
        }

        Instruction {
            address: self.address,
            size,
            bytes,
            prefixes,
            mnemonic,
            operands,
            text,
            class: self.flow.class(),
            target: self.target.filter(|_| matches!(self.flow, Flow::Jump | Flow::CondJump | Flow::Call)),
            data_ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dasm86_core::DisasmOptions;

    #[test]
    fn test_layout_pads_short_mnemonics() {
        let ops = vec!["%rsp".to_string(), "%rbp".to_string()];
        assert_eq!(layout(&[], "mov", &ops), "mov    %rsp,%rbp");
        assert_eq!(layout(&[], "ret", &[]), "ret");
        let prefixes = vec!["rep".to_string()];
        assert_eq!(layout(&prefixes, "stos", &["%al".to_string()]), "rep stos %al");
        assert_eq!(layout(&[], "cmpxchg", &["%eax".to_string()]), "cmpxchg %eax");
    }

    #[test]
    fn test_flow_classes() {
        assert_eq!(Flow::Ret.class(), InsnClass::Indirect);
        assert_eq!(Flow::Call.class(), InsnClass::Call);
        assert_eq!(Flow::CondJump.class(), InsnClass::ConditionalBranch);
        assert_eq!(Flow::Jump.class(), InsnClass::UnconditionalBranch);
    }

    #[test]
    fn test_unused_prefixes_keep_names() {
        let opts = DisasmOptions::default();
        let mut st = DecodeState::new(&opts, 0);
        st.prefixes.flags = PrefixFlags::DATA | PrefixFlags::LOCK;
        st.prefixes.bytes[0] = 0xf0;
        st.prefixes.bytes[1] = 0x66;
        st.prefixes.count = 2;
        st.prefixes.last_lock = Some(0);
        st.prefixes.last_data = Some(1);
        st.used = PrefixFlags::DATA;
        st.remove_used_prefixes();
        assert_eq!(st.prefix_names(), vec!["lock".to_string()]);
    }

    #[test]
    fn test_rex_hidden_only_when_fully_used() {
        let opts = DisasmOptions::default();
        let mut st = DecodeState::new(&opts, 0);
        st.prefixes.bytes[0] = 0x41;
        st.prefixes.count = 1;
        st.prefixes.last_rex = Some(0);
        st.rex = 0x41;
        st.remove_used_prefixes();
        assert_eq!(st.prefix_names(), vec!["rex.B".to_string()]);
        st.rex_used = 0x41;
        st.remove_used_prefixes();
        assert!(st.prefix_names().is_empty());
    }
}
