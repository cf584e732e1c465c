//! Mnemonic template expansion.
//!
//! Templates are lower-case text with upper-case macro letters that expand
//! to size suffixes and other decorations, `{att|intel}` alternatives, and
//! two-letter macros introduced by `%`. A `!` flips the condition of the
//! letter that follows it.

use dasm86_core::Isa64;

use super::prefix::{PrefixFlags, REX_W};
use super::state::DecodeState;
use super::tables::Attrs;

/// Size suffix for an operand width.
fn suffix(bits: u32) -> char {
    match bits {
        8 => 'b',
        16 => 'w',
        64 => 'q',
        _ => 'l',
    }
}

/// Intel-flavoured size letter.
fn intel_suffix(bits: u32) -> char {
    match bits {
        8 => 'b',
        16 => 'w',
        64 => 'q',
        _ => 'd',
    }
}

impl DecodeState<'_> {
    fn memory_form(&self) -> bool {
        matches!(self.modrm, Some(m) if !m.is_register()) && !self.attrs.contains(Attrs::REG_FORM)
    }

    fn suffix_wanted(&self) -> bool {
        !self.intel() && self.opts.suffix_always
    }

    /// Expands a mnemonic template. Operand resolution has already run, so
    /// predicates and register-presence flags are known.
    pub fn expand(&mut self, template: &str) -> String {
        let intel = self.intel();
        let want_alt = usize::from(intel);
        let chars: Vec<char> = template.chars().collect();
        let mut out = String::with_capacity(template.len() + 4);
        let mut alt: Option<usize> = None;
        let mut invert = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            i += 1;
            match c {
                '{' => {
                    alt = Some(0);
                    continue;
                }
                '|' if alt.is_some() => {
                    alt = alt.map(|a| a + 1);
                    continue;
                }
                '}' if alt.is_some() => {
                    alt = None;
                    continue;
                }
                _ => {}
            }
            if alt.is_some_and(|a| a != want_alt) {
                continue;
            }
            if c == '%' && i < chars.len() {
                let pair = [chars[i], chars.get(i + 1).copied().unwrap_or(' ')];
                i += 2;
                self.expand_pair(pair, &mut out);
                continue;
            }
            let last = i == chars.len() || (alt.is_some() && chars[i..].first() == Some(&'|'));
            match c {
                '!' => {
                    invert = true;
                    continue;
                }
                'A' => {
                    if !intel && (self.memory_form() || self.opts.suffix_always) {
                        out.push('b');
                    }
                }
                'B' => {
                    if self.suffix_wanted() {
                        out.push('b');
                    }
                }
                'C' => {
                    if !intel && (self.prefixes.flags.contains(PrefixFlags::DATA) || self.opts.suffix_always) {
                        let bits = self.mode_bits(super::tables::Mode::Z);
                        out.push(if bits == 32 { 'l' } else { 's' });
                    }
                }
                'E' => {
                    let bits = self.address_bits();
                    match bits {
                        64 => out.push('r'),
                        32 => out.push('e'),
                        _ => {}
                    }
                }
                'F' => {
                    if !intel && (self.prefixes.flags.contains(PrefixFlags::ADDR) || self.opts.suffix_always) {
                        let bits = self.address_bits();
                        out.push(suffix(bits));
                    }
                }
                'H' => {
                    let hint = self.prefixes.flags & (PrefixFlags::CS | PrefixFlags::DS);
                    if hint == PrefixFlags::CS || hint == PrefixFlags::DS {
                        self.used |= hint;
                        out.push_str(if hint == PrefixFlags::DS { ",pt" } else { ",pn" });
                    }
                }
                'K' => {
                    out.push(if self.rex_bit(REX_W) { 'q' } else { 'd' });
                }
                'L' => {
                    if self.suffix_wanted() {
                        out.push(if self.mode64 { 'q' } else { 'l' });
                    }
                }
                'M' => {
                    if self.opts.intel_mnemonic == invert {
                        out.push('r');
                    }
                }
                'N' => {
                    // fwait folds into the waiting form
                    if !self.use_prefix(PrefixFlags::FWAIT) {
                        out.push('n');
                    }
                }
                'O' => {
                    let bits = self.operand_bits();
                    out.push(match bits {
                        64 => 'o',
                        32 if intel => 'q',
                        _ => 'd',
                    });
                }
                'P' => {
                    if !self.has_reg_operand {
                        self.stack_letter(&mut out);
                    }
                }
                'Q' => {
                    let bits = self.operand_bits();
                    if !intel && (self.memory_form() || self.opts.suffix_always) {
                        out.push(suffix(bits));
                    }
                }
                'R' => {
                    let bits = self.operand_bits();
                    if intel {
                        out.push(intel_suffix(bits));
                        if last && bits >= 32 {
                            out.push('e');
                        }
                    } else {
                        out.push(suffix(bits));
                    }
                }
                'S' => {
                    let bits = self.operand_bits();
                    if self.suffix_wanted() {
                        out.push(suffix(bits));
                    }
                }
                'T' => self.stack_letter(&mut out),
                '^' => {
                    let bits = self.operand_bits();
                    let sized = self.prefixes.flags.contains(PrefixFlags::DATA) || self.rex_bit(REX_W);
                    if !intel && (sized || self.opts.suffix_always) {
                        out.push(suffix(bits));
                    }
                }
                'W' => {
                    let bits = self.operand_bits();
                    out.push(match bits {
                        16 => 'b',
                        32 => 'w',
                        _ if intel => 'd',
                        _ => 'l',
                    });
                }
                'X' => {
                    out.push(if self.use_prefix(PrefixFlags::DATA) { 'd' } else { 's' });
                }
                'Z' => {
                    if self.suffix_wanted() {
                        out.push(if self.mode64 { 'q' } else { 'l' });
                    }
                }
                '@' => {
                    let data = self.prefixes.flags.contains(PrefixFlags::DATA);
                    let rex_w = self.rex_bit(REX_W);
                    if self.mode64 && (self.opts.isa64 == Isa64::Intel64 || rex_w || !data) {
                        if self.suffix_wanted() {
                            out.push('q');
                        }
                    } else {
                        self.stack_letter(&mut out);
                    }
                }
                other => out.push(other),
            }
            invert = false;
        }
        out
    }

    /// AT&T stack-size letter, printed when a 66 prefix or `suffix` asks for it.
    fn stack_letter(&mut self, out: &mut String) {
        if self.intel() {
            return;
        }
        let data = self.prefixes.flags.contains(PrefixFlags::DATA);
        let bits = self.stack_bits();
        if data || self.opts.suffix_always {
            out.push(suffix(bits));
        }
    }

    fn vector_letter(&self) -> char {
        match self.length {
            512 => 'z',
            256 => 'y',
            _ => 'x',
        }
    }

    fn evex_w(&self) -> bool {
        self.env.is_some_and(|env| env.w)
    }

    fn expand_pair(&mut self, pair: [char; 2], out: &mut String) {
        let intel = self.intel();
        match pair {
            ['L', 'B'] | ['L', 'S'] => {
                if self.mode64 && self.peek_address_bits() == 64 {
                    out.push_str("abs");
                } else if pair[1] == 'B' {
                    if self.suffix_wanted() {
                        out.push('b');
                    }
                } else {
                    let bits = self.operand_bits();
                    if self.suffix_wanted() {
                        out.push(suffix(bits));
                    }
                }
            }
            ['L', 'V'] => {
                if self.mode64 && self.rex_bit(REX_W) {
                    out.push_str("abs");
                } else {
                    let bits = self.operand_bits();
                    if self.suffix_wanted() {
                        out.push(suffix(bits));
                    }
                }
            }
            ['L', 'P'] => {
                if self.rex_bit(REX_W) {
                    out.push('q');
                } else if self.use_prefix(PrefixFlags::DATA) {
                    out.push('w');
                } else if self.suffix_wanted() {
                    out.push('l');
                }
            }
            ['X', 'Y'] | ['X', 'Z'] => {
                if !intel && ((self.memory_form() && !self.broadcast) || self.opts.suffix_always) {
                    out.push(self.vector_letter());
                }
            }
            ['X', 'W'] => out.push(if self.evex_w() { 'd' } else { 's' }),
            ['D', 'Q'] => out.push(if self.evex_w() { 'q' } else { 'd' }),
            ['B', 'W'] => out.push(if self.evex_w() { 'w' } else { 'b' }),
            ['L', 'Q'] => {
                let w = self.rex_bit(REX_W);
                if !intel && (self.memory_form() || self.opts.suffix_always) {
                    out.push(if w { 'q' } else { 'l' });
                }
            }
            ['C', 'C'] => {
                if let Some(infix) = self.cmp_infix {
                    out.push_str(infix);
                }
            }
            ['C', 'B'] => out.push_str(if self.rex_bit(REX_W) { "16b" } else { "8b" }),
            ['X', 'D'] => {
                let w = self.rex_bit(REX_W);
                out.push_str(if w && !intel { "lq" } else { "xd" });
            }
            ['6', '4'] => {
                if self.rex_bit(REX_W) {
                    out.push_str("64");
                }
            }
            [a, b] => {
                out.push(a);
                out.push(b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::modrm::ModRm;
    use dasm86_core::{AddressMode, DisasmOptions, Syntax};

    fn expand(opts: &DisasmOptions, rex: u8, data: bool, template: &str) -> String {
        let mut st = DecodeState::new(opts, 0);
        st.rex = rex;
        if data {
            st.prefixes.flags |= PrefixFlags::DATA;
        }
        st.expand(template)
    }

    #[test]
    fn test_sign_extension_names() {
        let att = DisasmOptions::default();
        let intel = DisasmOptions::default().with_syntax(Syntax::Intel);
        assert_eq!(expand(&att, 0, false, "cW{t|}R"), "cwtl");
        assert_eq!(expand(&att, 0x48, false, "cW{t|}R"), "cltq");
        assert_eq!(expand(&att, 0, true, "cW{t|}R"), "cbtw");
        assert_eq!(expand(&intel, 0, false, "cW{t|}R"), "cwde");
        assert_eq!(expand(&intel, 0x48, false, "cW{t|}R"), "cdqe");
        assert_eq!(expand(&intel, 0, true, "cW{t|}R"), "cbw");
        assert_eq!(expand(&att, 0x48, false, "cR{t|}O"), "cqto");
        assert_eq!(expand(&intel, 0, false, "cR{t|}O"), "cdq");
        assert_eq!(expand(&intel, 0, true, "cR{t|}O"), "cwd");
    }

    #[test]
    fn test_alternatives_and_zero_extension() {
        let att = DisasmOptions::default();
        let intel = DisasmOptions::default().with_syntax(Syntax::Intel);
        assert_eq!(expand(&att, 0, false, "movz{bR|x}"), "movzbl");
        assert_eq!(expand(&intel, 0, false, "movz{bR|x}"), "movzx");
        assert_eq!(expand(&att, 0x48, false, "movs{lq|xd}"), "movslq");
        assert_eq!(expand(&intel, 0x48, false, "movs{lq|xd}"), "movsxd");
        assert_eq!(expand(&att, 0x48, false, "movs%XD"), "movslq");
        assert_eq!(expand(&att, 0, false, "movs%XD"), "movsxd");
        assert_eq!(expand(&att, 0x48, false, "fxsave%64"), "fxsave64");
        assert_eq!(expand(&att, 0, false, "fxsave%64"), "fxsave");
    }

    #[test]
    fn test_jcxz_by_address_size() {
        let long = DisasmOptions::default();
        assert_eq!(expand(&long, 0, false, "jEcxz"), "jrcxz");
        let prot = DisasmOptions::new(AddressMode::Mode32);
        assert_eq!(expand(&prot, 0, false, "jEcxz"), "jecxz");
        let real = DisasmOptions::new(AddressMode::Mode16);
        assert_eq!(expand(&real, 0, false, "jEcxz"), "jcxz");
    }

    #[test]
    fn test_stack_letters() {
        let att = DisasmOptions::default();
        assert_eq!(expand(&att, 0, false, "retT"), "ret");
        assert_eq!(expand(&att, 0, true, "retT"), "retw");
        assert_eq!(expand(&att, 0, false, "call@"), "call");
        let mut suffixed = DisasmOptions::default();
        suffixed.suffix_always = true;
        assert_eq!(expand(&suffixed, 0, false, "call@"), "callq");
        assert_eq!(expand(&suffixed, 0, false, "pushT"), "pushq");
    }

    #[test]
    fn test_fpu_reverse_forms() {
        let att = DisasmOptions::default();
        assert_eq!(expand(&att, 0, false, "fsub{!M|r}"), "fsub");
        assert_eq!(expand(&att, 0, false, "fsub{M|}"), "fsubr");
        let mut mnem = DisasmOptions::default();
        mnem.intel_mnemonic = true;
        assert_eq!(expand(&mnem, 0, false, "fsub{!M|r}"), "fsubr");
        let intel = DisasmOptions::default().with_syntax(Syntax::Intel);
        assert_eq!(expand(&intel, 0, false, "fsub{!M|r}"), "fsubr");
        assert_eq!(expand(&intel, 0, false, "fsub{M|}"), "fsub");
    }

    #[test]
    fn test_memory_suffix_and_pairs() {
        let att = DisasmOptions::default();
        let mut st = DecodeState::new(&att, 0);
        st.modrm = Some(ModRm::from_byte(0x00));
        assert_eq!(st.expand("incQ"), "incl");
        st.modrm = Some(ModRm::from_byte(0xc0));
        assert_eq!(st.expand("incQ"), "inc");
        st.rex = 0x48;
        assert_eq!(st.expand("cmpxchg%CB"), "cmpxchg16b");
        st.cmp_infix = Some("lt");
        assert_eq!(st.expand("cmp%CCps"), "cmpltps");
    }
}
