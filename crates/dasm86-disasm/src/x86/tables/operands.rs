//! Short operand names for the opcode tables.
//!
//! Naming follows the usual opcode-map notation: a letter for the
//! addressing method and a suffix for the size.

use super::{CmpKind, Fixed, Mode, Op, VsibIndex};

// General registers and memory.
pub(crate) const Eb: Op = Op::E(Mode::B);
pub(crate) const Ew: Op = Op::E(Mode::W);
pub(crate) const Ed: Op = Op::E(Mode::D);
pub(crate) const Ev: Op = Op::E(Mode::V);
pub(crate) const Edq: Op = Op::E(Mode::Dq);
pub(crate) const En: Op = Op::E(Mode::Native);
pub(crate) const Es: Op = Op::E(Mode::StackV);
pub(crate) const Gb: Op = Op::G(Mode::B);
pub(crate) const Gw: Op = Op::G(Mode::W);
pub(crate) const Gd: Op = Op::G(Mode::D);
pub(crate) const Gq: Op = Op::G(Mode::Q);
pub(crate) const Gv: Op = Op::G(Mode::V);
pub(crate) const Gdq: Op = Op::G(Mode::Dq);
pub(crate) const Gn: Op = Op::G(Mode::Native);
pub(crate) const M0: Op = Op::M(Mode::None);
pub(crate) const Mb: Op = Op::M(Mode::B);
pub(crate) const Mw: Op = Op::M(Mode::W);
pub(crate) const Md: Op = Op::M(Mode::D);
pub(crate) const Mq: Op = Op::M(Mode::Q);
pub(crate) const Mv: Op = Op::M(Mode::V);
pub(crate) const Mdq: Op = Op::M(Mode::Dq);
pub(crate) const Mt: Op = Op::M(Mode::T);
pub(crate) const Mo: Op = Op::M(Mode::O);
pub(crate) const Mp: Op = Op::M(Mode::P);
pub(crate) const Ma: Op = Op::M(Mode::A);
pub(crate) const Mx: Op = Op::M(Mode::Vec);
pub(crate) const Mxmm: Op = Op::M(Mode::Xmm);
pub(crate) const Mymm: Op = Op::M(Mode::Ymm);
pub(crate) const Rd: Op = Op::R(Mode::D);
pub(crate) const Rq: Op = Op::R(Mode::Q);
pub(crate) const Rv: Op = Op::R(Mode::V);
pub(crate) const Rdq: Op = Op::R(Mode::Dq);
pub(crate) const Rn: Op = Op::R(Mode::Native);
pub(crate) const Eind: Op = Op::IndE(Mode::IndirV);
pub(crate) const Mfar: Op = Op::IndE(Mode::P);

// Immediates and branches.
pub(crate) const Ib: Op = Op::I(Mode::B);
pub(crate) const Iw: Op = Op::I(Mode::W);
pub(crate) const Id: Op = Op::I(Mode::D);
pub(crate) const Iv: Op = Op::I(Mode::V);
pub(crate) const Is: Op = Op::I(Mode::StackV);
pub(crate) const sIb: Op = Op::SI(Mode::V);
pub(crate) const sIbs: Op = Op::SI(Mode::StackV);
pub(crate) const Iv64: Op = Op::Iv64;
pub(crate) const Jb: Op = Op::J(Mode::B);
pub(crate) const Jv: Op = Op::J(Mode::V);
pub(crate) const Ap: Op = Op::Ap;
pub(crate) const Ob: Op = Op::Off(Mode::B);
pub(crate) const Ov: Op = Op::Off(Mode::V);

// Fixed and opcode-embedded registers.
pub(crate) const AL: Op = Op::Acc(Mode::B);
pub(crate) const AX: Op = Op::Acc(Mode::W);
pub(crate) const eAX: Op = Op::Acc(Mode::V);
pub(crate) const zAX: Op = Op::Acc(Mode::Z);
pub(crate) const CL: Op = Op::Fixed(Fixed::Cl);
pub(crate) const DXp: Op = Op::Fixed(Fixed::DxPort);
pub(crate) const ES: Op = Op::Fixed(Fixed::Es);
pub(crate) const CS: Op = Op::Fixed(Fixed::Cs);
pub(crate) const SS: Op = Op::Fixed(Fixed::Ss);
pub(crate) const DS: Op = Op::Fixed(Fixed::Ds);
pub(crate) const FS: Op = Op::Fixed(Fixed::Fs);
pub(crate) const GS: Op = Op::Fixed(Fixed::Gs);
pub(crate) const XMM0: Op = Op::Fixed(Fixed::Xmm0);
pub(crate) const Zb: Op = Op::OpReg(Mode::B);
pub(crate) const Zv: Op = Op::OpReg(Mode::V);
pub(crate) const Zdq: Op = Op::OpReg(Mode::Dq);
pub(crate) const Zs: Op = Op::OpReg(Mode::StackV);
pub(crate) const Sw: Op = Op::Sw;
pub(crate) const Cr: Op = Op::Cr;
pub(crate) const Dr: Op = Op::Dr;
pub(crate) const Tr: Op = Op::Tr;

// MMX.
pub(crate) const Pq: Op = Op::P;
pub(crate) const Qq: Op = Op::Q(Mode::Q);
pub(crate) const Nq: Op = Op::N;
pub(crate) const MXg: Op = Op::MxG;
pub(crate) const MXd: Op = Op::MxE(Mode::D);
pub(crate) const MXq: Op = Op::MxE(Mode::Q);

// Vector registers.
pub(crate) const Vx: Op = Op::V(Mode::Vec);
pub(crate) const Vo: Op = Op::V(Mode::Xmm);
pub(crate) const Vh: Op = Op::V(Mode::Half);
pub(crate) const Wx: Op = Op::W(Mode::Vec);
pub(crate) const Wo: Op = Op::W(Mode::Xmm);
pub(crate) const Wy: Op = Op::W(Mode::Ymm);
pub(crate) const Wh: Op = Op::W(Mode::Half);
pub(crate) const Wqu: Op = Op::W(Mode::Quarter);
pub(crate) const We: Op = Op::W(Mode::Eighth);
pub(crate) const Wb: Op = Op::W(Mode::B);
pub(crate) const Ww: Op = Op::W(Mode::W);
pub(crate) const Wd: Op = Op::W(Mode::D);
pub(crate) const Wq: Op = Op::W(Mode::Q);
pub(crate) const Wsw: Op = Op::W(Mode::ElemW);
pub(crate) const Wbx: Op = Op::W(Mode::VecB);
pub(crate) const Wbd: Op = Op::W(Mode::VecBd);
pub(crate) const Wbq: Op = Op::W(Mode::VecBq);
pub(crate) const Whb: Op = Op::W(Mode::HalfBd);
pub(crate) const Ux: Op = Op::U(Mode::Vec);
pub(crate) const Uo: Op = Op::U(Mode::Xmm);
pub(crate) const Hx: Op = Op::H(Mode::Vec);
pub(crate) const Ho: Op = Op::H(Mode::Xmm);
pub(crate) const Hh: Op = Op::H(Mode::Half);
pub(crate) const Lx: Op = Op::L(Mode::Vec);
pub(crate) const Lo: Op = Op::L(Mode::Xmm);
pub(crate) const By: Op = Op::By(Mode::Dq);

// Mask, bound and tile registers.
pub(crate) const KG: Op = Op::KG;
pub(crate) const KH: Op = Op::KH;
pub(crate) const KR: Op = Op::KR;
pub(crate) const KEb: Op = Op::KE(Mode::B);
pub(crate) const KEw: Op = Op::KE(Mode::W);
pub(crate) const KEd: Op = Op::KE(Mode::D);
pub(crate) const KEq: Op = Op::KE(Mode::Q);
pub(crate) const BndG: Op = Op::BndG;
pub(crate) const BndE: Op = Op::BndE(Mode::O);
pub(crate) const TG: Op = Op::TG;
pub(crate) const TE: Op = Op::TE;
pub(crate) const TH: Op = Op::TH;

// Decorations and implicit operands.
pub(crate) const Rc: Op = Op::Rc;
pub(crate) const Sae: Op = Op::Sae;
pub(crate) const ST: Op = Op::St;
pub(crate) const STi: Op = Op::Sti;
pub(crate) const Xb: Op = Op::X(Mode::B);
pub(crate) const Xv: Op = Op::X(Mode::V);
pub(crate) const Xz: Op = Op::X(Mode::Z);
pub(crate) const Yb: Op = Op::Y(Mode::B);
pub(crate) const Yv: Op = Op::Y(Mode::V);
pub(crate) const Yz: Op = Op::Y(Mode::Z);
pub(crate) const XLAT: Op = Op::Xlat;
pub(crate) const I1: Op = Op::One;
pub(crate) const CMP_SSE: Op = Op::Cmp(CmpKind::Sse);
pub(crate) const CMP_AVX: Op = Op::Cmp(CmpKind::Avx);
pub(crate) const CMP_VPCMP: Op = Op::Cmp(CmpKind::Vpcmp);
pub(crate) const CMP_XOP: Op = Op::Cmp(CmpKind::Xop);
pub(crate) const CMP_CLMUL: Op = Op::Cmp(CmpKind::Pclmul);
pub(crate) const SUFFIX_3DNOW: Op = Op::Suffix3dNow;

// VSIB: element size, then index width relative to the vector length.
pub(crate) const VSIBd: Op = Op::Vsib(Mode::D, VsibIndex::Full);
pub(crate) const VSIBq: Op = Op::Vsib(Mode::Q, VsibIndex::Full);
pub(crate) const VSIBqh: Op = Op::Vsib(Mode::Q, VsibIndex::Half);
