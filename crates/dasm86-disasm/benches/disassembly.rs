//! Benchmarks for disassembly performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dasm86_core::{DisasmOptions, Syntax};
use dasm86_disasm::{Disassembler, X86Disassembler};

/// A small function mixing integer, control-flow and memory forms.
const SCALAR_CODE: &[u8] = &[
    0x55, // push rbp
    0x48, 0x89, 0xe5, // mov rbp, rsp
    0x48, 0x83, 0xec, 0x20, // sub rsp, 0x20
    0x48, 0x89, 0x7d, 0xf8, // mov [rbp-8], rdi
    0x48, 0x8b, 0x45, 0xf8, // mov rax, [rbp-8]
    0x48, 0x83, 0xc0, 0x01, // add rax, 1
    0x48, 0x83, 0x7d, 0xf0, 0x0a, // cmp qword [rbp-16], 10
    0x7e, 0x07, // jle .L1
    0xb8, 0x01, 0x00, 0x00, 0x00, // mov eax, 1
    0xeb, 0x05, // jmp .L2
    0xb8, 0x00, 0x00, 0x00, 0x00, // .L1: mov eax, 0
    0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00, // .L2: mov rax, [rip+0x10]
    0x5d, // pop rbp
    0xc3, // ret
];

/// Vector code: SSE, VEX and EVEX forms.
const VECTOR_CODE: &[u8] = &[
    0x66, 0x0f, 0xef, 0xc0, // pxor xmm0, xmm0
    0xc5, 0xfc, 0x28, 0x0f, // vmovaps ymm1, [rdi]
    0xc5, 0xf4, 0x58, 0xc2, // vaddps ymm0, ymm1, ymm2
    0xc4, 0xe2, 0x7d, 0x18, 0x06, // vbroadcastss ymm0, [rsi]
    0x62, 0xf1, 0x7c, 0x48, 0x58, 0xc1, // vaddps zmm0, zmm0, zmm1
    0x62, 0xf1, 0x7c, 0x58, 0x58, 0x06, // vaddps zmm0, zmm0, [rsi]{1to16}
    0xc5, 0xf8, 0x77, // vzeroupper
    0xc3, // ret
];

/// Larger code block for throughput testing (repeated pattern).
fn generate_block(pattern: &[u8], size: usize) -> Vec<u8> {
    let mut result = Vec::with_capacity(size);
    while result.len() < size {
        let remaining = size - result.len();
        let to_copy = remaining.min(pattern.len());
        result.extend_from_slice(&pattern[..to_copy]);
    }
    result
}

fn bench_scalar(c: &mut Criterion) {
    let att = X86Disassembler::new(DisasmOptions::default());
    let intel = X86Disassembler::new(DisasmOptions::default().with_syntax(Syntax::Intel));

    let mut group = c.benchmark_group("x86_scalar");

    group.bench_function("single_instruction", |b| {
        b.iter(|| {
            let _ = att.decode_instruction(black_box(&SCALAR_CODE[1..4]), 0x1000);
        })
    });

    group.bench_function("small_function_att", |b| {
        b.iter(|| {
            let _ = att.disassemble_block(black_box(SCALAR_CODE), 0x1000);
        })
    });

    group.bench_function("small_function_intel", |b| {
        b.iter(|| {
            let _ = intel.disassemble_block(black_box(SCALAR_CODE), 0x1000);
        })
    });

    for size in [1024, 4096, 16384, 65536] {
        let code = generate_block(SCALAR_CODE, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("throughput", size), &code, |b, code| {
            b.iter(|| {
                let _ = att.decode_all(black_box(code), 0x1000);
            })
        });
    }

    group.finish();
}

fn bench_vector(c: &mut Criterion) {
    let disasm = X86Disassembler::new(DisasmOptions::default());

    let mut group = c.benchmark_group("x86_vector");

    group.bench_function("small_function", |b| {
        b.iter(|| {
            let _ = disasm.disassemble_block(black_box(VECTOR_CODE), 0x1000);
        })
    });

    for size in [4096, 65536] {
        let code = generate_block(VECTOR_CODE, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("throughput", size), &code, |b, code| {
            b.iter(|| {
                let _ = disasm.decode_all(black_box(code), 0x1000);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalar, bench_vector);
criterion_main!(benches);
