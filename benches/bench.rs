use std::collections::HashMap;
use std::iter;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lazy_static::lazy_static;

const KB: usize = 1024;
const MB: usize = 1024 * KB;

lazy_static! {
    static ref BENCH_DATA: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Easy0", "ABCDEFGHIJKLMNOPQRSTUVWXYZ$");
        m.insert("Easy0i", "(?i)ABCDEFGHIJklmnopqrstuvwxyz$");
        m.insert("Easy1", "A[AB]B[BC]C[CD]D[DE]E[EF]F[FG]G[GH]H[HI]I[IJ]J$");
        m.insert("Medium", "[XYZ]ABCDEFGHIJKLMNOPQRSTUVWXYZ$");
        m.insert("Hard", "[ -~]*ABCDEFGHIJKLMNOPQRSTUVWXYZ$");
        m.insert("Hard1", "ABCD|CDEF|EFGH|GHIJ|IJKL|KLMN|MNOP|OPQR|QRST|STUV|UVWX|WXYZ");
        m
    };
    static ref BENCH_SIZE: Vec<usize> = vec![16, 32, KB, 32 * KB, MB];
    static ref BENCH_TEXT: Vec<u8> = {
        let mut x: u32 = !0;

        iter::from_fn(|| {
            x += x;
            x ^= 1;

            if (x as isize) < 0 {
                x ^= 0x8888_8eef
            }

            if x % 31 == 0 {
                Some(b'\n')
            } else {
                Some((x % (0x7E + 1 - 0x20) + 0x20) as u8)
            }
        })
        .take(MB)
        .collect()
    };
}

fn adapter_bench(c: &mut Criterion) {
    use re_engine_regex::prelude::*;

    let engine = RegexEngine::new();
    let ctx = CompileContext::new();
    let mut group = c.benchmark_group("adapter");

    for (&name, &expr) in BENCH_DATA.iter() {
        let mut rx = engine.compile(expr, Flags::MULTILINE, &ctx).unwrap();

        for &size in BENCH_SIZE.iter() {
            let text = BENCH_TEXT.get(..size).unwrap();

            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &(text), |b, text| {
                b.iter(|| engine.exec(&mut rx, text, 0, text.len(), 0, 0))
            });
        }
    }

    group.finish();
}

fn fallback_bench(c: &mut Criterion) {
    use re_engine_regex::prelude::*;

    let engine = RegexEngine::new();
    let ctx = CompileContext::new();
    let mut group = c.benchmark_group("fallback");

    for (&name, &expr) in BENCH_DATA.iter() {
        let mut rx = engine.compile(expr, Flags::MULTILINE | Flags::EXTENDED, &ctx).unwrap();

        for &size in BENCH_SIZE.iter() {
            let text = BENCH_TEXT.get(..size).unwrap();

            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &(text), |b, text| {
                b.iter(|| engine.exec(&mut rx, text, 0, text.len(), 0, 0))
            });
        }
    }

    group.finish();
}

fn regex_bench(c: &mut Criterion) {
    use regex::bytes::RegexBuilder;

    let mut group = c.benchmark_group("regex");

    for (&name, &expr) in BENCH_DATA.iter() {
        let re = RegexBuilder::new(expr).multi_line(true).build().unwrap();

        for &size in BENCH_SIZE.iter() {
            let text = BENCH_TEXT.get(..size).unwrap();

            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &(text), |b, text| {
                b.iter(|| re.captures(text))
            });
        }
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = adapter_bench, fallback_bench, regex_bench
}
criterion_main!(benches);
