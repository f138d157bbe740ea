use commitrank::aggregate::PeriodAggregator;
use commitrank::metrics::build_metrics;
use commitrank::parser::{HeaderLayout, LogStreamParser};
use commitrank::period::Granularity;
use commitrank::{analyze_log, AnalysisOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fmt::Write;

const AUTHORS: [&str; 6] = ["Alice", "Bob", "Carol", "Dan", "Erin", "Frank"];

fn synthetic_log(commits: usize) -> String {
    let mut out = String::new();
    for i in 0..commits {
        let month = 1 + (i / 300) % 12;
        let day = 1 + i % 28;
        let author = AUTHORS[i % AUTHORS.len()];
        let _ = writeln!(out, "{i:07x}|2024-{month:02}-{day:02}|{author}|change {i} | tweak");
        for f in 0..(i % 5) {
            let _ = writeln!(out, "{}\t{}\tsrc/mod{f}/file{}.rs", (i * 7 + f) % 90, (i * 3) % 40, i % 50);
        }
        if i % 17 == 0 {
            let _ = writeln!(out, "-\t-\tassets/img{i}.png");
        }
        out.push('\n');
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let log = synthetic_log(20_000);

    c.bench_function("parse_20k_commits", |b| {
        b.iter(|| {
            LogStreamParser::new(black_box(&log), &Granularity::Month, HeaderLayout::Standard).count()
        })
    });

    c.bench_function("parse_and_aggregate_20k_commits", |b| {
        b.iter(|| {
            let aggregator: PeriodAggregator =
                LogStreamParser::new(black_box(&log), &Granularity::Week, HeaderLayout::Standard).collect();
            build_metrics(&aggregator)
        })
    });

    c.bench_function("analyze_log_20k_commits", |b| {
        let options = AnalysisOptions::default();
        b.iter(|| analyze_log("bench", black_box(&log), &options))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
