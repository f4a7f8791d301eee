use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradecalc_core::model::{Category, GradeRecord, Status, TranscriptSnapshot};
use gradecalc_core::ranking::{sort_records, term_rank};
use gradecalc_core::statistics::{AggregateReport, CreditPolicy};

fn make_records(n: usize) -> Vec<GradeRecord> {
    let categories = [
        Some(Category::GeneralElective),
        Some(Category::Compulsory),
        Some(Category::SpecificElective),
        None,
    ];
    (0..n)
        .map(|i| {
            let year = 15 + (i % 10);
            let term = if i % 2 == 0 {
                format!("WiSe{:02}/{:02}", year, year + 1)
            } else {
                format!("SoSe{year:02}")
            };
            GradeRecord {
                exam_code: format!("{:07}", 9_999_999 - i),
                description: format!("Module {i}"),
                term,
                attempt: 1,
                grade: (i % 5 != 0).then(|| [1.0, 1.3, 1.7, 2.0, 2.3][i % 5]),
                status: Some(Status::Passed),
                credit: Some(5),
                remark: None,
                category: categories[i % categories.len()],
            }
        })
        .collect()
}

fn bench_term_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_rank");

    group.bench_function("winter_range", |b| {
        b.iter(|| term_rank(black_box("WiSe22/23")))
    });

    group.bench_function("summer", |b| b.iter(|| term_rank(black_box("Summer23"))));

    group.bench_function("unrecognized", |b| {
        b.iter(|| term_rank(black_box("Herbst23")))
    });

    group.finish();
}

fn bench_sort_and_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_and_aggregate");
    let records = make_records(200);

    group.bench_function("sort_by_category", |b| {
        b.iter(|| sort_records(black_box(&records), true))
    });

    group.bench_function("aggregate", |b| {
        let snapshot = TranscriptSnapshot::new(records.clone());
        b.iter(|| AggregateReport::compute(black_box(&snapshot), CreditPolicy::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_term_rank, bench_sort_and_aggregate);
criterion_main!(benches);
