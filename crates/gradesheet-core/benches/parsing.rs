use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradesheet_core::parser::{parse_metadata, parse_questions, split_exam_blocks};
use gradesheet_core::report::build_file_record;

fn bench_parse_questions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_questions");

    let technician = generate_sheet("Jane Doe", 35);
    let extra = generate_sheet("Jane Doe", 50);
    let two_column = generate_two_column_sheet(50);

    group.bench_function("35_rows", |b| {
        b.iter(|| parse_questions(black_box(&technician)))
    });

    group.bench_function("50_rows", |b| b.iter(|| parse_questions(black_box(&extra))));

    group.bench_function("50_rows_two_column", |b| {
        b.iter(|| parse_questions(black_box(&two_column)))
    });

    group.bench_function("metadata", |b| {
        b.iter(|| parse_metadata(black_box(&technician)))
    });

    group.finish();
}

fn bench_build_file_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_file_record");

    let single = generate_sheet("Jane Doe", 35);
    let concatenated: String = (0..20).map(|_| generate_sheet("Jane Doe", 35)).collect();

    group.bench_function("split_20_exams", |b| {
        b.iter(|| split_exam_blocks(black_box(&concatenated)))
    });

    group.bench_function("single_exam", |b| {
        b.iter(|| build_file_record(black_box(&single), Path::new("bench.txt")))
    });

    group.bench_function("20_exams", |b| {
        b.iter(|| build_file_record(black_box(&concatenated), Path::new("bench.txt")))
    });

    group.finish();
}

fn generate_sheet(name: &str, questions: u32) -> String {
    let mut s = format!(
        "{name} (PIN: 123456)\nFAIL\nTest Failed - {} out of {questions}\nElement 2 Test #3\n",
        questions / 2
    );
    for n in 1..=questions {
        if n % 3 == 0 {
            s.push_str(&format!("{n}. T{}A{:02}: B (should be C)\n", n % 10, n));
        } else {
            s.push_str(&format!("{n}. T{}A{:02}: D\n", n % 10, n));
        }
    }
    s.push_str("Exam started at 2024-03-02 09:14 by VE1\nExam graded at 2024-03-02 09:52 by VE2\n");
    s
}

fn generate_two_column_sheet(questions: u32) -> String {
    let half = questions / 2;
    let mut s = String::new();
    for n in 1..=half {
        s.push_str(&format!(
            "{n}. G{}B{:02}: A     {}. G{}C{:02}: C\n",
            n % 10,
            n,
            n + half,
            (n + half) % 10,
            n + half
        ));
    }
    s
}

criterion_group!(benches, bench_parse_questions, bench_build_file_record);
criterion_main!(benches);
