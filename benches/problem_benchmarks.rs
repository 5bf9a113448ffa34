use criterion::{Criterion, black_box, criterion_group, criterion_main};

use regroup::engine::evaluate::{DigitCell, evaluate};
use regroup::engine::problem::{Difficulty, Operation};
use regroup::engine::regrouping::analyze;
use regroup::generator::{ProblemGenerator, RandomProblemGenerator};

fn bench_generate(c: &mut Criterion) {
    let mut generator = RandomProblemGenerator::seeded(7);

    c.bench_function("generate (4-digit subtraction)", |b| {
        b.iter(|| generator.generate(black_box(Difficulty::FourDigit), Operation::Subtraction))
    });
}

fn bench_analyze(c: &mut Criterion) {
    let mut generator = RandomProblemGenerator::seeded(7);
    let problems: Vec<_> = (0..256)
        .map(|i| {
            let op = if i % 2 == 0 {
                Operation::Addition
            } else {
                Operation::Subtraction
            };
            generator.generate(Difficulty::FourDigit, op)
        })
        .collect();

    c.bench_function("analyze (256 mixed problems)", |b| {
        b.iter(|| {
            problems
                .iter()
                .map(|p| analyze(black_box(p)).regroup_count())
                .sum::<usize>()
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut generator = RandomProblemGenerator::seeded(7);
    let problem = generator.generate(Difficulty::FourDigit, Operation::Addition);
    let trace = analyze(&problem);
    let entered: Vec<DigitCell> = trace
        .answer_digits
        .iter()
        .map(|&d| DigitCell::Digit(d))
        .collect();

    c.bench_function("evaluate (4-digit addition)", |b| {
        b.iter(|| evaluate(black_box(&trace), black_box(&entered)))
    });
}

criterion_group!(benches, bench_generate, bench_analyze, bench_evaluate);
criterion_main!(benches);
