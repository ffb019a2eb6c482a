//! Recognizer benchmarks.
//!
//! Run with: `cargo bench --package scalar-syn`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scalar_syn::parse;

fn bench_small_class(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognize_small");

    let source = "class C { def f(x: Int): Int = x + 1 }";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("small_class", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

fn bench_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognize_expressions");

    let source = r#"
        object Calc {
          def eval(a: Int, b: Int, c: Int): Int = {
            val sum = a + b * c - (a min b)
            val chained = List(a, b, c).map(x => x * 2).filter(_ > 0).sum
            if (sum > chained) sum else chained
          }
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("expressions", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

fn bench_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognize_templates");

    let source = r#"
        package bench

        sealed trait Shape { def area: Double }

        final case class Circle(r: Double) extends Shape {
          def area: Double = 3.14159 * r * r
        }

        final case class Rect(w: Double, h: Double) extends Shape {
          def area: Double = w * h
        }

        object Shape {
          def total(shapes: Seq[Shape]): Double =
            shapes match {
              case head +: tail => head.area + total(tail)
              case _            => 0.0
            }
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("templates", |b| b.iter(|| parse(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_small_class,
    bench_expressions,
    bench_templates
);
criterion_main!(benches);
