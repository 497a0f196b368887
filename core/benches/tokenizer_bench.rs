use criterion::{criterion_group, criterion_main, Criterion};
use sitesearch_core::{FieldKind, Tokenizer};

const SAMPLE: &str = "Error handling in Rust usually starts with Result and the \
question mark operator, then grows into thiserror for library crates and anyhow \
for binaries. 全文検索エンジンを静的サイトに組み込む場合、転置インデックスを \
ビルド時に生成しておくと便利です。grep, awk, and sed remain the sharpest tools \
for one-off text surgery, 中文分词在没有空格的情况下需要用二元组来切分。";

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let text = SAMPLE.repeat(50);
    c.bench_function("tokenize_mixed_script", |b| {
        b.iter(|| tokenizer.tokenize(&text, FieldKind::Content))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
