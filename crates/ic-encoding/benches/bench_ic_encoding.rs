use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ic_encoding::{clean_text, detect_encoding, detect_file_format};

fn generate_novel_text(size_kb: usize) -> String {
    let fragments = [
        "第十二章 雨夜\n\n",
        "巷子里的灯忽明忽暗，他把伞压得很低。",
        "“你不该来的。”她说，手指攥紧了门框。",
        "The rain kept falling on the tin roof, steady and indifferent. ",
        "远处传来火车的汽笛声，一长两短。\n\n",
    ];
    let mut text = String::with_capacity(size_kb * 1024);
    let mut i = 0;
    while text.len() < size_kb * 1024 {
        text.push_str(fragments[i % fragments.len()]);
        i += 1;
    }
    text
}

fn bench_detect_encoding(c: &mut Criterion) {
    let text_10k = generate_novel_text(10);
    let utf8_bytes = text_10k.as_bytes().to_vec();
    let (gbk_bytes, _, _) = encoding_rs::GBK.encode(&text_10k);
    let gbk_bytes = gbk_bytes.into_owned();

    c.bench_function("detect_encoding_utf8_10kb", |b| {
        b.iter(|| black_box(detect_encoding(black_box(&utf8_bytes))))
    });
    c.bench_function("detect_encoding_gbk_10kb", |b| {
        b.iter(|| black_box(detect_encoding(black_box(&gbk_bytes))))
    });
}

fn bench_clean_text(c: &mut Criterion) {
    let text_10k = generate_novel_text(10);
    let text_100k = generate_novel_text(100);

    c.bench_function("clean_text_10kb", |b| {
        b.iter(|| black_box(clean_text(black_box(&text_10k), true)))
    });
    c.bench_function("clean_text_100kb", |b| {
        b.iter(|| black_box(clean_text(black_box(&text_100k), false)))
    });
}

fn bench_detect_format(c: &mut Criterion) {
    let text_10k = generate_novel_text(10);

    c.bench_function("detect_file_format_10kb", |b| {
        b.iter(|| black_box(detect_file_format("novel.txt", black_box(&text_10k))))
    });
}

criterion_group!(benches, bench_detect_encoding, bench_clean_text, bench_detect_format);
criterion_main!(benches);
