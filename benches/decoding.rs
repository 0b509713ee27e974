use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use mailclassify::controller::ResultView;
use mailclassify::model::input::{validate_text, FilePayload, InputLimits};
use mailclassify::model::result::ClassificationResult;
use mailclassify::model::sample::SampleKind;

fn bench_decode_response(c: &mut Criterion) {
    let body = json!({
        "category": "PRODUTIVO",
        "reasoning": "Pedido de suporte",
        "suggested_response": "Olá! Recebemos sua solicitação e vamos verificar o acesso.",
        "original_content": SampleKind::Produtivo.text(),
        "char_count": 1234,
        "word_count": "210",
        "filename": null
    });

    c.bench_function("decode_classification_response", |b| {
        b.iter(|| {
            let result = ClassificationResult::from_json(black_box(body.clone())).unwrap();
            ResultView::from_result(&result)
        })
    });
}

fn bench_validate_text(c: &mut Criterion) {
    let limits = InputLimits::default();
    let text = SampleKind::Improdutivo.text().repeat(200);

    c.bench_function("validate_long_text", |b| {
        b.iter(|| validate_text(black_box(&text), &limits).unwrap())
    });
}

fn bench_preview_legacy_text(c: &mut Criterion) {
    // Latin-1 bytes force the Windows-1252 fallback
    let bytes: Vec<u8> = SampleKind::Produtivo
        .text()
        .chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect();
    let file = FilePayload::new("legacy.txt", "text/plain", bytes.repeat(50));

    c.bench_function("preview_windows_1252", |b| {
        b.iter(|| black_box(&file).preview(12))
    });
}

criterion_group!(
    benches,
    bench_decode_response,
    bench_validate_text,
    bench_preview_legacy_text
);
criterion_main!(benches);
