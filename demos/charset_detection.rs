//! Example demonstrating charset detection and UTF-8 conversion
//!
//! Shows which stage decides the charset for a few typical inputs and how
//! failed conversions hand the input back untouched.

use emx_charset::{CharsetLabel, DecoderRegistry, Detector, Transcoder};

fn main() -> anyhow::Result<()> {
    println!("=== Charset Detection Example ===\n");

    let (gbk, _, _) = encoding_rs::GBK.encode("中文编码检测：你好，世界！这是一段简体中文。");
    let (shift_jis, _, _) = encoding_rs::SHIFT_JIS.encode("日本語のテキストです。文字コードを判定します。");
    let (latin1, _, _) = encoding_rs::WINDOWS_1252.encode("café");

    let samples: Vec<(&str, Vec<u8>)> = vec![
        ("ascii", b"plain ascii text".to_vec()),
        ("utf-8", "UTF-8 text with ümlauts and 汉字".as_bytes().to_vec()),
        ("gbk", gbk.into_owned()),
        ("shift_jis", shift_jis.into_owned()),
        ("latin1 word", latin1.into_owned()),
        ("empty", Vec::new()),
    ];

    let registry = DecoderRegistry::default();
    let transcoder = Transcoder::with_detector(Detector::new(), &registry);

    println!("Detection Results:");
    println!("-----------------");
    for (i, (name, data)) in samples.iter().enumerate() {
        let detection = transcoder.detect(data);
        let result = transcoder.to_utf8(data);

        println!(
            "{}. {} - {} bytes | Charset: {} | Reliable: {} | Stage: {}",
            i + 1,
            name,
            data.len(),
            if detection.label.is_empty() { "-" } else { detection.label.as_str() },
            detection.reliable,
            detection.source,
        );

        match &result.error {
            None => println!("   Text: {}", result.text),
            Some(err) => println!("   Failed: {} (input returned as-is)", err),
        }
    }

    // Retry a failed conversion with a forced charset
    let latin1 = encoding_rs::WINDOWS_1252.encode("café").0;
    let forced = transcoder.decode_as(&latin1, &CharsetLabel::new("latin1"));
    println!("\nForced LATIN1 retry: {} (ok: {})", forced.text, forced.ok());

    Ok(())
}
