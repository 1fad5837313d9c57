//! Snapshot bytes to exported Markdown file, the path the CLI takes.

#![allow(clippy::unwrap_used)]

use chat_export::encoding::decode_snapshot;
use chat_export::export::{document_filename, message_count_label, render_markdown};
use chat_export::{extract, ExportOptions, Locale, Options, SnapshotPage, TokioClock};
use chrono::FixedOffset;

fn snapshot_options() -> Options {
    Options {
        scroll: false,
        ..Options::default()
    }
}

fn utc_export(locale: Locale) -> ExportOptions {
    ExportOptions {
        locale,
        utc_offset: FixedOffset::east_opt(0),
    }
}

#[tokio::test]
async fn chatgpt_snapshot_exports_markdown() {
    let html = r#"<html><head><meta charset="utf-8"><title>Lifetimes 101</title></head><body><main>
        <article><h5>You said:</h5><div class="text-base">What does 'static mean?</div></article>
        <article><h6>ChatGPT said:</h6><div class="text-base"><p>It means the reference can live for the <strong>entire program</strong>.</p><pre><code>let s: &amp;'static str = "hi";</code></pre></div></article>
    </main></body></html>"#;
    let page = SnapshotPage::new("https://chatgpt.com/c/68f1", decode_snapshot(html.as_bytes()));

    let doc = extract(&page, &TokioClock, &snapshot_options()).await.unwrap();
    let md = render_markdown(&doc, &utc_export(Locale::En));

    assert!(md.starts_with("# Lifetimes 101\n\n**Platform:** ChatGPT\n"));
    assert!(md.contains("**Message Count:** 1\n\n---\n\n"));
    assert!(md.contains("👤 User: What does 'static mean?\n\n"));
    assert!(md.contains(
        "🤖 AI: It means the reference can live for the **entire program**.\n\n\
         ```\nlet s: &'static str = \"hi\";\n```\n\n---\n\n"
    ));

    let filename = document_filename(&doc, &utc_export(Locale::En));
    assert!(filename.starts_with("Lifetimes_101_"));
    assert!(filename.ends_with(".md"));
}

#[tokio::test]
async fn gbk_snapshot_with_chinese_labels() {
    // <title>对话</title> with the body text "你说：" / "好" encoded as GBK
    let mut bytes = br#"<html><head><meta charset="gbk"><title>"#.to_vec();
    bytes.extend_from_slice(&[0xB6, 0xD4, 0xBB, 0xB0]); // 对话
    bytes.extend_from_slice(br#"</title></head><body><main><article><h5>"#);
    bytes.extend_from_slice(&[0xC4, 0xE3, 0xCB, 0xB5]); // 你说
    bytes.extend_from_slice(br#"</h5><div class="text-base">hi</div></article>"#);
    bytes.extend_from_slice(br#"<article><h6>ChatGPT</h6><div class="text-base"><p>"#);
    bytes.extend_from_slice(&[0xBA, 0xC3]); // 好
    bytes.extend_from_slice(b"</p></div></article></main></body></html>");

    let page = SnapshotPage::new("https://chatgpt.com/c/1", decode_snapshot(&bytes));
    let doc = extract(&page, &TokioClock, &snapshot_options()).await.unwrap();

    assert_eq!(doc.title, "对话");
    assert_eq!(doc.turns.len(), 1);
    assert_eq!(doc.turns[0].user, "hi");
    assert_eq!(doc.turns[0].ai, "好");

    let md = render_markdown(&doc, &utc_export(Locale::from_tag("zh-CN")));
    assert!(md.contains("**平台:** ChatGPT"));
    assert!(md.contains("**消息数量:** 1"));
    assert_eq!(message_count_label(doc.turn_count(), Locale::Zh), "1 条消息");
}

#[tokio::test]
async fn json_output_matches_ui_shape() {
    let page = SnapshotPage::new(
        "https://gemini.google.com/app/ab",
        r#"<button>Soup</button><div class="conversation-container"><div class="query-text">q</div><div class="markdown-main-panel">a</div></div>"#,
    );
    let doc = extract(&page, &TokioClock, &snapshot_options()).await.unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["platform"], "Gemini");
    assert_eq!(json["title"], "Soup");
    assert_eq!(json["messages"][0]["user"], "q");
    assert_eq!(json["messages"][0]["ai"], "a");
    assert_eq!(json["url"], "https://gemini.google.com/app/ab");
    assert!(json["timestamp"].is_string());
}
