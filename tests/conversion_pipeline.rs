// tests/conversion_pipeline.rs
//! End-to-end conversions against an in-memory workspace.

mod support;

use notion2markdown::analytics::count_nodes;
use notion2markdown::constants::EMPTY_DOCUMENT_PLACEHOLDER;
use notion2markdown::error::NotionErrorCode;
use notion2markdown::{AppError, BlockId, ConverterConfig, MarkdownConverter};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::*;

fn config(max_depth: usize, max_nodes: usize) -> ConverterConfig {
    ConverterConfig {
        max_depth,
        max_nodes,
        ..ConverterConfig::default()
    }
}

fn root() -> BlockId {
    BlockId::new("root")
}

fn sample_workspace() -> FakeWorkspace {
    FakeWorkspace::new()
        .with_children(
            "root",
            vec![
                heading("h1", 1, "Plan"),
                paragraph("p1", "Intro"),
                with_children(bullet("b1", "Parent")),
                numbered("n1", "One"),
                numbered("n2", "Two"),
                paragraph("p2", "Break"),
                numbered("n3", "Again"),
                table("t1", 2, true, false),
                json!({"object": "block", "id": "d1", "type": "divider", "has_children": false, "divider": {}}),
            ],
        )
        .with_children("b1", vec![bullet("b2", "Child")])
        .with_children(
            "t1",
            vec![table_row("r1", &["A", "B"]), table_row("r2", &["1", "2"])],
        )
}

#[tokio::test]
async fn converts_a_full_document() {
    let workspace = sample_workspace();
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let markdown = converter.convert(&root()).await.unwrap();

    insta::assert_snapshot!(markdown, @r###"
    # Plan

    Intro

    - Parent
      - Child

    1. One

    2. Two

    Break

    1. Again

    | A | B |
    | --- | --- |
    | 1 | 2 |

    ---
    "###);
}

#[tokio::test]
async fn report_describes_the_fetch() {
    let workspace = sample_workspace();
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let (_, report) = converter.convert_with_report(&root()).await.unwrap();

    assert_eq!(report.nodes_materialized, 12);
    assert_eq!(report.deepest_level, 2);
    assert_eq!(report.requests, 3);
    assert_eq!(report.malformed_skipped, 0);
    assert!(!report.is_truncated());
}

#[tokio::test]
async fn build_tree_keeps_fetch_order() {
    let workspace = sample_workspace();
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let tree = converter.build_tree(&root()).await.unwrap();

    let ids: Vec<_> = tree.nodes.iter().map(|n| n.block.id().as_str()).collect();
    assert_eq!(ids, vec!["h1", "p1", "b1", "n1", "n2", "p2", "n3", "t1", "d1"]);
    assert_eq!(count_nodes(&tree.nodes), 12);
}

#[tokio::test]
async fn empty_page_is_the_placeholder() {
    let workspace = FakeWorkspace::new().with_children("root", Vec::new());
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    assert_eq!(
        converter.convert(&root()).await.unwrap(),
        EMPTY_DOCUMENT_PLACEHOLDER
    );
}

#[tokio::test]
async fn blocks_without_text_are_the_placeholder() {
    let workspace = FakeWorkspace::new().with_children(
        "root",
        vec![paragraph("p1", ""), heading("h1", 2, "")],
    );
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    assert_eq!(
        converter.convert(&root()).await.unwrap(),
        EMPTY_DOCUMENT_PLACEHOLDER
    );
}

#[tokio::test]
async fn depth_cap_renders_nested_blocks_as_leaves() {
    let workspace = sample_workspace();
    let converter = MarkdownConverter::new(&workspace, config(1, 500));

    let (markdown, report) = converter.convert_with_report(&root()).await.unwrap();

    assert!(markdown.contains("- Parent"));
    assert!(!markdown.contains("Child"));
    assert!(markdown.contains("[Table]"));
    assert!(report.depth_cap_reached);
    assert!(!report.node_cap_reached);
    assert_eq!(workspace.child_requests(), 1);
}

#[tokio::test]
async fn zero_depth_fetches_nothing() {
    let workspace = sample_workspace();
    let converter = MarkdownConverter::new(&workspace, config(0, 500));

    let markdown = converter.convert(&root()).await.unwrap();

    assert_eq!(markdown, EMPTY_DOCUMENT_PLACEHOLDER);
    assert_eq!(workspace.child_requests(), 0);
}

#[tokio::test]
async fn node_cap_stops_mid_pagination_without_error() {
    let workspace = FakeWorkspace::new().with_paged_children(
        "root",
        vec![
            vec![paragraph("a1", "A1"), paragraph("a2", "A2")],
            vec![paragraph("b1", "B1"), paragraph("b2", "B2")],
            vec![paragraph("c1", "C1"), paragraph("c2", "C2")],
        ],
    );
    let converter = MarkdownConverter::new(&workspace, config(3, 3));

    let (markdown, report) = converter.convert_with_report(&root()).await.unwrap();

    assert_eq!(markdown, "A1\n\nA2\n\nB1");
    assert!(report.node_cap_reached);
    assert_eq!(report.nodes_materialized, 3);
    assert_eq!(report.requests, 2);
    assert_eq!(workspace.child_requests(), 2);
}

#[tokio::test]
async fn node_cap_is_shared_across_the_tree() {
    let workspace = FakeWorkspace::new()
        .with_children(
            "root",
            vec![with_children(bullet("b1", "Top")), paragraph("p1", "After")],
        )
        .with_children("b1", vec![bullet("c1", "Nested one"), bullet("c2", "Nested two")]);
    let converter = MarkdownConverter::new(&workspace, config(3, 3));

    let (markdown, report) = converter.convert_with_report(&root()).await.unwrap();

    assert_eq!(markdown, "- Top\n  - Nested one\n\nAfter");
    assert!(report.node_cap_reached);
    assert_eq!(report.nodes_materialized, 3);
}

#[tokio::test]
async fn nested_lists_render_tight_under_containers() {
    let workspace = FakeWorkspace::new()
        .with_children(
            "root",
            vec![
                with_children(bullet("b1", "Top")),
                with_children(text_block("t1", "toggle", "Details")),
            ],
        )
        .with_children("b1", vec![bullet("c1", "a"), bullet("c2", "b")])
        .with_children("t1", vec![paragraph("p1", "Inside"), bullet("c3", "x"), bullet("c4", "y")]);
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let markdown = converter.convert(&root()).await.unwrap();

    assert_eq!(
        markdown,
        "- Top\n  - a\n  - b\n\n- Details\n\n  Inside\n\n  - x\n  - y"
    );
}

#[tokio::test]
async fn pagination_follows_cursors_in_order() {
    let workspace = FakeWorkspace::new().with_paged_children(
        "root",
        vec![
            vec![numbered("n1", "One")],
            vec![numbered("n2", "Two")],
            vec![numbered("n3", "Three")],
        ],
    );
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let markdown = converter.convert(&root()).await.unwrap();

    assert_eq!(markdown, "1. One\n\n2. Two\n\n3. Three");
    assert_eq!(workspace.child_requests(), 3);
}

#[tokio::test]
async fn malformed_entries_are_skipped_in_order() {
    let workspace = FakeWorkspace::new().with_children(
        "root",
        vec![
            paragraph("a", "first"),
            json!({"object": "block", "id": "no-type"}),
            json!({"object": "block", "type": "paragraph", "paragraph": {"rich_text": []}}),
            json!({"object": "block", "id": "bad", "type": "paragraph", "paragraph": 5}),
            paragraph("b", "second"),
        ],
    );
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let (markdown, report) = converter.convert_with_report(&root()).await.unwrap();

    assert_eq!(markdown, "first\n\nsecond");
    assert_eq!(report.malformed_skipped, 3);
    assert_eq!(report.nodes_materialized, 2);
}

#[tokio::test]
async fn synced_reference_expands_the_original() {
    let workspace = FakeWorkspace::new()
        .with_children(
            "root",
            vec![paragraph("p1", "Before"), synced_reference("s1", "orig")],
        )
        .with_children("orig", vec![paragraph("o1", "Shared")]);
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let markdown = converter.convert(&root()).await.unwrap();

    assert_eq!(markdown, "Before\n\nShared");
}

#[tokio::test]
async fn self_referencing_sync_stops_at_depth() {
    let workspace = FakeWorkspace::new()
        .with_children("root", vec![synced_reference("s1", "loop")])
        .with_children(
            "loop",
            vec![paragraph("p1", "Again"), synced_reference("s2", "loop")],
        );
    let converter = MarkdownConverter::new(&workspace, config(3, 500));

    let (markdown, report) = converter.convert_with_report(&root()).await.unwrap();

    assert_eq!(markdown, "Again\n\nAgain");
    assert!(report.depth_cap_reached);
}

#[tokio::test]
async fn rich_text_keeps_inner_whitespace() {
    let bold = json!({"bold": true, "italic": false, "strikethrough": false,
                      "underline": false, "code": false, "color": "default"});
    let block = json!({
        "object": "block",
        "id": "p1",
        "type": "paragraph",
        "has_children": false,
        "paragraph": {"rich_text": [
            text_run("Say"),
            styled_run(" Hi ", bold),
            text_run("there")
        ]}
    });
    let workspace = FakeWorkspace::new().with_children("root", vec![block]);
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    assert_eq!(converter.convert(&root()).await.unwrap(), "Say **Hi** there");
}

#[tokio::test]
async fn conversion_is_deterministic() {
    let workspace = sample_workspace();
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let first = converter.convert(&root()).await.unwrap();
    let second = converter.convert(&root()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_fetch_aborts_the_conversion() {
    let workspace = FakeWorkspace::new()
        .with_children("root", vec![with_children(paragraph("p1", "Parent"))])
        .failing_on("p1");
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let err = converter.convert(&root()).await.unwrap_err();

    assert_eq!(err.notion_code(), Some(&NotionErrorCode::InternalError));
}

#[tokio::test]
async fn empty_root_id_is_rejected() {
    let workspace = FakeWorkspace::new();
    let converter = MarkdownConverter::new(&workspace, ConverterConfig::default());

    let err = converter.convert(&BlockId::new("")).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidId(_)));
    assert_eq!(workspace.child_requests(), 0);
}
